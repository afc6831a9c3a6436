// Scriptable in-memory monitors for unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use crate::{Delay, DisplayChannelProvider, VcpReply};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Enumerate,
    Get { monitor: usize, code: u8 },
    Set { monitor: usize, code: u8, value: u16, ok: bool },
    Destroy { monitor: usize },
    Sleep(Duration),
}

/// Monitor that echoes back whatever value was last accepted.
#[derive(Debug, Clone, Default)]
pub struct FakeMonitor {
    pub description: String,
    // code -> (current, maximum)
    pub features: BTreeMap<u8, (u16, u16)>,
    pub rejected_codes: HashSet<u8>,
    pub rejected_values: HashSet<(u8, u16)>,
}

impl FakeMonitor {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_owned(),
            ..Default::default()
        }
    }
    pub fn with_feature(mut self, code: u8, current: u16, maximum: u16) -> Self {
        self.features.insert(code, (current, maximum));
        self
    }
    pub fn rejecting(mut self, code: u8) -> Self {
        self.rejected_codes.insert(code);
        self
    }
    pub fn rejecting_value(mut self, code: u8, value: u16) -> Self {
        self.rejected_values.insert((code, value));
        self
    }
}

#[derive(Debug, Default)]
pub struct FakeBus {
    pub monitors: Vec<FakeMonitor>,
    pub calls: Vec<Call>,
    pub handed_out: usize,
    pub destroyed: usize,
}

impl FakeBus {
    pub fn outstanding(&self) -> usize {
        self.handed_out - self.destroyed
    }
    pub fn sets(&self) -> Vec<(u8, u16, bool)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Set { code, value, ok, .. } => Some((*code, *value, *ok)),
                _ => None,
            })
            .collect()
    }
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
    pub fn current(&self, monitor: usize, code: u8) -> Option<u16> {
        self.monitors[monitor].features.get(&code).map(|(cur, _)| *cur)
    }
}

pub type SharedBus = Rc<RefCell<FakeBus>>;

// Deliberately not Clone so that handles behave like the real thing.
#[derive(Debug)]
pub struct FakeHandle {
    monitor: usize,
}

pub struct FakeProvider {
    bus: SharedBus,
    last_error: String,
}

impl DisplayChannelProvider for FakeProvider {
    type Handle = FakeHandle;

    fn enumerate_physical_monitors(&mut self) -> Vec<(FakeHandle, String)> {
        let mut bus = self.bus.borrow_mut();
        bus.calls.push(Call::Enumerate);
        bus.handed_out += bus.monitors.len();
        bus.monitors
            .iter()
            .enumerate()
            .map(|(monitor, m)| (FakeHandle { monitor }, m.description.clone()))
            .collect()
    }

    fn destroy_physical_monitor(&mut self, handle: FakeHandle) -> bool {
        let mut bus = self.bus.borrow_mut();
        bus.calls.push(Call::Destroy {
            monitor: handle.monitor,
        });
        bus.destroyed += 1;
        true
    }

    fn set_feature(&mut self, handle: &mut FakeHandle, code: u8, value: u16) -> bool {
        let mut bus = self.bus.borrow_mut();
        let monitor = &mut bus.monitors[handle.monitor];
        let ok = !monitor.rejected_codes.contains(&code)
            && !monitor.rejected_values.contains(&(code, value))
            && monitor.features.contains_key(&code);
        if ok {
            if let Some(feature) = monitor.features.get_mut(&code) {
                feature.0 = value;
            }
        } else {
            self.last_error = format!("fake monitor refused {code:#04x}={value}");
        }
        bus.calls.push(Call::Set {
            monitor: handle.monitor,
            code,
            value,
            ok,
        });
        ok
    }

    fn get_feature(&mut self, handle: &mut FakeHandle, code: u8) -> Option<VcpReply> {
        let mut bus = self.bus.borrow_mut();
        bus.calls.push(Call::Get {
            monitor: handle.monitor,
            code,
        });
        let reply = bus.monitors[handle.monitor]
            .features
            .get(&code)
            .map(|(current, maximum)| VcpReply::new(true, *current, *maximum));
        if reply.is_none() {
            self.last_error = format!("fake monitor has no feature {code:#04x}");
        }
        reply
    }

    fn last_error(&self) -> String {
        self.last_error.clone()
    }
}

pub struct FakeDelay {
    bus: SharedBus,
}

impl Delay for FakeDelay {
    fn sleep(&mut self, duration: Duration) {
        self.bus.borrow_mut().calls.push(Call::Sleep(duration));
    }
}

pub fn fake(monitors: Vec<FakeMonitor>) -> (FakeProvider, FakeDelay, SharedBus) {
    let bus = Rc::new(RefCell::new(FakeBus {
        monitors,
        ..Default::default()
    }));
    (
        FakeProvider {
            bus: bus.clone(),
            last_error: String::new(),
        },
        FakeDelay { bus: bus.clone() },
        bus,
    )
}
