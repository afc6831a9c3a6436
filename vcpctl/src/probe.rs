use crate::client::FeatureClient;
use crate::codes;
use crate::{Controller, Delay, DisplayChannelProvider, Result, VcpReply};

/// One readable feature found by [`Controller::discover_capabilities`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityEntry {
    pub code: u8,
    pub name: &'static str,
    pub reply: VcpReply,
}

// Puts a probed code back to its original value when dropped.
struct Restore<'c, 'a, P: DisplayChannelProvider> {
    client: &'c mut FeatureClient<'a, P>,
    code: u8,
    original: u16,
}

impl<P: DisplayChannelProvider> Drop for Restore<'_, '_, P> {
    fn drop(&mut self) {
        match self.client.set(self.code, self.original) {
            Ok(()) => log::info!("restored {:#04x} to {}", self.code, self.original),
            Err(e) => log::warn!("could not restore {:#04x}: {}", self.code, e),
        }
    }
}

impl<P: DisplayChannelProvider, D: Delay> Controller<P, D> {
    /// Reads the standard codes and then the whole vendor band. Codes that do
    /// not answer are left out.
    pub fn discover_capabilities(&mut self, index: usize) -> Result<Vec<CapabilityEntry>> {
        let standard = self.options.standard_codes.clone();
        self.registry.with_monitor(index, |c| {
            let vendor = codes::VENDOR_FIRST..=codes::VENDOR_LAST;
            let found = standard
                .into_iter()
                .chain(vendor)
                .filter_map(|code| {
                    c.get(code).ok().map(|reply| CapabilityEntry {
                        code,
                        name: codes::feature_name(code),
                        reply,
                    })
                })
                .collect::<Vec<_>>();
            log::info!(
                "'{}' answered {} feature code(s)",
                c.description(),
                found.len()
            );
            Ok(found)
        })
    }

    /// Interactive hunt for a monitor's USB switch code.
    ///
    /// Every readable vendor code is set to each value from 1 up to
    /// `min(max_probe_value, maximum)` other than its current one, pausing
    /// after each attempt so a person can watch whether the USB devices move.
    /// The original value is written back afterwards, also when attempts fail.
    /// This changes live monitor state and takes a while.
    pub fn discover_usb_code(&mut self, index: usize) -> Result<()> {
        let Self {
            registry,
            delay,
            options,
        } = self;
        registry.with_monitor(index, |c| {
            for code in codes::VENDOR_FIRST..=codes::VENDOR_LAST {
                let Ok(reply) = c.get(code) else {
                    continue;
                };
                let original = reply.current;
                let top = options.max_probe_value.min(reply.maximum);
                let values: Vec<u16> = (1..=top).filter(|v| *v != original).collect();
                if values.is_empty() {
                    continue;
                }
                log::info!(
                    "probing {:#04x} (current {}, max {})",
                    code,
                    original,
                    reply.maximum
                );
                let mut restore = Restore {
                    client: &mut *c,
                    code,
                    original,
                };
                for value in values {
                    match restore.client.set(code, value) {
                        Ok(()) => log::info!(
                            "set {:#04x}={}, did the USB devices switch?",
                            code,
                            value
                        ),
                        Err(e) => log::info!("{:#04x}={} rejected: {}", code, value, e),
                    }
                    delay.sleep(options.observe_delay);
                }
                drop(restore);
            }
            Ok(())
        })
    }
}
