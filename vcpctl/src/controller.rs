use std::time::Duration;

use crate::client::FeatureClient;
use crate::codes;
use crate::{
    Delay, DisplayChannelProvider, Error, InputSource, MonitorInfo, MonitorRegistry, PowerMode,
    Result, UsbPort, VcpReply,
};

/// Tunables for compound operations and probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Vendor USB switch codes, tried in order.
    pub usb_codes: Vec<u8>,
    /// Pause between the input switch and the USB switch of a KVM switch.
    pub settle_delay: Duration,
    /// Pause after each USB discovery attempt so someone can look at the desk.
    pub observe_delay: Duration,
    /// Highest value tried per code during USB discovery.
    pub max_probe_value: u16,
    /// Codes read by capability discovery before the vendor band sweep.
    pub standard_codes: Vec<u8>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            usb_codes: codes::DEFAULT_USB_CODES.to_vec(),
            settle_delay: Duration::from_millis(100),
            observe_delay: Duration::from_millis(1500),
            max_probe_value: 4,
            standard_codes: codes::STANDARD_CODES.to_vec(),
        }
    }
}

/// Named monitor operations, each run against a freshly acquired handle.
pub struct Controller<P, D> {
    pub(crate) registry: MonitorRegistry<P>,
    pub(crate) delay: D,
    pub(crate) options: ControllerOptions,
}

fn percent(what: &str, value: u16) -> Result<u16> {
    if value > 100 {
        return Err(Error::InvalidArgument(format!(
            "{what} must be between 0 and 100, got {value}"
        )));
    }
    Ok(value)
}

// First candidate code that accepts `port`, if any.
fn switch_usb_with<P: DisplayChannelProvider>(
    client: &mut FeatureClient<'_, P>,
    port: UsbPort,
    candidates: &[u8],
) -> Option<u8> {
    for &code in candidates {
        match client.set(code, port.value()) {
            Ok(()) => {
                log::info!("switched USB to {} via {:#04x}", port, code);
                return Some(code);
            }
            Err(e) => log::debug!("USB code {:#04x} rejected: {}", code, e),
        }
    }
    None
}

impl<P: DisplayChannelProvider, D: Delay> Controller<P, D> {
    pub fn new(provider: P, delay: D, options: ControllerOptions) -> Self {
        Self {
            registry: MonitorRegistry::new(provider),
            delay,
            options,
        }
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn registry(&mut self) -> &mut MonitorRegistry<P> {
        &mut self.registry
    }

    pub fn list_monitors(&mut self) -> Vec<MonitorInfo> {
        self.registry.list()
    }

    pub fn get_vcp(&mut self, index: usize, code: u8) -> Result<VcpReply> {
        self.registry.with_monitor(index, |c| c.get(code))
    }

    pub fn set_vcp(&mut self, index: usize, code: u8, value: u16) -> Result<()> {
        self.registry.with_monitor(index, |c| c.set(code, value))
    }

    pub fn switch_input(&mut self, index: usize, input: InputSource) -> Result<()> {
        log::info!("switching monitor {} to input {}", index, input);
        self.set_vcp(index, codes::INPUT_SOURCE, input.value())
    }

    pub fn current_input(&mut self, index: usize) -> Result<InputSource> {
        let reply = self.get_vcp(index, codes::INPUT_SOURCE)?;
        Ok(InputSource::from(reply.current))
    }

    /// Tries each candidate code (the configured list when `codes` is
    /// `None`) and stops at the first one the monitor accepts.
    pub fn try_switch_usb(
        &mut self,
        index: usize,
        port: UsbPort,
        codes: Option<&[u8]>,
    ) -> Result<bool> {
        let candidates = codes.unwrap_or(&self.options.usb_codes);
        let switched = self
            .registry
            .with_monitor(index, |c| Ok(switch_usb_with(c, port, candidates)))?;
        Ok(switched.is_some())
    }

    pub fn switch_usb(&mut self, index: usize, port: UsbPort, codes: Option<&[u8]>) -> Result<()> {
        if self.try_switch_usb(index, port, codes)? {
            Ok(())
        } else {
            Err(Error::UsbSwitchUnsupported {
                codes: codes.unwrap_or(&self.options.usb_codes).to_vec(),
            })
        }
    }

    /// `None` when no candidate code is readable; plenty of monitors have no
    /// USB switch at all.
    pub fn current_usb_port(
        &mut self,
        index: usize,
        codes: Option<&[u8]>,
    ) -> Result<Option<UsbPort>> {
        let candidates = codes.unwrap_or(&self.options.usb_codes);
        self.registry.with_monitor(index, |c| {
            for &code in candidates {
                if let Ok(reply) = c.get(code) {
                    return Ok(Some(UsbPort::from(reply.current)));
                }
            }
            Ok(None)
        })
    }

    /// Switches video input, waits for the monitor to settle, then moves the
    /// USB upstream port. The USB step is best effort.
    ///
    /// Both steps run on one handle: once video leaves this host the monitor
    /// may vanish from the next enumeration.
    pub fn switch_kvm(&mut self, index: usize, input: InputSource, port: UsbPort) -> Result<()> {
        let Self {
            registry,
            delay,
            options,
        } = self;
        registry.with_monitor(index, |c| {
            log::info!("KVM: switching '{}' to {} / {}", c.description(), input, port);
            c.set(codes::INPUT_SOURCE, input.value())?;
            delay.sleep(options.settle_delay);
            if switch_usb_with(c, port, &options.usb_codes).is_none() {
                log::warn!(
                    "KVM: input switched but no USB code accepted {} on '{}'",
                    port,
                    c.description()
                );
            }
            Ok(())
        })
    }

    pub fn set_brightness(&mut self, index: usize, value: u16) -> Result<()> {
        let value = percent("brightness", value)?;
        self.set_vcp(index, codes::BRIGHTNESS, value)
    }

    pub fn brightness(&mut self, index: usize) -> Result<VcpReply> {
        self.get_vcp(index, codes::BRIGHTNESS)
    }

    pub fn set_contrast(&mut self, index: usize, value: u16) -> Result<()> {
        let value = percent("contrast", value)?;
        self.set_vcp(index, codes::CONTRAST, value)
    }

    pub fn contrast(&mut self, index: usize) -> Result<VcpReply> {
        self.get_vcp(index, codes::CONTRAST)
    }

    pub fn set_power_mode(&mut self, index: usize, mode: PowerMode) -> Result<()> {
        log::info!("setting monitor {} power mode to {}", index, mode);
        self.set_vcp(index, codes::POWER_MODE, mode.value())
    }

    pub fn power_mode(&mut self, index: usize) -> Result<PowerMode> {
        let reply = self.get_vcp(index, codes::POWER_MODE)?;
        Ok(PowerMode::from(reply.current))
    }
}
