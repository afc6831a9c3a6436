use ddc::VcpValue;
use ddc_hi::{Ddc, Display};
use vcpctl::{truncate_description, DisplayChannelProvider, VcpReply};

/// DDC/CI access through whatever backend `ddc-hi` finds on this host.
#[derive(Default)]
pub struct DdcHiProvider {
    last_error: String,
}

impl DdcHiProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

fn describe(display: &Display) -> String {
    let info = &display.info;
    let description = match (&info.manufacturer_id, &info.model_name) {
        (Some(mfg), Some(model)) => format!("{mfg} {model}"),
        (None, Some(model)) => model.clone(),
        _ => info.id.clone(),
    };
    truncate_description(&description)
}

// MCCS type byte 0x00 is "set parameter", the continuous/non-continuous kind.
fn reply_from(value: &VcpValue) -> VcpReply {
    VcpReply::new(value.ty == 0, value.value(), value.maximum())
}

impl DisplayChannelProvider for DdcHiProvider {
    type Handle = Display;

    fn enumerate_physical_monitors(&mut self) -> Vec<(Display, String)> {
        Display::enumerate()
            .into_iter()
            .map(|display| {
                let description = describe(&display);
                log::debug!(
                    "{:?} {}: {}",
                    display.info.backend,
                    display.info.id,
                    description
                );
                (display, description)
            })
            .collect()
    }

    // ddc-hi closes the underlying device when the display is dropped.
    fn destroy_physical_monitor(&mut self, handle: Display) -> bool {
        drop(handle);
        true
    }

    fn set_feature(&mut self, handle: &mut Display, code: u8, value: u16) -> bool {
        match handle.handle.set_vcp_feature(code, value) {
            Ok(()) => true,
            Err(e) => {
                self.last_error = e.to_string();
                false
            }
        }
    }

    fn get_feature(&mut self, handle: &mut Display, code: u8) -> Option<VcpReply> {
        match handle.handle.get_vcp_feature(code) {
            Ok(value) => Some(reply_from(&value)),
            Err(e) => {
                self.last_error = e.to_string();
                None
            }
        }
    }

    fn last_error(&self) -> String {
        self.last_error.clone()
    }
}
