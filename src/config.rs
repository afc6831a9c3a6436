use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context};
use serde::Deserialize;
use serde::Serialize;
use vcpctl::ControllerOptions;

static CONFIG_STR: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/resources/default_config.yaml"
));

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct UsbConfig {
    /// vendor specific codes that switch the monitor's USB upstream port
    pub candidate_codes: Vec<u8>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    pub kvm_settle_ms: u64,
    pub usb_probe_observe_ms: u64,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    pub max_probe_value: u16,
    pub standard_codes: Vec<u8>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub default_monitor: usize,
    pub usb: UsbConfig,
    pub timing: TimingConfig,
    pub probe: ProbeConfig,
}

impl Config {
    /// The config compiled into the binary.
    pub fn new() -> anyhow::Result<Self> {
        Self::from_yaml(CONFIG_STR).context("default config")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        log::debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing {}", path.display()))
    }

    fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(text)?;
        ensure!(
            !config.usb.candidate_codes.is_empty(),
            "usb.candidate_codes must list at least one code"
        );
        Ok(config)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            usb_codes: self.usb.candidate_codes.clone(),
            settle_delay: Duration::from_millis(self.timing.kvm_settle_ms),
            observe_delay: Duration::from_millis(self.timing.usb_probe_observe_ms),
            max_probe_value: self.probe.max_probe_value,
            standard_codes: self.probe.standard_codes.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn config_can_construct() {
        let _ = Config::new().unwrap();
    }

    #[test]
    fn default_config_matches_library_defaults() {
        let config = Config::new().unwrap();
        assert_eq!(config.default_monitor, 0);
        assert_eq!(config.controller_options(), ControllerOptions::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        let text = CONFIG_STR.replace("default_monitor: 0", "default_monitor: 0\nbogus: 1");
        assert!(Config::from_yaml(&text).is_err());
    }

    #[test]
    fn rejects_empty_usb_codes() {
        let text = CONFIG_STR.replace("[0xE7, 0xE1, 0xE9]", "[]");
        assert!(Config::from_yaml(&text).is_err());
    }

    #[test]
    fn custom_usb_codes() {
        let text = CONFIG_STR.replace("[0xE7, 0xE1, 0xE9]", "[0xF1, 0xE7]");
        let config = Config::from_yaml(&text).unwrap();
        assert_eq!(config.controller_options().usb_codes, vec![0xF1, 0xE7]);
    }
}
