use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("monitor {index} not found ({count} attached)")]
    MonitorNotFound { index: usize, count: usize },
    #[error("VCP feature {code:#04x} is not supported by this monitor")]
    UnsupportedFeature { code: u8 },
    #[error("setting VCP feature {code:#04x} to {value} failed: {reason}")]
    SetFailed { code: u8, value: u16, reason: String },
    #[error("none of the USB switch codes {codes:02x?} were accepted")]
    UsbSwitchUnsupported { codes: Vec<u8> },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
