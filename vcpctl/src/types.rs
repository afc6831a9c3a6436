use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Reply to a single VCP get exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VcpReply {
    pub continuous: bool,
    pub current: u16,
    pub maximum: u16,
}

impl VcpReply {
    pub fn new(continuous: bool, current: u16, maximum: u16) -> Self {
        Self {
            continuous,
            current,
            maximum,
        }
    }

    /// Some monitors report a current value above their own maximum.
    pub fn is_well_formed(&self) -> bool {
        self.current <= self.maximum
    }
}

/// Listing entry for one attached monitor. Does not own the handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    pub index: usize,
    pub description: String,
}

// Named overlay over a raw VCP value. Unknown values stay representable.
macro_rules! vcp_values {
    ($(#[$meta:meta])* $name:ident { $($konst:ident = $value:expr, $label:expr;)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub u16);

        impl $name {
            $(pub const $konst: $name = $name($value);)*

            const KNOWN: &'static [(u16, &'static str)] = &[$(($value, $label)),*];

            pub fn value(self) -> u16 {
                self.0
            }

            pub fn name(self) -> Option<&'static str> {
                Self::KNOWN
                    .iter()
                    .find(|(v, _)| *v == self.0)
                    .map(|(_, label)| *label)
            }

            pub fn known() -> impl Iterator<Item = $name> {
                Self::KNOWN.iter().map(|(v, _)| $name(*v))
            }
        }

        impl From<u16> for $name {
            fn from(value: u16) -> Self {
                $name(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.name() {
                    Some(label) => f.write_str(label),
                    None => write!(f, "{:#04x}", self.0),
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                if let Some((v, _)) = Self::KNOWN
                    .iter()
                    .find(|(_, label)| label.eq_ignore_ascii_case(wanted))
                {
                    return Ok($name(*v));
                }
                parse_number(wanted).map($name).ok_or_else(|| {
                    Error::InvalidArgument(format!(
                        "unknown {} '{}'",
                        stringify!($name),
                        wanted
                    ))
                })
            }
        }
    };
}

vcp_values! {
    /// Value of the input source feature (0x60).
    InputSource {
        VGA1 = 0x01, "VGA1";
        VGA2 = 0x02, "VGA2";
        DVI1 = 0x03, "DVI1";
        DVI2 = 0x04, "DVI2";
        COMPOSITE1 = 0x05, "Composite1";
        COMPOSITE2 = 0x06, "Composite2";
        SVIDEO1 = 0x07, "SVideo1";
        SVIDEO2 = 0x08, "SVideo2";
        COMPONENT1 = 0x0C, "Component1";
        COMPONENT2 = 0x0D, "Component2";
        COMPONENT3 = 0x0E, "Component3";
        DP1 = 0x0F, "DP1";
        DP2 = 0x10, "DP2";
        HDMI1 = 0x11, "HDMI1";
        HDMI2 = 0x12, "HDMI2";
        USBC = 0x1B, "USBC";
    }
}

vcp_values! {
    /// Upstream port selected by a vendor USB switch code.
    UsbPort {
        USB1 = 1, "USB1";
        USB2 = 2, "USB2";
        USB3 = 3, "USB3";
        USB4 = 4, "USB4";
    }
}

vcp_values! {
    /// Value of the power mode feature (0xD6).
    PowerMode {
        ON = 0x01, "On";
        STANDBY = 0x02, "Standby";
        SUSPEND = 0x03, "Suspend";
        OFF = 0x04, "Off";
        HARD_OFF = 0x05, "HardOff";
    }
}

/// Parses `17`, `0x11` or `0X11` into a 16-bit value.
pub fn parse_number(s: &str) -> Option<u16> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Parses a feature value given in decimal or hex.
pub fn parse_value(s: &str) -> Result<u16, Error> {
    parse_number(s.trim())
        .ok_or_else(|| Error::InvalidArgument(format!("'{}' is not a 16-bit value", s)))
}

/// Parses a VCP code given in decimal or hex.
pub fn parse_code(s: &str) -> Result<u8, Error> {
    parse_number(s.trim())
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| Error::InvalidArgument(format!("'{}' is not a VCP code", s)))
}
