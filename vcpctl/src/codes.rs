//! Well-known MCCS feature codes.

pub const BRIGHTNESS: u8 = 0x10;
pub const CONTRAST: u8 = 0x12;
pub const COLOR_PRESET: u8 = 0x14;
pub const RED_GAIN: u8 = 0x16;
pub const GREEN_GAIN: u8 = 0x18;
pub const BLUE_GAIN: u8 = 0x1A;
pub const INPUT_SOURCE: u8 = 0x60;
pub const AUDIO_VOLUME: u8 = 0x62;
pub const AUDIO_MUTE: u8 = 0x8D;
pub const POWER_MODE: u8 = 0xD6;
pub const DISPLAY_MODE: u8 = 0xDC;
pub const VCP_VERSION: u8 = 0xDF;

/// First code of the manufacturer reserved band.
pub const VENDOR_FIRST: u8 = 0xE0;
pub const VENDOR_LAST: u8 = 0xFF;

pub const USB_SWITCH_DELL: u8 = 0xE7;
// Dell's alternate KVM code and LG's USB switch code are the same value.
pub const USB_SWITCH_DELL_ALT: u8 = 0xE1;
pub const USB_SWITCH_LG: u8 = USB_SWITCH_DELL_ALT;
pub const USB_SWITCH_HP: u8 = 0xE9;

/// Vendor USB switch codes, in the order they are tried.
pub const DEFAULT_USB_CODES: [u8; 3] = [USB_SWITCH_DELL, USB_SWITCH_DELL_ALT, USB_SWITCH_HP];

/// Standard codes read by capability discovery.
pub const STANDARD_CODES: [u8; 12] = [
    BRIGHTNESS,
    CONTRAST,
    COLOR_PRESET,
    RED_GAIN,
    GREEN_GAIN,
    BLUE_GAIN,
    INPUT_SOURCE,
    AUDIO_VOLUME,
    AUDIO_MUTE,
    POWER_MODE,
    DISPLAY_MODE,
    VCP_VERSION,
];

pub fn is_vendor(code: u8) -> bool {
    code >= VENDOR_FIRST
}

pub fn feature_name(code: u8) -> &'static str {
    match code {
        BRIGHTNESS => "Brightness",
        CONTRAST => "Contrast",
        COLOR_PRESET => "Color Preset",
        RED_GAIN => "Red Gain",
        GREEN_GAIN => "Green Gain",
        BLUE_GAIN => "Blue Gain",
        INPUT_SOURCE => "Input Source",
        AUDIO_VOLUME => "Audio Volume",
        AUDIO_MUTE => "Audio Mute",
        POWER_MODE => "Power Mode",
        DISPLAY_MODE => "Display Mode",
        VCP_VERSION => "VCP Version",
        c if is_vendor(c) => "Manufacturer Specific",
        _ => "Unknown",
    }
}
