//! CEC opcodes
//!
//! Only a handful matter to the reactor; the rest are named so traffic
//! narration stays readable.

use std::fmt;

/// The message type byte following a frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(u8);

impl Opcode {
    pub const FEATURE_ABORT: Self = Self(0x00);
    pub const IMAGE_VIEW_ON: Self = Self(0x04);
    pub const TEXT_VIEW_ON: Self = Self(0x0D);
    pub const STANDBY: Self = Self(0x36);
    pub const USER_CONTROL_PRESSED: Self = Self(0x44);
    pub const USER_CONTROL_RELEASED: Self = Self(0x45);
    pub const GIVE_OSD_NAME: Self = Self(0x46);
    pub const SET_OSD_NAME: Self = Self(0x47);
    /// Sent by a device asking the audio system to turn System Audio Mode on
    pub const SYSTEM_AUDIO_MODE_REQUEST: Self = Self(0x70);
    pub const GIVE_AUDIO_STATUS: Self = Self(0x71);
    /// Sent by the audio system when it turns System Audio Mode on or off
    pub const SET_SYSTEM_AUDIO_MODE: Self = Self(0x72);
    pub const REPORT_AUDIO_STATUS: Self = Self(0x7A);
    pub const GIVE_SYSTEM_AUDIO_MODE_STATUS: Self = Self(0x7D);
    pub const SYSTEM_AUDIO_MODE_STATUS: Self = Self(0x7E);
    pub const ROUTING_CHANGE: Self = Self(0x80);
    /// Broadcast by a source that wants to become the display's input
    pub const ACTIVE_SOURCE: Self = Self(0x82);
    pub const GIVE_PHYSICAL_ADDRESS: Self = Self(0x83);
    pub const REPORT_PHYSICAL_ADDRESS: Self = Self(0x84);
    pub const REQUEST_ACTIVE_SOURCE: Self = Self(0x85);
    pub const SET_STREAM_PATH: Self = Self(0x86);
    pub const DEVICE_VENDOR_ID: Self = Self(0x87);
    pub const GIVE_DEVICE_VENDOR_ID: Self = Self(0x8C);
    pub const GIVE_DEVICE_POWER_STATUS: Self = Self(0x8F);
    pub const REPORT_POWER_STATUS: Self = Self(0x90);
    pub const CEC_VERSION: Self = Self(0x9E);
    pub const GET_CEC_VERSION: Self = Self(0x9F);

    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn byte(self) -> u8 {
        self.0
    }

    /// Human-readable name, if this is an opcode we know about.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::FEATURE_ABORT => "Feature Abort",
            Self::IMAGE_VIEW_ON => "Image View On",
            Self::TEXT_VIEW_ON => "Text View On",
            Self::STANDBY => "Standby",
            Self::USER_CONTROL_PRESSED => "User Control Pressed",
            Self::USER_CONTROL_RELEASED => "User Control Released",
            Self::GIVE_OSD_NAME => "Give OSD Name",
            Self::SET_OSD_NAME => "Set OSD Name",
            Self::SYSTEM_AUDIO_MODE_REQUEST => "System Audio Mode Request",
            Self::GIVE_AUDIO_STATUS => "Give Audio Status",
            Self::SET_SYSTEM_AUDIO_MODE => "Set System Audio Mode",
            Self::REPORT_AUDIO_STATUS => "Report Audio Status",
            Self::GIVE_SYSTEM_AUDIO_MODE_STATUS => "Give System Audio Mode Status",
            Self::SYSTEM_AUDIO_MODE_STATUS => "System Audio Mode Status",
            Self::ROUTING_CHANGE => "Routing Change",
            Self::ACTIVE_SOURCE => "Active Source",
            Self::GIVE_PHYSICAL_ADDRESS => "Give Physical Address",
            Self::REPORT_PHYSICAL_ADDRESS => "Report Physical Address",
            Self::REQUEST_ACTIVE_SOURCE => "Request Active Source",
            Self::SET_STREAM_PATH => "Set Stream Path",
            Self::DEVICE_VENDOR_ID => "Device Vendor ID",
            Self::GIVE_DEVICE_VENDOR_ID => "Give Device Vendor ID",
            Self::GIVE_DEVICE_POWER_STATUS => "Give Device Power Status",
            Self::REPORT_POWER_STATUS => "Report Power Status",
            Self::CEC_VERSION => "CEC Version",
            Self::GET_CEC_VERSION => "Get CEC Version",
            _ => return None,
        };
        Some(name)
    }
}

/// Shows the known name, falling back to `0xNN`.
impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:02x}", self.0),
        }
    }
}
