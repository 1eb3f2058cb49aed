// ── Switch model ──
//
// A `Switch` is one toggleable channel on a device. Devices expose any
// number of channels, each identified by a numeric type code; the code
// table below covers the ones seen in the wild, and unknown codes pass
// through as `Other` so new firmware doesn't break enumeration.

use std::fmt;

use serde::Serialize;

/// What a switch channel controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SwitchKind {
    /// Audible alarm tone (code 1).
    AlarmTone,
    /// Status / night light (code 3).
    Light,
    /// Infrared night vision (code 10).
    Infrared,
    /// Smart plug relay (code 14).
    Plug,
    /// Outdoor chime on a doorbell (code 39).
    OutdoorChime,
    /// Two-way talk on a doorbell (code 101).
    DoorbellTalk,
    /// Alarm strobe light (code 303).
    AlarmLight,
    /// A channel code this build doesn't know by name. Still fully
    /// controllable -- the raw code is what goes over the wire.
    Other(i32),
}

impl SwitchKind {
    /// Decode a cloud channel type code.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::AlarmTone,
            3 => Self::Light,
            10 => Self::Infrared,
            14 => Self::Plug,
            39 => Self::OutdoorChime,
            101 => Self::DoorbellTalk,
            303 => Self::AlarmLight,
            other => Self::Other(other),
        }
    }

    /// The numeric code sent in switch commands.
    pub fn code(&self) -> i32 {
        match self {
            Self::AlarmTone => 1,
            Self::Light => 3,
            Self::Infrared => 10,
            Self::Plug => 14,
            Self::OutdoorChime => 39,
            Self::DoorbellTalk => 101,
            Self::AlarmLight => 303,
            Self::Other(code) => *code,
        }
    }

    /// Short human-readable label for tables and entity names.
    pub fn label(&self) -> String {
        match self {
            Self::AlarmTone => "alarm-tone".into(),
            Self::Light => "light".into(),
            Self::Infrared => "infrared".into(),
            Self::Plug => "plug".into(),
            Self::OutdoorChime => "outdoor-chime".into(),
            Self::DoorbellTalk => "doorbell-talk".into(),
            Self::AlarmLight => "alarm-light".into(),
            Self::Other(code) => format!("channel-{code}"),
        }
    }
}

impl fmt::Display for SwitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One toggleable channel on a device, with its cached state.
#[derive(Debug, Clone, Serialize)]
pub struct Switch {
    /// Serial of the owning device.
    pub device_serial: String,
    /// Name of the owning device (for display).
    pub device_name: String,
    /// What this channel controls.
    pub kind: SwitchKind,
    /// Last observed on/off state.
    pub is_on: bool,
    /// Whether the owning device is reachable. Toggles on an
    /// unavailable switch are rejected without a cloud call.
    pub is_available: bool,
}

impl Switch {
    /// Store key: `"{serial}/{channel_code}"`. Unique per channel and
    /// stable across refreshes.
    pub fn key(&self) -> String {
        switch_key(&self.device_serial, self.kind.code())
    }

    /// Display name: `"{device_name} {kind}"`, e.g. `"Garage Plug plug"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.device_name, self.kind)
    }
}

/// Build the store key for a device serial and channel code.
pub fn switch_key(device_serial: &str, channel_code: i32) -> String {
    format!("{device_serial}/{channel_code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        for code in [1, 3, 10, 14, 39, 101, 303] {
            assert_eq!(SwitchKind::from_code(code).code(), code);
        }
    }

    #[test]
    fn unknown_code_passes_through() {
        let kind = SwitchKind::from_code(777);
        assert_eq!(kind, SwitchKind::Other(777));
        assert_eq!(kind.code(), 777);
        assert_eq!(kind.label(), "channel-777");
    }

    #[test]
    fn key_is_serial_slash_code() {
        assert_eq!(switch_key("D11111111", 14), "D11111111/14");
    }
}
