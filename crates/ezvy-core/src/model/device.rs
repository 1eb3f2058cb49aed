// ── Device model ──

use serde::Serialize;

use ezvy_api::cloud::models::DeviceInfo;

// Cloud status code meaning "offline / unreachable".
const STATUS_OFFLINE: i32 = 2;

/// One physical device on the account.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    /// Serial number -- the stable identifier across every endpoint.
    pub serial: String,
    /// User-assigned name, falling back to the serial.
    pub name: String,
    /// Hardware model string (e.g. `CS-T30-10A-EU`).
    pub model: Option<String>,
    /// Firmware version.
    pub firmware: Option<String>,
    /// Raw cloud status code. 1 = online, 2 = offline.
    pub status: i32,
}

impl Device {
    /// Whether the cloud considers this device reachable. Commands to
    /// an unavailable device are rejected locally instead of being
    /// sent and timing out.
    pub fn is_available(&self) -> bool {
        self.status != STATUS_OFFLINE
    }
}

impl From<DeviceInfo> for Device {
    fn from(info: DeviceInfo) -> Self {
        let name = info
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| info.device_serial.clone());
        Self {
            serial: info.device_serial,
            name,
            model: info.device_type,
            firmware: info.version,
            status: info.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: i32) -> DeviceInfo {
        DeviceInfo {
            device_serial: "D11111111".into(),
            name: Some("Garage Plug".into()),
            device_type: Some("CS-T30".into()),
            version: Some("5.2.4".into()),
            status,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn online_device_is_available() {
        assert!(Device::from(raw(1)).is_available());
    }

    #[test]
    fn offline_device_is_unavailable() {
        assert!(!Device::from(raw(2)).is_available());
    }

    #[test]
    fn empty_name_falls_back_to_serial() {
        let mut info = raw(1);
        info.name = Some(String::new());
        assert_eq!(Device::from(info).name, "D11111111");
    }
}
