// Cloud API response types
//
// Models for the EZVIZ cloud JSON API. All responses are wrapped in the
// `CloudResponse<T>` envelope. Fields use `#[serde(default)]` liberally
// because the API is inconsistent about field presence across device
// generations and firmware versions.

use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard EZVIZ cloud response envelope.
///
/// Every endpoint wraps its payload:
/// ```json
/// { "meta": { "code": 200, "message": "操作成功" }, "data": { ... } }
/// ```
#[derive(Debug, Deserialize)]
pub struct CloudResponse<T> {
    pub meta: Meta,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// Metadata from the envelope. `code` == `200` means success.
#[derive(Debug, Deserialize)]
pub struct Meta {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Session ──────────────────────────────────────────────────────────

/// Session tokens returned by a successful login.
///
/// Both values are sent as headers (`sessionId`, `rfSessionId`) on every
/// authenticated request. They can be persisted and fed back into
/// [`CloudClient::resume`](super::CloudClient::resume).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "rfSessionId")]
    pub rf_session_id: String,
}

// ── Device page list ─────────────────────────────────────────────────

/// Payload of `POST /v3/userdevices/v1/devices/pagelist`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageList {
    #[serde(default, rename = "deviceInfos")]
    pub device_infos: Vec<DeviceInfo>,
    /// Only present when the page list was requested with the `SWITCH`
    /// filter: one entry per device that exposes switchable channels.
    #[serde(default, rename = "switchStatusInfos")]
    pub switch_status_infos: Vec<SwitchStatusInfo>,
}

/// One device from `deviceInfos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(rename = "deviceSerial")]
    pub device_serial: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "deviceType")]
    pub device_type: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Cloud reachability: 1 = online, 2 = offline/unreachable.
    #[serde(default)]
    pub status: i32,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Switch channels for one device, from `switchStatusInfos`.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchStatusInfo {
    #[serde(rename = "deviceSerial")]
    pub device_serial: String,
    #[serde(default, rename = "switchs")]
    pub switches: Vec<SwitchState>,
}

/// One switchable channel: a numeric type code plus its current state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchState {
    #[serde(rename = "type")]
    pub channel_type: i32,
    #[serde(default)]
    pub enable: bool,
}

// ── Doorbell alarms ──────────────────────────────────────────────────

/// Payload of `POST /v3/alarm/device/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlarmPage {
    #[serde(default)]
    pub alarms: Vec<AlarmRecord>,
    #[serde(default, rename = "hasNext")]
    pub has_next: bool,
}

/// One doorbell alarm/visit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmRecord {
    #[serde(rename = "alarmId")]
    pub alarm_id: String,
    #[serde(default, rename = "alarmName")]
    pub alarm_name: Option<String>,
    /// Event timestamp in milliseconds since the epoch.
    #[serde(default, rename = "alarmTime")]
    pub alarm_time: Option<i64>,
    #[serde(default, rename = "isRead")]
    pub is_read: Option<bool>,
    #[serde(default, rename = "picUrl")]
    pub pic_url: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
