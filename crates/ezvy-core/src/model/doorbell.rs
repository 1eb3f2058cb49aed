// ── Doorbell event model ──

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use ezvy_api::cloud::models::AlarmRecord;

/// One visit event recorded by a doorbell.
#[derive(Debug, Clone, Serialize)]
pub struct DoorbellEvent {
    pub id: String,
    pub device_serial: String,
    /// Event description from the cloud (usually the device name).
    pub name: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub is_read: bool,
    /// Whether the cloud stored a snapshot for this visit.
    pub has_image: bool,
}

impl DoorbellEvent {
    /// Decode a raw alarm record for the given device.
    pub fn from_record(device_serial: &str, record: AlarmRecord) -> Self {
        let timestamp = record
            .alarm_time
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single());
        Self {
            id: record.alarm_id,
            device_serial: device_serial.to_string(),
            name: record.alarm_name,
            timestamp,
            is_read: record.is_read.unwrap_or(false),
            has_image: record.pic_url.is_some(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decodes_millisecond_timestamp() {
        let record = AlarmRecord {
            alarm_id: "alarm-001".into(),
            alarm_name: Some("Front Door".into()),
            alarm_time: Some(1_700_000_000_000),
            is_read: None,
            pic_url: Some("https://example.org/pic.jpg".into()),
            extra: serde_json::Map::new(),
        };
        let event = DoorbellEvent::from_record("DB2222222", record);

        assert_eq!(event.id, "alarm-001");
        assert!(!event.is_read);
        assert!(event.has_image);
        let ts = event.timestamp.unwrap();
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_000);
    }
}
