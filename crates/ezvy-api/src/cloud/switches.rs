// Switch command endpoint

use serde_json::json;
use tracing::info;

use super::client::CloudClient;
use crate::error::Error;

impl CloudClient {
    /// Set one switch channel on a device.
    ///
    /// `channel_type` is the numeric channel code from the page list
    /// (e.g. 14 for a smart plug's relay). Issues exactly one request;
    /// the caller decides how to refresh cached state afterwards.
    pub async fn set_switch(
        &self,
        device_serial: &str,
        channel_type: i32,
        enable: bool,
    ) -> Result<(), Error> {
        let body = json!({
            "deviceSerial": device_serial,
            "enable": i32::from(enable),
            "type": channel_type,
        });
        self.post_ok("v3/userdevices/v1/devices/switchStatus", &body)
            .await?;
        info!(device_serial, channel_type, enable, "switch state set");
        Ok(())
    }
}
