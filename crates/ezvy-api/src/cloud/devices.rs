// Device enumeration endpoint

use serde_json::json;

use super::client::CloudClient;
use super::models::PageList;
use crate::error::Error;

// One page is enough for a residential account; the API caps device
// counts well below this.
const PAGE_SIZE: u32 = 50;

/// Page-list filter selecting devices with switchable channels.
pub const FILTER_SWITCH: &str = "SWITCH";

impl CloudClient {
    /// Fetch the account's device list.
    ///
    /// With [`FILTER_SWITCH`] the response also carries per-device
    /// switch channel states in `switch_status_infos`; with no filter
    /// it returns every device on the account.
    pub async fn device_page_list(&self, filter: Option<&str>) -> Result<PageList, Error> {
        let body = json!({
            "filter": filter.unwrap_or(""),
            "pageSize": PAGE_SIZE,
            "pageStart": 0,
        });
        self.post("v3/userdevices/v1/devices/pagelist", &body).await
    }
}
