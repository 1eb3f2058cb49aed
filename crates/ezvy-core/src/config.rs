// ── Account configuration ──

use std::time::Duration;

use secrecy::SecretString;

use ezvy_api::ApiRegion;

/// Everything needed to open a session for one EZVIZ account.
///
/// Built by the config layer (profiles + env + keyring) or directly by
/// callers. The password is held as a [`SecretString`] so it never
/// appears in debug output.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: SecretString,
    /// Regional API endpoint the account is registered in.
    pub region: ApiRegion,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Interval between background switch-state refreshes.
    pub poll_interval: Duration,
}

impl AccountConfig {
    /// Create a config with default timeout (30s) and poll interval (60s).
    pub fn new(email: impl Into<String>, password: SecretString, region: ApiRegion) -> Self {
        Self {
            email: email.into(),
            password,
            region,
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(60),
        }
    }
}
