// ── Account session facade ──
//
// One `Account` per EZVIZ account: owns the cloud client, the switch
// cache, and the background poll task. Sessions are per-account by
// construction -- two accounts never share client or cache state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use ezvy_api::cloud::devices::FILTER_SWITCH;
use ezvy_api::{AlarmQuery, CloudClient, SessionTokens, TransportConfig};

use crate::config::AccountConfig;
use crate::error::CoreError;
use crate::model::{Device, DoorbellEvent, Switch, SwitchKind};
use crate::store::SwitchStore;

/// Session facade for one EZVIZ account.
///
/// Cheaply cloneable. [`connect()`](Self::connect) makes exactly one
/// login attempt -- bad credentials and MFA accounts fail immediately,
/// with no retry loop that could lock the account out.
#[derive(Clone)]
pub struct Account {
    inner: Arc<AccountInner>,
}

struct AccountInner {
    config: AccountConfig,
    client: CloudClient,
    store: Arc<SwitchStore>,
    cancel: CancellationToken,
}

impl Account {
    /// Create an account session from configuration. Does NOT log in --
    /// call [`connect()`](Self::connect).
    pub fn new(config: AccountConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = CloudClient::new(&config.region, &transport)?;
        Ok(Self::from_parts(config, client))
    }

    /// Create an account session around an existing client. Used by
    /// tests to point at a mock server.
    pub fn from_parts(config: AccountConfig, client: CloudClient) -> Self {
        Self {
            inner: Arc::new(AccountInner {
                config,
                client,
                store: Arc::new(SwitchStore::new()),
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &AccountConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<SwitchStore> {
        &self.inner.store
    }

    /// Session tokens for persistence, once connected.
    pub fn session_tokens(&self) -> Option<SessionTokens> {
        self.inner.client.session_tokens()
    }

    // ── Connection lifecycle ─────────────────────────────────────────

    /// Log in and perform the initial device refresh.
    ///
    /// Exactly one login attempt. Fails with
    /// [`CoreError::InvalidCredentials`] on a bad password and
    /// [`CoreError::MfaUnsupported`] when the account has MFA enabled.
    pub async fn connect(&self) -> Result<(), CoreError> {
        self.inner
            .client
            .login(&self.inner.config.email, &self.inner.config.password)
            .await?;
        info!(account = %self.inner.config.email, "connected");
        self.refresh().await
    }

    /// Restore a saved session instead of logging in, then refresh.
    /// Fails with [`CoreError::InvalidCredentials`] if the tokens have
    /// expired server-side.
    pub async fn resume(&self, tokens: SessionTokens) -> Result<(), CoreError> {
        self.inner.client.restore_session(tokens);
        self.refresh().await
    }

    /// Stop the background poll task, if one is running.
    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Fetch the device page list and rebuild the switch cache.
    ///
    /// Devices and their switch channels arrive in two parallel arrays
    /// keyed by serial; this joins them, then applies the result with
    /// upsert-then-prune semantics.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        self.require_connected()?;
        let page = self
            .inner
            .client
            .device_page_list(Some(FILTER_SWITCH))
            .await?;

        let devices: Vec<Device> = page.device_infos.into_iter().map(Device::from).collect();
        let by_serial: HashMap<&str, &Device> =
            devices.iter().map(|d| (d.serial.as_str(), d)).collect();

        let mut switches = Vec::new();
        for info in page.switch_status_infos {
            let Some(device) = by_serial.get(info.device_serial.as_str()) else {
                // Channel states for a device missing from deviceInfos;
                // nothing to attach them to.
                debug!(serial = %info.device_serial, "switch states for unknown device");
                continue;
            };
            for state in info.switches {
                switches.push(Switch {
                    device_serial: device.serial.clone(),
                    device_name: device.name.clone(),
                    kind: SwitchKind::from_code(state.channel_type),
                    is_on: state.enable,
                    is_available: device.is_available(),
                });
            }
        }

        debug!(
            devices = devices.len(),
            switches = switches.len(),
            "refresh applied"
        );
        self.inner.store.apply_refresh(devices, switches);
        Ok(())
    }

    /// Spawn a background task that refreshes on the configured
    /// interval until [`shutdown()`](Self::shutdown). Transient errors
    /// are logged and retried on the next tick; auth errors stop the
    /// task.
    pub fn spawn_poll_task(&self) -> JoinHandle<()> {
        let account = self.clone();
        let cancel = self.inner.cancel.clone();
        let interval = self.inner.config.poll_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // First tick fires immediately; the initial refresh already
            // ran in connect().
            ticker.tick().await;

            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        debug!("poll task stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        match account.refresh().await {
                            Ok(()) => {}
                            Err(CoreError::InvalidCredentials { message }) => {
                                warn!(%message, "session lost, stopping poll task");
                                break;
                            }
                            Err(err) => {
                                warn!(%err, "refresh failed, will retry next tick");
                            }
                        }
                    }
                }
            }
        })
    }

    // ── Device / switch queries ──────────────────────────────────────

    pub fn devices(&self) -> Vec<Arc<Device>> {
        self.inner.store.devices()
    }

    pub fn switches(&self) -> Arc<Vec<Arc<Switch>>> {
        self.inner.store.snapshot()
    }

    /// Look up a device or fail with [`CoreError::DeviceNotFound`].
    pub fn device(&self, serial: &str) -> Result<Arc<Device>, CoreError> {
        self.inner
            .store
            .device(serial)
            .ok_or_else(|| CoreError::DeviceNotFound {
                serial: serial.to_string(),
            })
    }

    // ── Switch commands ──────────────────────────────────────────────

    /// Turn a switch channel on.
    pub async fn turn_on(&self, device_serial: &str, channel_code: i32) -> Result<(), CoreError> {
        self.set_switch(device_serial, channel_code, true).await
    }

    /// Turn a switch channel off.
    pub async fn turn_off(&self, device_serial: &str, channel_code: i32) -> Result<(), CoreError> {
        self.set_switch(device_serial, channel_code, false).await
    }

    /// Issue exactly one switch command, then update the cache in
    /// place. No immediate re-poll: the next refresh cycle reconciles
    /// with the cloud.
    async fn set_switch(
        &self,
        device_serial: &str,
        channel_code: i32,
        enable: bool,
    ) -> Result<(), CoreError> {
        self.require_connected()?;
        let device = self.device(device_serial)?;
        if !device.is_available() {
            return Err(CoreError::DeviceUnavailable {
                serial: device_serial.to_string(),
            });
        }
        if self.inner.store.switch(device_serial, channel_code).is_none() {
            return Err(CoreError::SwitchNotFound {
                identifier: format!("{device_serial}/{channel_code}"),
            });
        }

        self.inner
            .client
            .set_switch(device_serial, channel_code, enable)
            .await?;
        self.inner
            .store
            .set_switch_state(device_serial, channel_code, enable);
        Ok(())
    }

    // ── Doorbell operations ──────────────────────────────────────────

    /// Visit events for a doorbell, newest page first.
    pub async fn doorbell_events(
        &self,
        device_serial: &str,
        query: &AlarmQuery,
    ) -> Result<Vec<DoorbellEvent>, CoreError> {
        self.require_connected()?;
        let page = self.inner.client.alarm_history(device_serial, query).await?;
        Ok(page
            .alarms
            .into_iter()
            .map(|record| DoorbellEvent::from_record(device_serial, record))
            .collect())
    }

    /// Snapshot image for a visit event, if the cloud stored one.
    pub async fn visitor_image(
        &self,
        device_serial: &str,
        event_id: &str,
    ) -> Result<Option<Vec<u8>>, CoreError> {
        self.require_connected()?;
        Ok(self
            .inner
            .client
            .visitor_image(device_serial, event_id)
            .await?)
    }

    /// Mark a visit event as read.
    pub async fn mark_event_read(
        &self,
        device_serial: &str,
        event_id: &str,
    ) -> Result<(), CoreError> {
        self.require_connected()?;
        Ok(self
            .inner
            .client
            .mark_alarm_read(device_serial, event_id)
            .await?)
    }

    /// Trigger the gate relay on a doorbell. Rejected locally if the
    /// device is known to be offline.
    pub async fn open_gate(&self, device_serial: &str) -> Result<(), CoreError> {
        self.require_connected()?;
        if let Some(device) = self.inner.store.device(device_serial) {
            if !device.is_available() {
                return Err(CoreError::DeviceUnavailable {
                    serial: device_serial.to_string(),
                });
            }
        }
        Ok(self.inner.client.open_door(device_serial).await?)
    }

    fn require_connected(&self) -> Result<(), CoreError> {
        if self.inner.client.is_authenticated() {
            Ok(())
        } else {
            Err(CoreError::NotConnected)
        }
    }
}
