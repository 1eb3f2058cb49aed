// ── Switch-state cache ──
//
// Lock-free concurrent storage for devices and their switch channels,
// with push-based change notification via `watch` channels. Refreshes
// use upsert-then-prune so subscribers never observe a transient empty
// snapshot between clear and re-insert.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::{switch::switch_key, Device, Switch};

/// Concurrent cache of the account's devices and switches.
pub struct SwitchStore {
    /// Devices by serial.
    devices: DashMap<String, Arc<Device>>,
    /// Switches by `"{serial}/{channel_code}"`.
    switches: DashMap<String, Arc<Switch>>,
    /// Full switch snapshot, rebuilt on mutation.
    snapshot: watch::Sender<Arc<Vec<Arc<Switch>>>>,
    /// When the last successful refresh completed.
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl SwitchStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (last_refresh, _) = watch::channel(None);
        Self {
            devices: DashMap::new(),
            switches: DashMap::new(),
            snapshot,
            last_refresh,
        }
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Apply a full refresh: upsert every incoming device and switch,
    /// then prune keys the cloud no longer reports.
    pub fn apply_refresh(&self, devices: Vec<Device>, switches: Vec<Switch>) {
        let device_keys: HashSet<String> = devices.iter().map(|d| d.serial.clone()).collect();
        for device in devices {
            self.devices.insert(device.serial.clone(), Arc::new(device));
        }
        self.devices.retain(|serial, _| device_keys.contains(serial));

        let switch_keys: HashSet<String> = switches.iter().map(Switch::key).collect();
        for switch in switches {
            self.switches.insert(switch.key(), Arc::new(switch));
        }
        self.switches.retain(|key, _| switch_keys.contains(key));

        self.rebuild_snapshot();
        let _ = self.last_refresh.send(Some(Utc::now()));
    }

    /// Update the cached on/off state of one switch after a command.
    pub fn set_switch_state(&self, device_serial: &str, channel_code: i32, is_on: bool) {
        let key = switch_key(device_serial, channel_code);
        if let Some(mut entry) = self.switches.get_mut(&key) {
            let mut updated = (**entry.value()).clone();
            updated.is_on = is_on;
            *entry.value_mut() = Arc::new(updated);
        }
        self.rebuild_snapshot();
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn device(&self, serial: &str) -> Option<Arc<Device>> {
        self.devices.get(serial).map(|r| Arc::clone(r.value()))
    }

    pub fn devices(&self) -> Vec<Arc<Device>> {
        let mut all: Vec<Arc<Device>> =
            self.devices.iter().map(|r| Arc::clone(r.value())).collect();
        all.sort_by(|a, b| a.serial.cmp(&b.serial));
        all
    }

    pub fn switch(&self, device_serial: &str, channel_code: i32) -> Option<Arc<Switch>> {
        self.switches
            .get(&switch_key(device_serial, channel_code))
            .map(|r| Arc::clone(r.value()))
    }

    /// All switches on one device.
    pub fn switches_for(&self, device_serial: &str) -> Vec<Arc<Switch>> {
        let mut found: Vec<Arc<Switch>> = self
            .switches
            .iter()
            .filter(|r| r.value().device_serial == device_serial)
            .map(|r| Arc::clone(r.value()))
            .collect();
        found.sort_by_key(|s| s.kind.code());
        found
    }

    /// Current snapshot of every switch, sorted by key.
    pub fn snapshot(&self) -> Arc<Vec<Arc<Switch>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to switch snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<Switch>>>> {
        self.snapshot.subscribe()
    }

    /// When the last successful refresh completed, if any.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn rebuild_snapshot(&self) {
        let mut values: Vec<Arc<Switch>> =
            self.switches.iter().map(|r| Arc::clone(r.value())).collect();
        values.sort_by_key(|s| s.key());
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}

impl Default for SwitchStore {
    fn default() -> Self {
        Self::new()
    }
}
