//! Shared helpers for command handlers.

use std::sync::Arc;

use ezvy_core::{Account, Switch};

use crate::error::CliError;

/// Resolve a `--channel` value (name or numeric code) against the
/// channels a device actually exposes.
///
/// With no selector, a single-channel device resolves to that channel;
/// multiple channels produce an error listing the candidates instead
/// of guessing.
pub fn resolve_channel(
    account: &Account,
    device_serial: &str,
    selector: Option<&str>,
) -> Result<Arc<Switch>, CliError> {
    let switches = account.store().switches_for(device_serial);
    if switches.is_empty() {
        return Err(CliError::NotFound {
            resource_type: "switch".into(),
            identifier: device_serial.into(),
            list_command: "switches list".into(),
        });
    }

    let Some(selector) = selector else {
        if switches.len() == 1 {
            return Ok(Arc::clone(&switches[0]));
        }
        return Err(CliError::AmbiguousChannel {
            serial: device_serial.into(),
            count: switches.len(),
            available: channel_labels(&switches),
        });
    };

    let found = switches.iter().find(|s| {
        s.kind.label() == selector
            || selector
                .parse::<i32>()
                .is_ok_and(|code| s.kind.code() == code)
    });

    found.map(Arc::clone).ok_or_else(|| CliError::Validation {
        field: "channel".into(),
        reason: format!(
            "'{selector}' does not match a channel on {device_serial}. \
             Available: {}",
            channel_labels(&switches)
        ),
    })
}

fn channel_labels(switches: &[Arc<Switch>]) -> String {
    switches
        .iter()
        .map(|s| format!("{} ({})", s.kind.label(), s.kind.code()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Format an on/off state for table cells.
pub fn state_str(is_on: bool) -> &'static str {
    if is_on {
        "on"
    } else {
        "off"
    }
}

/// Format availability for table cells.
pub fn availability_str(is_available: bool) -> &'static str {
    if is_available {
        "online"
    } else {
        "offline"
    }
}
