//! Switch command handlers.

use std::sync::Arc;

use tabled::Tabled;

use ezvy_core::{Account, Switch};

use crate::cli::{GlobalOpts, SwitchesArgs, SwitchesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SwitchRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Code")]
    code: i32,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Availability")]
    availability: String,
}

impl From<&Arc<Switch>> for SwitchRow {
    fn from(s: &Arc<Switch>) -> Self {
        Self {
            device: s.device_name.clone(),
            serial: s.device_serial.clone(),
            channel: s.kind.label(),
            code: s.kind.code(),
            state: util::state_str(s.is_on).into(),
            availability: util::availability_str(s.is_available).into(),
        }
    }
}

fn print_switches(switches: &[Arc<Switch>], global: &GlobalOpts) {
    let out = output::render_list(&global.output, switches, |s| SwitchRow::from(s), |s| s.key());
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    account: &Account,
    account_name: &str,
    args: SwitchesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SwitchesCommand::List { device } => {
            let switches = match device {
                Some(serial) => account.store().switches_for(&serial),
                None => account.switches().as_ref().clone(),
            };
            print_switches(&switches, global);
            Ok(())
        }

        SwitchesCommand::Status { device } => {
            // Validates the serial so a typo reports not-found instead
            // of an empty table.
            account
                .device(&device)
                .map_err(|e| CliError::from_core(e, account_name))?;
            let switches = account.store().switches_for(&device);
            print_switches(&switches, global);
            Ok(())
        }

        SwitchesCommand::On { device, channel } => {
            let switch = util::resolve_channel(account, &device, channel.as_deref())?;
            account
                .turn_on(&device, switch.kind.code())
                .await
                .map_err(|e| CliError::from_core(e, account_name))?;
            if !global.quiet {
                eprintln!("✓ {} turned on", switch.display_name());
            }
            Ok(())
        }

        SwitchesCommand::Off { device, channel } => {
            let switch = util::resolve_channel(account, &device, channel.as_deref())?;
            account
                .turn_off(&device, switch.kind.code())
                .await
                .map_err(|e| CliError::from_core(e, account_name))?;
            if !global.quiet {
                eprintln!("✓ {} turned off", switch.display_name());
            }
            Ok(())
        }
    }
}
