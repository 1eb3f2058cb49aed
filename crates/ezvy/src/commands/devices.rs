//! Device command handlers.

use std::sync::Arc;

use tabled::Tabled;

use ezvy_core::{Account, Device};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
    #[tabled(rename = "State")]
    state: String,
}

impl From<&Arc<Device>> for DeviceRow {
    fn from(d: &Arc<Device>) -> Self {
        Self {
            serial: d.serial.clone(),
            name: d.name.clone(),
            model: d.model.clone().unwrap_or_default(),
            firmware: d.firmware.clone().unwrap_or_default(),
            state: util::availability_str(d.is_available()).into(),
        }
    }
}

fn detail(d: &Arc<Device>) -> String {
    [
        format!("Serial:    {}", d.serial),
        format!("Name:      {}", d.name),
        format!("Model:     {}", d.model.as_deref().unwrap_or("-")),
        format!("Firmware:  {}", d.firmware.as_deref().unwrap_or("-")),
        format!("State:     {}", util::availability_str(d.is_available())),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    account: &Account,
    account_name: &str,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let devices = account.devices();
            let out = output::render_list(
                &global.output,
                &devices,
                |d| DeviceRow::from(d),
                |d| d.serial.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { serial } => {
            let device = account
                .device(&serial)
                .map_err(|e| CliError::from_core(e, account_name))?;
            let out =
                output::render_single(&global.output, &device, detail, |d| d.serial.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
