//! Doorbell command handlers.

use chrono::{Duration, Utc};
use tabled::Tabled;

use ezvy_api::AlarmQuery;
use ezvy_core::{Account, DoorbellEvent};

use crate::cli::{DoorbellArgs, DoorbellCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Read")]
    read: String,
    #[tabled(rename = "Image")]
    image: String,
}

impl From<&DoorbellEvent> for EventRow {
    fn from(e: &DoorbellEvent) -> Self {
        Self {
            id: e.id.clone(),
            time: e
                .timestamp
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".into()),
            name: e.name.clone().unwrap_or_default(),
            read: if e.is_read { "yes" } else { "no" }.into(),
            image: if e.has_image { "yes" } else { "no" }.into(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    account: &Account,
    account_name: &str,
    args: DoorbellArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DoorbellCommand::Events {
            device,
            hours,
            limit,
        } => {
            let end = Utc::now();
            let query = AlarmQuery {
                start: Some(end - Duration::hours(i64::from(hours))),
                end: Some(end),
                page_size: Some(limit),
                page_start: 0,
            };
            let events = account
                .doorbell_events(&device, &query)
                .await
                .map_err(|e| CliError::from_core(e, account_name))?;

            let out =
                output::render_list(&global.output, &events, |e| EventRow::from(e), |e| e.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DoorbellCommand::Snapshot {
            device,
            event,
            file,
        } => {
            let image = account
                .visitor_image(&device, &event)
                .await
                .map_err(|e| CliError::from_core(e, account_name))?;

            let Some(bytes) = image else {
                return Err(CliError::NotFound {
                    resource_type: "snapshot".into(),
                    identifier: event,
                    list_command: format!("doorbell events {device}"),
                });
            };

            let path = file.unwrap_or_else(|| format!("{event}.jpg").into());
            std::fs::write(&path, bytes)?;
            if !global.quiet {
                eprintln!("✓ Snapshot saved to {}", path.display());
            }
            Ok(())
        }

        DoorbellCommand::MarkRead { device, event } => {
            account
                .mark_event_read(&device, &event)
                .await
                .map_err(|e| CliError::from_core(e, account_name))?;
            if !global.quiet {
                eprintln!("✓ Event {event} marked as read");
            }
            Ok(())
        }

        DoorbellCommand::OpenGate { device } => {
            // Opens a physical gate; always confirm unless --yes.
            if !util::confirm(&format!("Open the gate on {device}?"), global.yes)? {
                return Err(CliError::NonInteractiveRequiresYes {
                    action: "open-gate".into(),
                });
            }
            account
                .open_gate(&device)
                .await
                .map_err(|e| CliError::from_core(e, account_name))?;
            if !global.quiet {
                eprintln!("✓ Gate relay triggered on {device}");
            }
            Ok(())
        }
    }
}
