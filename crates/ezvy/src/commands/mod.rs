//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod doorbell;
pub mod setup;
pub mod switches;
pub mod util;

use ezvy_core::Account;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    account: &Account,
    account_name: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(account, account_name, args, global),
        Command::Switches(args) => switches::handle(account, account_name, args, global).await,
        Command::Doorbell(args) => doorbell::handle(account, account_name, args, global).await,
        // Setup, Config, and Completions are handled before dispatch
        Command::Setup(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
