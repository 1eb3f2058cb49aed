//! CLI-side configuration glue.
//!
//! Thin wrappers over `ezvy-config` that apply `GlobalOpts` overrides
//! (account selection, timeout) on top of the loaded config file.

use ezvy_config::{Config, ConfigError};
use ezvy_core::AccountConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use ezvy_config::{config_path, load_config_or_default, save_config};

/// Resolve the active account name: `--account` flag, then the config
/// file's `default_account`.
pub fn active_account_name(global: &GlobalOpts, cfg: &Config) -> Option<String> {
    global
        .account
        .clone()
        .or_else(|| cfg.default_account.clone())
}

/// Build an `AccountConfig` for the active account, with CLI overrides.
pub fn resolve_account_config(global: &GlobalOpts) -> Result<(String, AccountConfig), CliError> {
    let cfg = load_config_or_default();

    let (name, profile) =
        ezvy_config::select_account(&cfg, global.account.as_deref()).map_err(|err| match err {
            ConfigError::UnknownAccount { account } => {
                let mut available: Vec<_> = cfg.accounts.keys().cloned().collect();
                available.sort();
                CliError::AccountNotFound {
                    name: account,
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                }
            }
            other => other.into(),
        })?;

    let mut account_config =
        ezvy_config::profile_to_account_config(profile, &name, &cfg.defaults)?;

    if let Some(timeout) = global.timeout {
        account_config.timeout = std::time::Duration::from_secs(timeout);
    }

    Ok((name, account_config))
}
