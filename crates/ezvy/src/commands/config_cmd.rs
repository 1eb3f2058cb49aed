//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use ezvy_config::Config;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_account {
        let _ = writeln!(out, "default_account = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "poll_interval = {}", cfg.defaults.poll_interval);

    let mut names: Vec<_> = cfg.accounts.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.accounts[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[accounts.{name}]");
        let _ = writeln!(out, "email = \"{}\"", p.email);
        let _ = writeln!(out, "region = \"{}\"", p.region);
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(poll) = p.poll_interval {
            let _ = writeln!(out, "poll_interval = {poll}");
        }
    }

    out
}

fn unknown_account(cfg: &Config, name: String) -> CliError {
    let mut available: Vec<_> = cfg.accounts.keys().cloned().collect();
    available.sort();
    CliError::AccountNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Accounts ────────────────────────────────────────────────
        ConfigCommand::Accounts => {
            let cfg = config::load_config_or_default();
            if cfg.accounts.is_empty() {
                eprintln!("No accounts configured. Run: ezvy setup");
            } else {
                let default = cfg.default_account.as_deref().unwrap_or_default();
                let mut names: Vec<_> = cfg.accounts.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.accounts.contains_key(&name) {
                return Err(unknown_account(&cfg, name));
            }
            cfg.default_account = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default account set to '{name}'");
            Ok(())
        }

        // ── Remove <name> ──────────────────────────────────────────
        ConfigCommand::Remove { name } => {
            let mut cfg = config::load_config_or_default();
            if cfg.accounts.remove(&name).is_none() {
                return Err(unknown_account(&cfg, name));
            }
            if cfg.default_account.as_deref() == Some(name.as_str()) {
                cfg.default_account = None;
            }
            config::save_config(&cfg)?;
            // Also drop any keyring entry so no secret is orphaned.
            ezvy_config::delete_password(&name)?;
            eprintln!("✓ Account '{name}' removed");
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { account } => {
            let cfg = config::load_config_or_default();
            let name = account
                .or_else(|| config::active_account_name(global, &cfg))
                .ok_or_else(|| CliError::NoConfig {
                    path: config::config_path().display().to_string(),
                })?;

            if !cfg.accounts.contains_key(&name) {
                return Err(unknown_account(&cfg, name));
            }

            let secret = rpassword::prompt_password("Password: ").map_err(|e| {
                CliError::Validation {
                    field: "interactive".into(),
                    reason: format!("prompt failed: {e}"),
                }
            })?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            ezvy_config::store_password(&name, &secret)?;
            eprintln!("✓ Password stored in system keyring for account '{name}'");
            Ok(())
        }
    }
}
