//! Account setup wizard.
//!
//! Collects {email, password, region}, validates them with a real
//! login, and persists the account profile exactly once -- only after
//! validation succeeds. Flags (`--email`, `--region`, `--api-host`)
//! skip the corresponding prompts for scripted use.

use dialoguer::{Input, Select};
use secrecy::SecretString;

use ezvy_core::{Account, AccountConfig};

use crate::cli::{GlobalOpts, SetupArgs};
use crate::config;
use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_email() -> Result<String, CliError> {
    let email: String = Input::new()
        .with_prompt("Account email")
        .interact_text()
        .map_err(prompt_err)?;
    if !email.contains('@') {
        return Err(CliError::Validation {
            field: "email".into(),
            reason: "expected an email address".into(),
        });
    }
    Ok(email)
}

fn prompt_region() -> Result<String, CliError> {
    let choices = &[
        "Europe (apiieu.ezvizlife.com)",
        "Russia (apirus.ezvizru.com)",
        "Custom API host",
    ];
    let selection = Select::new()
        .with_prompt("Account region")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    match selection {
        0 => Ok("eu".into()),
        1 => Ok("ru".into()),
        _ => {
            let host: String = Input::new()
                .with_prompt("API hostname")
                .interact_text()
                .map_err(prompt_err)?;
            if host.is_empty() {
                return Err(CliError::Validation {
                    field: "api-host".into(),
                    reason: "hostname cannot be empty".into(),
                });
            }
            Ok(host)
        }
    }
}

/// Resolve the password: `EZVY_PASSWORD` if set, otherwise a hidden
/// prompt. Returns the plaintext and whether it came from the env.
fn resolve_password(interactive: bool) -> Result<(String, bool), CliError> {
    if let Ok(pw) = std::env::var("EZVY_PASSWORD") {
        if !pw.is_empty() {
            return Ok((pw, true));
        }
    }
    if !interactive {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "set EZVY_PASSWORD when using --email for non-interactive setup".into(),
        });
    }
    let pw = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
    if pw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok((pw, false))
}

/// Offer to store the password in the system keyring or in the config
/// file. Returns `Some(password)` for plaintext, `None` if stored in
/// the keyring.
fn prompt_password_storage(
    account_name: &str,
    password: &str,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        ezvy_config::store_password(account_name, password)?;
        eprintln!("   ✓ Password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(password.to_owned()))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: SetupArgs, _global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_path();
    // Flags put the wizard in scripted mode: no prompts at all.
    let interactive = args.email.is_none();

    if interactive {
        eprintln!("✨ ezvy — account setup");
        eprintln!("   Config path: {}\n", config_path.display());
    }

    // 1. Email
    let email = match args.email {
        Some(email) => email,
        None => prompt_email()?,
    };

    // 2. Region
    let region = if let Some(host) = args.api_host {
        host
    } else if let Some(choice) = args.region {
        choice.as_str().to_string()
    } else if interactive {
        prompt_region()?
    } else {
        "eu".into()
    };

    // 3. Password
    let (password, from_env) = resolve_password(interactive)?;

    // 4. Validate with a real login before persisting anything.
    if args.no_verify {
        eprintln!("⚠ Skipping login validation (--no-verify)");
    } else {
        let account_config = AccountConfig::new(
            email.clone(),
            SecretString::from(password.clone()),
            ezvy_config::parse_region(&region),
        );
        let account =
            Account::new(account_config).map_err(|e| CliError::from_core(e, &args.name))?;
        account
            .connect()
            .await
            .map_err(|e| CliError::from_core(e, &args.name))?;

        let devices = account.devices();
        let switches = account.store().switch_count();
        eprintln!(
            "✓ Logged in: {} device(s), {} switch channel(s) found",
            devices.len(),
            switches
        );
    }

    // 5. Decide where the password lives.
    let password_field = if from_env {
        // Came from EZVY_PASSWORD; leave the profile without one so the
        // env chain keeps resolving it.
        None
    } else {
        prompt_password_storage(&args.name, &password)?
    };

    // 6. Persist the profile -- one write, after validation.
    let mut cfg = config::load_config_or_default();
    cfg.accounts.insert(
        args.name.clone(),
        ezvy_config::AccountProfile {
            email,
            region,
            password: password_field,
            password_env: None,
            timeout: None,
            poll_interval: None,
        },
    );
    if cfg.default_account.is_none() {
        cfg.default_account = Some(args.name.clone());
    }
    config::save_config(&cfg)?;

    eprintln!("\n✓ Account '{}' written to {}", args.name, config_path.display());
    eprintln!("  Try it: ezvy devices list");

    Ok(())
}
