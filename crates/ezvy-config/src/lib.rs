//! Shared configuration for the ezvy CLI.
//!
//! TOML account profiles, credential resolution (env + keyring +
//! plaintext), and translation to `ezvy_core::AccountConfig`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ezvy_core::{AccountConfig, ApiRegion};

/// Keyring service name for stored passwords.
const KEYRING_SERVICE: &str = "ezvy";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no account named '{account}' in the config -- run `ezvy setup` first")]
    UnknownAccount { account: String },

    #[error("no default account configured -- run `ezvy setup` or pass --account")]
    NoDefaultAccount,

    #[error("no password configured for account '{account}'")]
    NoPassword { account: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Account used when `--account` is not given.
    pub default_account: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles, keyed by a short label.
    #[serde(default)]
    pub accounts: HashMap<String, AccountProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_account: None,
            defaults: Defaults::default(),
            accounts: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    60
}

/// A named EZVIZ account profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountProfile {
    /// Account email address.
    pub email: String,

    /// Region: "eu", "ru", or a custom API hostname.
    #[serde(default = "default_region")]
    pub region: String,

    /// Password (plaintext -- prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override poll interval (seconds).
    pub poll_interval: Option<u64>,
}

fn default_region() -> String {
    "eu".into()
}

impl AccountProfile {
    /// Parse the region field into an [`ApiRegion`].
    pub fn api_region(&self) -> ApiRegion {
        parse_region(&self.region)
    }
}

/// Parse a region string: the two well-known shorthands, or anything
/// else as a custom API hostname.
pub fn parse_region(value: &str) -> ApiRegion {
    match value {
        "eu" | "europe" => ApiRegion::Europe,
        "ru" | "russia" => ApiRegion::Russia,
        host => ApiRegion::Custom(host.to_string()),
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path.
///
/// `EZVY_CONFIG_DIR` overrides the platform default; tests rely on
/// this for isolation.
pub fn config_path() -> PathBuf {
    if let Ok(dir) = std::env::var("EZVY_CONFIG_DIR") {
        return PathBuf::from(dir).join("config.toml");
    }
    ProjectDirs::from("com", "ezvy", "ezvy").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ezvy");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("EZVY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

/// Look up an account profile, falling back to the default account.
pub fn select_account<'a>(
    cfg: &'a Config,
    name: Option<&str>,
) -> Result<(String, &'a AccountProfile), ConfigError> {
    let name = match name {
        Some(n) => n.to_string(),
        None => cfg
            .default_account
            .clone()
            .ok_or(ConfigError::NoDefaultAccount)?,
    };
    let profile = cfg
        .accounts
        .get(&name)
        .ok_or_else(|| ConfigError::UnknownAccount {
            account: name.clone(),
        })?;
    Ok((name, profile))
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve an account password from the credential chain:
/// profile `password_env` var, then `EZVY_PASSWORD`, then the system
/// keyring, then plaintext in the config file.
pub fn resolve_password(
    profile: &AccountProfile,
    account_name: &str,
) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(val) = std::env::var("EZVY_PASSWORD") {
        return Ok(SecretString::from(val));
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(account_name)) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoPassword {
        account: account_name.into(),
    })
}

/// Store a password in the system keyring.
pub fn store_password(account_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(account_name))?;
    entry.set_password(password)?;
    Ok(())
}

/// Delete a stored password from the system keyring, if present.
pub fn delete_password(account_name: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(account_name))?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn keyring_user(account_name: &str) -> String {
    format!("{account_name}/password")
}

// ── Translation to core config ──────────────────────────────────────

/// Build an `AccountConfig` from a profile, resolving the password
/// through the credential chain.
pub fn profile_to_account_config(
    profile: &AccountProfile,
    account_name: &str,
    defaults: &Defaults,
) -> Result<AccountConfig, ConfigError> {
    let password = resolve_password(profile, account_name)?;

    Ok(AccountConfig {
        email: profile.email.clone(),
        password,
        region: profile.api_region(),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        poll_interval: Duration::from_secs(
            profile.poll_interval.unwrap_or(defaults.poll_interval),
        ),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn region_parsing() {
        assert_eq!(parse_region("eu"), ApiRegion::Europe);
        assert_eq!(parse_region("russia"), ApiRegion::Russia);
        assert_eq!(
            parse_region("api.example.org"),
            ApiRegion::Custom("api.example.org".into())
        );
    }

    #[test]
    fn select_account_prefers_explicit_name() {
        let mut cfg = Config::default();
        cfg.default_account = Some("home".into());
        cfg.accounts.insert(
            "home".into(),
            AccountProfile {
                email: "home@example.com".into(),
                region: "eu".into(),
                password: None,
                password_env: None,
                timeout: None,
                poll_interval: None,
            },
        );
        cfg.accounts.insert(
            "office".into(),
            AccountProfile {
                email: "office@example.com".into(),
                region: "ru".into(),
                password: None,
                password_env: None,
                timeout: None,
                poll_interval: None,
            },
        );

        let (name, profile) = select_account(&cfg, Some("office")).unwrap();
        assert_eq!(name, "office");
        assert_eq!(profile.email, "office@example.com");

        let (name, _) = select_account(&cfg, None).unwrap();
        assert_eq!(name, "home");
    }

    #[test]
    fn select_account_without_default_fails() {
        let cfg = Config::default();
        let result = select_account(&cfg, None);
        assert!(matches!(result, Err(ConfigError::NoDefaultAccount)));
    }

    #[test]
    fn plaintext_password_is_last_resort() {
        let profile = AccountProfile {
            email: "home@example.com".into(),
            region: "eu".into(),
            password: Some("plaintext-pw".into()),
            password_env: Some("EZVY_TEST_PW_THAT_IS_NOT_SET".into()),
            timeout: None,
            poll_interval: None,
        };

        // No env vars set, nothing in the keyring for this name.
        let secret = resolve_password(&profile, "test-acct-plaintext").unwrap();
        use secrecy::ExposeSecret;
        assert_eq!(secret.expose_secret(), "plaintext-pw");
    }

    #[test]
    fn save_and_load_use_config_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("EZVY_CONFIG_DIR", dir.path());

        let mut cfg = Config::default();
        cfg.default_account = Some("home".into());
        cfg.accounts.insert(
            "home".into(),
            AccountProfile {
                email: "home@example.com".into(),
                region: "ru".into(),
                password: None,
                password_env: None,
                timeout: None,
                poll_interval: None,
            },
        );
        save_config(&cfg).unwrap();

        assert!(dir.path().join("config.toml").exists());
        let loaded = load_config().unwrap();
        assert_eq!(loaded.default_account.as_deref(), Some("home"));
        assert_eq!(loaded.accounts["home"].region, "ru");

        std::env::remove_var("EZVY_CONFIG_DIR");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.default_account = Some("home".into());
        cfg.accounts.insert(
            "home".into(),
            AccountProfile {
                email: "home@example.com".into(),
                region: "eu".into(),
                password: None,
                password_env: None,
                timeout: Some(10),
                poll_interval: None,
            },
        );

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.default_account.as_deref(), Some("home"));
        assert_eq!(parsed.accounts["home"].timeout, Some(10));
    }
}
