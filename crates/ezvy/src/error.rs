//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ezvy_config::ConfigError;
use ezvy_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the EZVIZ cloud")]
    #[diagnostic(
        code(ezvy::connection_failed),
        help(
            "Check your network connection and the account's region.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(ezvy::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed for account '{account}'")]
    #[diagnostic(
        code(ezvy::auth_failed),
        help(
            "Verify the email, password, and region.\n\
             Update the stored password with: ezvy config set-password --account {account}"
        )
    )]
    AuthFailed { account: String, message: String },

    #[error("Account '{account}' has multi-factor authentication enabled")]
    #[diagnostic(
        code(ezvy::mfa_unsupported),
        help(
            "MFA logins are not supported. Disable MFA for this account \
             in the EZVIZ app to use it here."
        )
    )]
    MfaUnsupported { account: String },

    #[error("No password configured for account '{account}'")]
    #[diagnostic(
        code(ezvy::no_password),
        help(
            "Store one with: ezvy config set-password --account {account}\n\
             Or set the EZVY_PASSWORD environment variable."
        )
    )]
    NoPassword { account: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(ezvy::not_found),
        help("Run: ezvy {list_command} to see what's available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Device '{serial}' is offline")]
    #[diagnostic(
        code(ezvy::device_unavailable),
        help("The cloud reports this device as unreachable. Check its power and network.")
    )]
    DeviceUnavailable { serial: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("EZVIZ API error: {message}")]
    #[diagnostic(code(ezvy::api_error))]
    ApiError { message: String, code: Option<i64> },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ezvy::validation))]
    Validation { field: String, reason: String },

    /// More than one channel matched and none was selected.
    #[error("Device '{serial}' has {count} switch channels -- pick one with --channel")]
    #[diagnostic(
        code(ezvy::ambiguous_channel),
        help("Available channels: {available}")
    )]
    AmbiguousChannel {
        serial: String,
        count: usize,
        available: String,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Account '{name}' not found in configuration")]
    #[diagnostic(
        code(ezvy::account_not_found),
        help(
            "Available accounts: {available}\n\
             Add one with: ezvy setup"
        )
    )]
    AccountNotFound { name: String, available: String },

    #[error("No account configured")]
    #[diagnostic(
        code(ezvy::no_config),
        help(
            "Run: ezvy setup\n\
             Config expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(ezvy::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(ezvy::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoPassword { .. } => exit_code::AUTH,
            Self::MfaUnsupported { .. } => exit_code::UNSUPPORTED,
            Self::NotFound { .. } | Self::AccountNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::AmbiguousChannel { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a `CoreError`, attaching the active account name to
    /// auth-related variants.
    pub fn from_core(err: CoreError, account: &str) -> Self {
        match err {
            CoreError::ConnectionFailed { reason } => Self::ConnectionFailed { reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::InvalidCredentials { message } => Self::AuthFailed {
                account: account.to_string(),
                message,
            },
            CoreError::MfaUnsupported => Self::MfaUnsupported {
                account: account.to_string(),
            },
            CoreError::NotConnected => Self::ApiError {
                message: "not connected".into(),
                code: None,
            },
            CoreError::DeviceNotFound { serial } => Self::NotFound {
                resource_type: "device".into(),
                identifier: serial,
                list_command: "devices list".into(),
            },
            CoreError::SwitchNotFound { identifier } => Self::NotFound {
                resource_type: "switch".into(),
                identifier,
                list_command: "switches list".into(),
            },
            CoreError::DeviceUnavailable { serial } => Self::DeviceUnavailable { serial },
            CoreError::Api { message, code } => Self::ApiError { message, code },
            CoreError::Internal(message) => Self::ApiError {
                message,
                code: None,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownAccount { account } => Self::AccountNotFound {
                name: account,
                available: String::new(),
            },
            ConfigError::NoDefaultAccount => Self::NoConfig {
                path: ezvy_config::config_path().display().to_string(),
            },
            ConfigError::NoPassword { account } => Self::NoPassword { account },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
