// ── Core error types ──
//
// User-facing errors from ezvy-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<ezvy_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the EZVIZ cloud: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Invalid account or password: {message}")]
    InvalidCredentials { message: String },

    #[error("Request to the EZVIZ cloud timed out")]
    Timeout,

    // ── Account errors ───────────────────────────────────────────────
    /// The account has MFA enabled. There is no code-entry flow; the
    /// user must disable MFA for this account to use it here.
    #[error("Multi-factor authentication is enabled on this account and is not supported")]
    MfaUnsupported,

    #[error("Not connected -- call connect() first")]
    NotConnected,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Device not found: {serial}")]
    DeviceNotFound { serial: String },

    #[error("Switch not found: {identifier}")]
    SwitchNotFound { identifier: String },

    /// The device exists but the cloud reports it offline (status 2).
    #[error("Device unavailable: {serial} is offline")]
    DeviceUnavailable { serial: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("EZVIZ API error: {message}")]
    Api { message: String, code: Option<i64> },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ezvy_api::Error> for CoreError {
    fn from(err: ezvy_api::Error) -> Self {
        match err {
            ezvy_api::Error::Authentication { message } => {
                CoreError::InvalidCredentials { message }
            }
            ezvy_api::Error::MfaRequired => CoreError::MfaUnsupported,
            ezvy_api::Error::SessionExpired => CoreError::InvalidCredentials {
                message: "session expired -- re-authentication required".into(),
            },
            ezvy_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                }
            }
            ezvy_api::Error::InvalidUrl(e) => CoreError::Internal(format!("invalid URL: {e}")),
            ezvy_api::Error::Api { code, message } => CoreError::Api {
                message,
                code: Some(code),
            },
            ezvy_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mfa_maps_to_unsupported() {
        let err = CoreError::from(ezvy_api::Error::MfaRequired);
        assert!(matches!(err, CoreError::MfaUnsupported));
    }

    #[test]
    fn bad_credentials_map_to_invalid_credentials() {
        let err = CoreError::from(ezvy_api::Error::Authentication {
            message: "account or password error".into(),
        });
        match err {
            CoreError::InvalidCredentials { message } => {
                assert!(message.contains("password"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
