// Core cloud client
//
// Holds the HTTP client, the regional base URL, and the current session
// tokens. Session state lives behind an `RwLock` so one client can be
// shared across tasks; tokens are applied as request headers on every
// authenticated call.

use std::sync::RwLock;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::models::{CloudResponse, SessionTokens};
use crate::error::Error;
use crate::region::ApiRegion;
use crate::transport::TransportConfig;

// Envelope codes with dedicated meanings. Everything else surfaces as
// `Error::Api { code, message }`.
const CODE_OK: i64 = 200;
const CODE_MFA_REQUIRED: i64 = 6002;
const CODES_BAD_CREDENTIALS: [i64; 3] = [1012, 1013, 1014];

/// Async client for the EZVIZ cloud API.
///
/// Construct with [`CloudClient::new`] and call
/// [`login`](CloudClient::login) before any authenticated endpoint, or
/// restore a persisted session with [`CloudClient::resume`].
#[derive(Debug)]
pub struct CloudClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: RwLock<Option<SessionTokens>>,
}

impl CloudClient {
    /// Create a client for the given region with no session.
    pub fn new(region: &ApiRegion, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url: region.base_url()?,
            tokens: RwLock::new(None),
        })
    }

    /// Create a client from previously saved session tokens, skipping
    /// the login round-trip. If the tokens have expired server-side the
    /// next request fails with [`Error::SessionExpired`].
    pub fn resume(
        region: &ApiRegion,
        transport: &TransportConfig,
        tokens: SessionTokens,
    ) -> Result<Self, Error> {
        let client = Self::new(region, transport)?;
        client.restore_session(tokens);
        Ok(client)
    }

    /// Create a client against an arbitrary base URL with a caller-built
    /// `reqwest::Client`. Used by integration tests to point at a mock
    /// server.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            tokens: RwLock::new(None),
        }
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// A copy of the current session tokens, if logged in.
    pub fn session_tokens(&self) -> Option<SessionTokens> {
        match self.tokens.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// `true` once a session has been established or resumed.
    pub fn is_authenticated(&self) -> bool {
        self.session_tokens().is_some()
    }

    /// Install session tokens on this client, e.g. ones loaded from a
    /// previous run. [`CloudClient::resume`] is the usual entry point.
    pub fn restore_session(&self, tokens: SessionTokens) {
        match self.tokens.write() {
            Ok(mut guard) => *guard = Some(tokens),
            Err(poisoned) => *poisoned.into_inner() = Some(tokens),
        }
    }

    /// Build an absolute URL for an API path.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    fn require_tokens(&self) -> Result<SessionTokens, Error> {
        self.session_tokens().ok_or(Error::Authentication {
            message: "login required".into(),
        })
    }

    /// POST `body` to `path` without session headers. Used by login.
    pub(crate) async fn post_anonymous<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!(%url, "POST (anonymous)");
        let response = self.http.post(url).json(body).send().await?;
        Self::parse_envelope(response).await
    }

    /// POST `body` to `path` with session headers, decoding `data` as `T`.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, Error> {
        let response = self.post_raw(path, body).await?;
        Self::parse_envelope(response).await
    }

    /// POST `body` to `path` with session headers, checking only the
    /// envelope `meta`. For command endpoints that answer with no data.
    pub(crate) async fn post_ok(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(), Error> {
        let response = self.post_raw(path, body).await?;
        Self::check_meta(response).await
    }

    /// POST with session headers, returning the raw response. For the
    /// rare endpoint (visitor snapshots) that answers with binary data.
    pub(crate) async fn post_raw(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, Error> {
        let tokens = self.require_tokens()?;
        let url = self.api_url(path)?;
        debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .header("sessionId", &tokens.session_id)
            .header("rfSessionId", &tokens.rf_session_id)
            .json(body)
            .send()
            .await?;
        Ok(response)
    }

    /// Decode a response into the `{ meta, data }` envelope, mapping
    /// HTTP-level and envelope-level failures onto `Error`.
    pub(crate) async fn parse_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, Error> {
        let body = Self::read_body(response).await?;
        let envelope: CloudResponse<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: preview(&body),
            })?;

        match meta_to_error(envelope.meta) {
            None => envelope.data.ok_or_else(|| Error::Deserialization {
                message: "envelope reported success but carried no data".into(),
                body: preview(&body),
            }),
            Some(err) => Err(err),
        }
    }

    /// Check the envelope `meta` of a response, ignoring any `data`.
    pub(crate) async fn check_meta(response: reqwest::Response) -> Result<(), Error> {
        let body = Self::read_body(response).await?;
        let envelope: CloudResponse<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: preview(&body),
            })?;

        match meta_to_error(envelope.meta) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    async fn read_body(response: reqwest::Response) -> Result<String, Error> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                code: i64::from(status.as_u16()),
                message: preview(&body),
            });
        }
        Ok(body)
    }
}

/// Map an envelope `meta` onto an error, or `None` on success.
fn meta_to_error(meta: super::models::Meta) -> Option<Error> {
    match meta.code {
        CODE_OK => None,
        CODE_MFA_REQUIRED => Some(Error::MfaRequired),
        code if CODES_BAD_CREDENTIALS.contains(&code) => Some(Error::Authentication {
            message: meta
                .message
                .unwrap_or_else(|| "invalid account or password".into()),
        }),
        code => Some(Error::Api {
            code,
            message: meta.message.unwrap_or_default(),
        }),
    }
}

/// Truncate a response body for inclusion in error messages.
fn preview(body: &str) -> String {
    const MAX: usize = 512;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    }
}
