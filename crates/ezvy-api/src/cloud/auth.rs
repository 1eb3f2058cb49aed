// Authentication endpoint

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::info;

use super::client::CloudClient;
use super::models::SessionTokens;
use crate::error::Error;

// App identifier the login endpoint expects. Logins without it are
// rejected as coming from an unknown client.
const FEATURE_CODE: &str = "92c579faa0902cbfcfcc4fc004ef67e7";

impl CloudClient {
    /// Log in with an account email and password.
    ///
    /// On success the returned tokens are also stored on the client, so
    /// subsequent calls are authenticated. Fails with
    /// [`Error::Authentication`] on bad credentials and
    /// [`Error::MfaRequired`] when the account has multi-factor
    /// authentication enabled.
    pub async fn login(
        &self,
        account: &str,
        password: &SecretString,
    ) -> Result<SessionTokens, Error> {
        let body = json!({
            "account": account,
            "password": password.expose_secret(),
            "featureCode": FEATURE_CODE,
        });

        let tokens: SessionTokens = self.post_anonymous("v3/users/login/v5", &body).await?;
        info!(account, "logged in to EZVIZ cloud");
        self.restore_session(tokens.clone());
        Ok(tokens)
    }
}
