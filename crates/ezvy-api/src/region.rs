// EZVIZ cloud regions
//
// The cloud API is served from region-specific hosts. Accounts are bound
// to the region they were registered in; logging in against the wrong
// host fails with an API error, not a redirect.

use url::Url;

use crate::error::Error;

/// Which regional API endpoint to talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRegion {
    /// European accounts -- `apiieu.ezvizlife.com`.
    Europe,
    /// Russian accounts -- `apirus.ezvizru.com`.
    Russia,
    /// A custom API host (self-hosted relay or another regional server).
    Custom(String),
}

impl ApiRegion {
    /// The bare API hostname for this region.
    pub fn host(&self) -> &str {
        match self {
            Self::Europe => "apiieu.ezvizlife.com",
            Self::Russia => "apirus.ezvizru.com",
            Self::Custom(host) => host,
        }
    }

    /// The HTTPS base URL for this region.
    pub fn base_url(&self) -> Result<Url, Error> {
        Ok(Url::parse(&format!("https://{}", self.host()))?)
    }
}

impl std::fmt::Display for ApiRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Europe => write!(f, "eu"),
            Self::Russia => write!(f, "ru"),
            Self::Custom(host) => write!(f, "{host}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn region_hosts() {
        assert_eq!(ApiRegion::Europe.host(), "apiieu.ezvizlife.com");
        assert_eq!(ApiRegion::Russia.host(), "apirus.ezvizru.com");
        assert_eq!(ApiRegion::Custom("example.org".into()).host(), "example.org");
    }

    #[test]
    fn base_url_is_https() {
        let url = ApiRegion::Europe.base_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("apiieu.ezvizlife.com"));
    }
}
