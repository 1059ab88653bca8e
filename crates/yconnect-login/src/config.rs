//! Client configuration.

use crate::constants::{DEFAULT_ISSUER, ISSUER_HOST_SUFFIX, ISSUER_PATH};
use serde::{Deserialize, Serialize};
use url::Url;

/// Static client settings registered through
/// [`LoginManager::setup`](crate::LoginManager::setup).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginConfiguration {
    /// Client ID issued when the application was registered.
    pub client_id: String,

    /// Full URL or custom URI scheme registered for the application.
    pub redirect_uri: Url,

    /// Authorization server base. Defaults to the production issuer.
    pub issuer: Url,

    /// Probe an installed companion app over universal links before
    /// presenting a browser, and tolerate one overlapping login attempt
    /// while that handshake is pending.
    pub universal_links: bool,
}

impl LoginConfiguration {
    pub fn new(client_id: impl Into<String>, redirect_uri: Url) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri,
            issuer: Url::parse(DEFAULT_ISSUER).expect("default issuer is a valid URL"),
            universal_links: false,
        }
    }

    pub fn with_universal_links(mut self, enabled: bool) -> Self {
        self.universal_links = enabled;
        self
    }

    /// Replace the issuer.
    ///
    /// # Panics
    ///
    /// The issuer must stay on the service domain and keep the fixed base
    /// path. Anything else is a programming error, not a runtime condition,
    /// and panics.
    pub fn set_issuer(&mut self, issuer: Url) {
        assert!(
            is_valid_issuer(&issuer),
            "issuer must be a host under {ISSUER_HOST_SUFFIX} with path {ISSUER_PATH}, got {issuer}"
        );
        self.issuer = issuer;
    }
}

fn is_valid_issuer(issuer: &Url) -> bool {
    issuer
        .host_str()
        .is_some_and(|host| host.ends_with(ISSUER_HOST_SUFFIX))
        && issuer.path() == ISSUER_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration() -> LoginConfiguration {
        LoginConfiguration::new("client_id", Url::parse("scheme:/").unwrap())
    }

    #[test]
    fn defaults_to_the_production_issuer() {
        let config = configuration();
        assert_eq!(config.issuer.as_str(), DEFAULT_ISSUER);
        assert!(!config.universal_links);
    }

    #[test]
    fn accepts_an_issuer_on_the_service_domain() {
        let mut config = configuration();
        let issuer = Url::parse("https://stg.auth.login.yahoo.co.jp/yconnect/v2").unwrap();
        config.set_issuer(issuer.clone());
        assert_eq!(config.issuer, issuer);
    }

    #[test]
    #[should_panic(expected = "issuer must be")]
    fn rejects_an_issuer_off_the_service_domain() {
        configuration().set_issuer(Url::parse("https://auth.example.com/yconnect/v2").unwrap());
    }

    #[test]
    #[should_panic(expected = "issuer must be")]
    fn rejects_an_issuer_with_the_wrong_path() {
        configuration()
            .set_issuer(Url::parse("https://auth.login.yahoo.co.jp/yconnect/v1").unwrap());
    }

    #[test]
    fn serde_round_trip() {
        let config = configuration().with_universal_links(true);
        let json = serde_json::to_string(&config).unwrap();
        let back: LoginConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(back.client_id, config.client_id);
        assert_eq!(back.issuer, config.issuer);
        assert!(back.universal_links);
    }
}
