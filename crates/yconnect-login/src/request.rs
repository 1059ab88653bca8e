//! Authorization request descriptor and its URL derivation.

use crate::constants::{AUTHORIZATION_PATH, NATIVE_AUTHORIZATION_PATH};
use crate::query;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use url::Url;

/// Parameter set the authorization response is asked to carry. Only the
/// Authorization Code flow is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Code,
}

impl ResponseType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseType::Code => "code",
        }
    }
}

/// Attribute scopes requestable from the userinfo endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Postal address.
    Address,
    /// Mail address.
    Email,
    /// User identifier. Required for every login request.
    #[serde(rename = "openid")]
    OpenId,
    /// Name, gender, and the remaining profile attributes.
    Profile,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Address => "address",
            Scope::Email => "email",
            Scope::OpenId => "openid",
            Scope::Profile => "profile",
        }
    }
}

/// Page variant shown on the login and consent screens. The server default
/// is `page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Display {
    /// Native-app embedded page.
    Inapp,
    /// Whatever fits the presenting user agent.
    Page,
    /// Popup page.
    Popup,
    /// Smartphone page.
    Touch,
}

impl Display {
    pub fn as_str(self) -> &'static str {
        match self {
            Display::Inapp => "inapp",
            Display::Page => "page",
            Display::Popup => "popup",
            Display::Touch => "touch",
        }
    }
}

/// Action to force on the user during authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    /// Ask for consent again.
    Consent,
    /// Ask for re-authentication.
    Login,
    /// Show no screen at all.
    None,
    /// Force account switching.
    SelectAccount,
}

impl Prompt {
    pub fn as_str(self) -> &'static str {
        match self {
            Prompt::Consent => "consent",
            Prompt::Login => "login",
            Prompt::None => "none",
            Prompt::SelectAccount => "select_account",
        }
    }
}

/// Optional authorization request parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionalParameters {
    /// When declining consent, return to the redirect URI without a code
    /// instead of the portal top page.
    pub bail: Option<bool>,

    /// Page variant for the login and consent screens.
    pub display: Option<Display>,

    /// Maximum seconds since the last authentication before the server
    /// forces a re-authentication.
    pub max_age: Option<u64>,

    /// Actions to force on the user; space-joined on the wire.
    pub prompts: Vec<Prompt>,

    /// Forward-compatible parameters. Merged last: a key here overrides any
    /// named field that serializes to the same parameter.
    pub additional_parameters: Option<HashMap<String, String>>,
}

impl OptionalParameters {
    pub(crate) fn parameters(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if self.bail == Some(true) {
            params.insert("bail".to_string(), "1".to_string());
        }
        if let Some(display) = self.display {
            params.insert("display".to_string(), display.as_str().to_string());
        }
        if let Some(max_age) = self.max_age {
            params.insert("max_age".to_string(), max_age.to_string());
        }
        if !self.prompts.is_empty() {
            let joined = self
                .prompts
                .iter()
                .map(|prompt| prompt.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            params.insert("prompt".to_string(), joined);
        }
        if let Some(additional) = &self.additional_parameters {
            for (key, value) in additional {
                params.insert(key.clone(), value.clone());
            }
        }
        params
    }
}

/// Immutable descriptor for one authorization attempt.
///
/// URL derivation is pure: the same descriptor always yields byte-identical
/// URLs, with query parameters in byte-wise ascending key order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub code_challenge: String,
    pub nonce: String,
    pub redirect_uri: Url,
    pub response_type: ResponseType,
    pub scopes: Vec<Scope>,
    pub state: Option<String>,
    pub optional_parameters: Option<OptionalParameters>,
    pub issuer: Url,
}

impl AuthorizationRequest {
    /// URL of the standard authorization endpoint.
    pub fn request_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint_url(AUTHORIZATION_PATH)
    }

    /// URL variant handed to an installed companion app during the
    /// universal-link probe.
    pub fn native_request_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint_url(NATIVE_AUTHORIZATION_PATH)
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, url::ParseError> {
        let mut params: BTreeMap<String, String> = BTreeMap::new();
        params.insert("client_id".to_string(), self.client_id.clone());
        params.insert("nonce".to_string(), self.nonce.clone());
        params.insert("redirect_uri".to_string(), self.redirect_uri.to_string());
        params.insert(
            "response_type".to_string(),
            self.response_type.as_str().to_string(),
        );
        params.insert(
            "scope".to_string(),
            self.scopes
                .iter()
                .map(|scope| scope.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        );
        params.insert("code_challenge".to_string(), self.code_challenge.clone());
        params.insert("code_challenge_method".to_string(), "S256".to_string());

        if let Some(state) = &self.state {
            params.insert("state".to_string(), state.clone());
        }

        // Optional parameters override the base set, and the open-ended map
        // inside them overrides the named optional fields in turn.
        if let Some(optional) = &self.optional_parameters {
            for (key, value) in optional.parameters() {
                params.insert(key, value);
            }
        }

        let mut url = Url::parse(&format!("{}{}", self.issuer, path))?;
        url.set_query(Some(&query::encode(&params)));
        Ok(url)
    }
}
