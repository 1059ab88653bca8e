//! Client-side OAuth2/OIDC Authorization Code flow with PKCE for the
//! YConnect v2 authorization server.
//!
//! The crate builds a deterministically-encoded authorization request URL,
//! hands it to a host-supplied [`UserAgent`], parses and validates the
//! redirect that comes back (including the `state` replay check), and
//! reports exactly one terminal result per attempt. Redirects the operating
//! system routes straight into the application are fed back through
//! [`LoginManager::resume`].
//!
//! # Usage
//! ```no_run
//! use std::sync::Arc;
//! use yconnect_login::{
//!     LoginConfiguration, LoginManager, PkceChallenge, Scope,
//! };
//!
//! # async fn run(user_agent: Arc<dyn yconnect_core::UserAgent>) {
//! let manager = LoginManager::new(user_agent);
//! manager.setup(LoginConfiguration::new(
//!     "client_id",
//!     url::Url::parse("myapp:/callback").unwrap(),
//! ));
//!
//! let pkce = PkceChallenge::new();
//! let result = manager
//!     .login(
//!         vec![Scope::OpenId, Scope::Profile],
//!         "nonce",
//!         pkce.code_challenge.clone(),
//!         None,
//!     )
//!     .await;
//! # let _ = result;
//! # }
//! ```
//!
//! Token exchange is out of scope: a successful login yields the
//! authorization code, never tokens.

mod config;
mod constants;
mod error;
mod manager;
mod pkce;
mod process;
mod query;
mod request;
mod response;


pub use config::LoginConfiguration;
pub use error::{
    ErrorDetail, LoginError, RequestFailedReason, ResponseFailedReason,
    UserInteractionRequiredReason,
};
pub use manager::LoginManager;
pub use pkce::PkceChallenge;
pub use process::AuthenticationProcess;
pub use request::{
    AuthorizationRequest, Display, OptionalParameters, Prompt, ResponseType, Scope,
};
pub use response::{LoginResult, parse_redirect};

// Re-export the capability traits so hosts depend on a single crate.
pub use yconnect_core::{
    NativeLinkOpener, RandomError, SecureRandom, SystemRandom, UserAgent, UserAgentError,
};
