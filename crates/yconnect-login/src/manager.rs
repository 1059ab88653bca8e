//! Process-wide login coordination.

use crate::config::LoginConfiguration;
use crate::constants::STATE_BYTES;
use crate::error::LoginError;
use crate::process::AuthenticationProcess;
use crate::request::{AuthorizationRequest, OptionalParameters, ResponseType, Scope};
use crate::response::LoginResult;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;
use yconnect_core::{NativeLinkOpener, SecureRandom, SystemRandom, UserAgent, base64url};

/// Coordinates login attempts for one client configuration.
///
/// At most one attempt is in flight at a time: a `login` call while another
/// attempt is pending fails immediately with [`LoginError::Authenticating`],
/// with no queueing. When universal links are enabled a second concurrent
/// attempt is tolerated, because the platform guarantees at most one
/// app-side redirect target; the first attempt keeps running.
///
/// The manager is caller-owned. Applications wanting a process-wide
/// singleton can park one instance at their composition root.
pub struct LoginManager {
    user_agent: Arc<dyn UserAgent>,
    random: Arc<dyn SecureRandom>,
    link_opener: Option<Arc<dyn NativeLinkOpener>>,
    configuration: Mutex<Option<LoginConfiguration>>,
    in_flight: Mutex<Option<Arc<AuthenticationProcess>>>,
}

impl LoginManager {
    /// Create a manager presenting through `user_agent`, with the operating
    /// system CSPRNG as its state source.
    pub fn new(user_agent: Arc<dyn UserAgent>) -> Self {
        Self {
            user_agent,
            random: Arc::new(SystemRandom),
            link_opener: None,
            configuration: Mutex::new(None),
            in_flight: Mutex::new(None),
        }
    }

    /// Replace the random source used to mint `state` values.
    pub fn with_secure_random(mut self, random: Arc<dyn SecureRandom>) -> Self {
        self.random = random;
        self
    }

    /// Install the opener used for universal-link probing. Only consulted
    /// when the configuration enables universal links.
    pub fn with_link_opener(mut self, opener: Arc<dyn NativeLinkOpener>) -> Self {
        self.link_opener = Some(opener);
        self
    }

    /// Register the client configuration. Must run before the first `login`.
    pub fn setup(&self, configuration: LoginConfiguration) {
        *self.configuration.lock() = Some(configuration);
    }

    /// Replace the issuer on the registered configuration.
    ///
    /// # Panics
    ///
    /// Panics when `setup` has not run, or when the issuer fails the
    /// service-domain validation.
    pub fn set_issuer(&self, issuer: Url) {
        let mut guard = self.configuration.lock();
        let configuration = guard
            .as_mut()
            .expect("call LoginManager::setup before set_issuer");
        configuration.set_issuer(issuer);
    }

    /// Run one login attempt and return its single terminal result.
    ///
    /// `scopes` must include [`Scope::OpenId`]; the server rejects requests
    /// without it. `nonce` guards against replay of the ID token eventually
    /// derived from the code, `code_challenge` is the PKCE S256 challenge
    /// (see [`PkceChallenge`](crate::PkceChallenge)).
    ///
    /// # Panics
    ///
    /// Panics when `setup` has not run.
    pub async fn login(
        &self,
        scopes: Vec<Scope>,
        nonce: impl Into<String>,
        code_challenge: impl Into<String>,
        optional_parameters: Option<OptionalParameters>,
    ) -> Result<LoginResult, LoginError> {
        let configuration = self.current_configuration();
        let mut process = AuthenticationProcess::new(Arc::clone(&self.user_agent));
        if configuration.universal_links {
            if let Some(opener) = &self.link_opener {
                process = process.with_link_opener(Arc::clone(opener));
            }
        }
        self.login_with_process(
            scopes,
            nonce.into(),
            code_challenge.into(),
            optional_parameters,
            Arc::new(process),
        )
        .await
    }

    pub(crate) async fn login_with_process(
        &self,
        scopes: Vec<Scope>,
        nonce: String,
        code_challenge: String,
        optional_parameters: Option<OptionalParameters>,
        process: Arc<AuthenticationProcess>,
    ) -> Result<LoginResult, LoginError> {
        let configuration = self.current_configuration();

        {
            let mut slot = self.in_flight.lock();
            if slot.is_some() && !configuration.universal_links {
                debug!("rejecting login, another attempt is in flight");
                return Err(LoginError::Authenticating);
            }
            *slot = Some(Arc::clone(&process));
        }

        // State generation failure degrades to a state-less request; the
        // response validator then requires the server to echo no state.
        let state = match self.random.generate(STATE_BYTES) {
            Ok(bytes) => Some(base64url(&bytes)),
            Err(err) => {
                warn!(error = %err, "state generation failed, proceeding without state");
                None
            }
        };

        let request = AuthorizationRequest {
            client_id: configuration.client_id.clone(),
            code_challenge,
            nonce,
            redirect_uri: configuration.redirect_uri.clone(),
            response_type: ResponseType::Code,
            scopes,
            state,
            optional_parameters,
            issuer: configuration.issuer.clone(),
        };

        info!(client_id = %request.client_id, "starting login attempt");
        let result = process.start(request).await;

        // Clear the slot before surfacing the result so the caller can chain
        // a new login from its continuation. Identity-checked: under
        // universal links a second attempt may have replaced this one.
        {
            let mut slot = self.in_flight.lock();
            if slot
                .as_ref()
                .is_some_and(|current| Arc::ptr_eq(current, &process))
            {
                *slot = None;
            }
        }

        match &result {
            Ok(_) => info!("login attempt succeeded"),
            Err(err) => info!(error = %err, "login attempt failed"),
        }
        result
    }

    /// Route an externally delivered URL into the pending attempt.
    ///
    /// Safe to call from any thread, including while `login` is still
    /// suspended. Returns `false` when no attempt is pending or the URL does
    /// not target the registered redirect URI.
    pub fn resume(&self, url: &Url) -> bool {
        let process = {
            let guard = self.in_flight.lock();
            match guard.as_ref() {
                Some(process) => Arc::clone(process),
                None => return false,
            }
        };
        process.resume(url)
    }

    fn current_configuration(&self) -> LoginConfiguration {
        self.configuration
            .lock()
            .clone()
            .expect("call LoginManager::setup before login")
    }
}
