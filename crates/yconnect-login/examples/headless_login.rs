//! Example driving a complete login attempt with a scripted user agent.
//!
//! A real application would plug in a web-authentication popup or in-app
//! browser here; the scripted agent stands in for the user approving the
//! request, so the example runs headless:
//! 1. Configure the manager
//! 2. Mint a PKCE pair
//! 3. Run the login and inspect the authorization code

use async_trait::async_trait;
use std::sync::Arc;
use url::Url;
use yconnect_login::{
    LoginConfiguration, LoginManager, PkceChallenge, Scope, UserAgent, UserAgentError,
};

/// User agent that immediately "approves" the request by echoing the state
/// back on the registered redirect URI.
struct ApprovingUserAgent;

#[async_trait]
impl UserAgent for ApprovingUserAgent {
    async fn present(&self, url: Url, _callback_scheme: &str) -> Result<Url, UserAgentError> {
        println!("presenting: {url}");
        let state = url
            .query_pairs()
            .find(|(key, _)| key == "state")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();
        let callback = format!("exampleapp:/callback?code=issued_code&state={state}");
        Ok(Url::parse(&callback).expect("callback URL"))
    }

    fn dismiss(&self) {}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let manager = LoginManager::new(Arc::new(ApprovingUserAgent));
    manager.setup(LoginConfiguration::new(
        std::env::var("YCONNECT_CLIENT_ID").unwrap_or_else(|_| "your-client-id".to_string()),
        Url::parse("exampleapp:/callback")?,
    ));

    // The verifier stays with the caller for the token exchange it performs
    // after the login; only the challenge rides on the request.
    let pkce = PkceChallenge::new();
    println!("code_verifier (keep for token exchange): {}", pkce.code_verifier);

    let result = manager
        .login(
            vec![Scope::OpenId, Scope::Profile, Scope::Email],
            "example-nonce",
            pkce.code_challenge.clone(),
            None,
        )
        .await?;

    println!("authorization code: {}", result.authorization_code);
    Ok(())
}
