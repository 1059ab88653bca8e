//! Core capability traits and primitives for the YConnect login engine.
//!
//! The engine never touches the platform directly. Presenting the
//! authorization page, probing an installed companion app, and sourcing
//! secure random bytes all go through the traits in this crate, so the host
//! application picks the implementation that fits its surface and the engine
//! stays testable with stubs.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;
use url::Url;

/// Failure reported by a [`UserAgent`] implementation.
#[derive(Debug, Error)]
pub enum UserAgentError {
    /// The user dismissed the authentication session before it finished.
    #[error("authentication session cancelled by the user")]
    Cancelled,

    /// The session could not be presented, or died underneath us.
    #[error("user agent failure: {0}")]
    Platform(String),
}

/// A browser-like surface that can present an authorization URL and hand
/// back the redirect URL that terminates it.
///
/// Implementations decide how the URL is shown: a web-authentication popup,
/// an in-app browser tab, or the system browser. The engine only relies on
/// this contract and never branches on which variant is in use.
#[async_trait]
pub trait UserAgent: Send + Sync {
    /// Present `url` and resolve once the agent observes a redirect to
    /// `callback_scheme`, yielding the full callback URL.
    ///
    /// Resolves at most once per presentation.
    async fn present(&self, url: Url, callback_scheme: &str) -> Result<Url, UserAgentError>;

    /// Close the presented session if it is still on screen.
    ///
    /// Must be safe to call repeatedly and after the session completed.
    fn dismiss(&self);
}

/// Hands an authorization URL to an installed companion app instead of a
/// browser surface.
#[async_trait]
pub trait NativeLinkOpener: Send + Sync {
    /// Attempt delivery to a native handler.
    ///
    /// `false` means no handler accepted the URL and the caller should fall
    /// back to a [`UserAgent`].
    async fn open(&self, url: Url) -> bool;
}

/// The platform could not produce random bytes.
#[derive(Debug, Error)]
#[error("secure random generation failed")]
pub struct RandomError;

/// Source of cryptographically secure random bytes.
pub trait SecureRandom: Send + Sync {
    fn generate(&self, count: usize) -> Result<Vec<u8>, RandomError>;
}

/// Default [`SecureRandom`] backed by the operating system CSPRNG.
pub struct SystemRandom;

impl SecureRandom for SystemRandom {
    fn generate(&self, count: usize) -> Result<Vec<u8>, RandomError> {
        let mut bytes = vec![0u8; count];
        OsRng.try_fill_bytes(&mut bytes).map_err(|_| RandomError)?;
        Ok(bytes)
    }
}

/// Encode `bytes` with the base64url alphabet (`+` → `-`, `/` → `_`),
/// padding stripped.
pub fn base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_produces_requested_length() {
        let bytes = SystemRandom.generate(32).unwrap();
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn system_random_produces_distinct_values() {
        let a = SystemRandom.generate(32).unwrap();
        let b = SystemRandom.generate(32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn base64url_uses_url_safe_alphabet_without_padding() {
        // 0xfb 0xff chosen to force `-` and `_` in the output.
        let encoded = base64url(&[0xfb, 0xef, 0xff, 0xfe]);
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('='));
        assert_eq!(encoded, "--___g");
    }

    #[test]
    fn base64url_empty_input() {
        assert_eq!(base64url(&[]), "");
    }
}
