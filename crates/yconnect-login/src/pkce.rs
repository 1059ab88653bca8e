//! PKCE (RFC 7636) code verifier and challenge generation, S256 only.
//!
//! The engine transports the challenge but never the verifier: the verifier
//! stays with the caller for the token exchange it performs elsewhere.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// PKCE pair for one authorization attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PkceChallenge {
    /// Random verifier, 64 characters from the RFC 7636 unreserved set.
    pub code_verifier: String,

    /// `BASE64URL(SHA256(code_verifier))`.
    pub code_challenge: String,

    /// Always `"S256"`.
    pub code_challenge_method: String,
}

impl PkceChallenge {
    /// Generate a fresh verifier and derive its challenge.
    pub fn new() -> Self {
        let code_verifier = generate_code_verifier();
        let code_challenge = challenge_for(&code_verifier);
        Self {
            code_verifier,
            code_challenge,
            code_challenge_method: "S256".to_string(),
        }
    }
}

impl Default for PkceChallenge {
    fn default() -> Self {
        Self::new()
    }
}

// RFC 7636 allows 43-128 characters from [A-Z] [a-z] [0-9] - . _ ~
fn generate_code_verifier() -> String {
    let mut rng = thread_rng();
    (0..64)
        .map(|_| {
            let idx = rng.gen_range(0..62u8);
            match idx {
                0..=25 => (b'A' + idx) as char,
                26..=51 => (b'a' + (idx - 26)) as char,
                _ => (b'0' + (idx - 52)) as char,
            }
        })
        .collect()
}

fn challenge_for(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifier_meets_rfc_requirements() {
        let pkce = PkceChallenge::new();
        assert_eq!(pkce.code_verifier.len(), 64);
        assert!(pkce.code_verifier.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(pkce.code_challenge_method, "S256");
    }

    #[test]
    fn challenge_is_sha256_of_verifier() {
        let pkce = PkceChallenge::new();
        assert_eq!(pkce.code_challenge, challenge_for(&pkce.code_verifier));
        assert!(!pkce.code_challenge.contains('='));
    }

    #[test]
    fn known_verifier_yields_known_challenge() {
        // RFC 7636 appendix B vector.
        assert_eq!(
            challenge_for("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn each_generation_is_unique() {
        let a = PkceChallenge::new();
        let b = PkceChallenge::new();
        assert_ne!(a.code_verifier, b.code_verifier);
        assert_ne!(a.code_challenge, b.code_challenge);
    }
}
