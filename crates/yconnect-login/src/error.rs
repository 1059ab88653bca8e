//! Login error taxonomy.
//!
//! Every failure mode of an authorization attempt is a variant here; nothing
//! is retried internally and nothing is thrown across the coordinator
//! boundary. The taxonomy is closed: server-side error codes map onto it
//! through [`WIRE_ERROR_TABLE`], and unrecognized codes land in
//! [`ResponseFailedReason::Undefined`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Detail payload of a classified authorization server error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error identifier defined per error kind.
    pub error: String,
    /// Developer-facing description.
    pub error_description: String,
    /// Numeric code unique to the error.
    pub error_code: i64,
}

/// The request itself was rejected by the user or the authorization server.
/// Not retryable without changing the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailedReason {
    /// The user or the authorization server denied the request.
    #[error("access_denied: {}", .0.error_description)]
    AccessDenied(ErrorDetail),

    /// A requested scope is invalid, unknown, or malformed.
    #[error("invalid_scope: {}", .0.error_description)]
    InvalidScope(ErrorDetail),

    /// A required parameter is missing, unsupported, repeated, or otherwise
    /// malformed.
    #[error("invalid_request: {}", .0.error_description)]
    InvalidRequest(ErrorDetail),

    /// The server does not support obtaining an authorization code this way.
    #[error("unsupported_response_type: {}", .0.error_description)]
    UnsupportedResponseType(ErrorDetail),
}

/// The redirect response failed an integrity check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseFailedReason {
    /// The `state` parameter did not round-trip unmodified.
    #[error("state validation failed")]
    InvalidState,

    /// The server answered with an error code outside the known taxonomy.
    #[error("undefined response error {}: {}", .0.error, .0.error_description)]
    Undefined(ErrorDetail),
}

/// The server needs the user to interact before it can answer; re-attempt
/// with an adjusted `prompt`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserInteractionRequiredReason {
    /// A consent screen must be shown.
    #[error("consent_required: {}", .0.error_description)]
    ConsentRequired(ErrorDetail),

    /// A login screen must be shown.
    #[error("login_required: {}", .0.error_description)]
    LoginRequired(ErrorDetail),

    /// Some other interaction screen must be shown.
    #[error("interaction_required: {}", .0.error_description)]
    InteractionRequired(ErrorDetail),
}

/// Terminal failure of one login attempt.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The authorization request was rejected.
    #[error("authorization request failed: {0}")]
    RequestFailed(RequestFailedReason),

    /// The authorization response was invalid.
    #[error("authorization response invalid: {0}")]
    ResponseFailed(ResponseFailedReason),

    /// The user cancelled before granting consent. Safe to let the user
    /// retry.
    #[error("login cancelled by the user")]
    UserCancel,

    /// Transient authorization server failure; the caller may retry.
    #[error("authorization server error: {}", .0.error_description)]
    SystemError(ErrorDetail),

    /// User interaction is required before the server can answer.
    #[error("user interaction required: {0}")]
    UserInteractionRequired(UserInteractionRequiredReason),

    /// Platform-level or unparseable failure; carries the underlying detail
    /// when one exists.
    #[error("undefined login failure")]
    UndefinedError(Option<String>),

    /// Another login attempt is already in flight. A concurrency-usage
    /// error, not a protocol error.
    #[error("another login attempt is already running")]
    Authenticating,
}

/// Wire code → classification. Adding a server-side error code is one row
/// here; no new control flow.
const WIRE_ERROR_TABLE: &[(&str, fn(ErrorDetail) -> LoginError)] = &[
    ("access_denied", |d| {
        LoginError::RequestFailed(RequestFailedReason::AccessDenied(d))
    }),
    ("invalid_scope", |d| {
        LoginError::RequestFailed(RequestFailedReason::InvalidScope(d))
    }),
    ("invalid_request", |d| {
        LoginError::RequestFailed(RequestFailedReason::InvalidRequest(d))
    }),
    ("unsupported_response_type", |d| {
        LoginError::RequestFailed(RequestFailedReason::UnsupportedResponseType(d))
    }),
    ("server_error", LoginError::SystemError),
    ("consent_required", |d| {
        LoginError::UserInteractionRequired(UserInteractionRequiredReason::ConsentRequired(d))
    }),
    ("login_required", |d| {
        LoginError::UserInteractionRequired(UserInteractionRequiredReason::LoginRequired(d))
    }),
    ("interaction_required", |d| {
        LoginError::UserInteractionRequired(UserInteractionRequiredReason::InteractionRequired(d))
    }),
];

/// Classify a wire error triple against the closed taxonomy.
pub(crate) fn classify_wire_error(detail: ErrorDetail) -> LoginError {
    match WIRE_ERROR_TABLE
        .iter()
        .find(|(code, _)| *code == detail.error)
    {
        Some((_, build)) => build(detail),
        None => LoginError::ResponseFailed(ResponseFailedReason::Undefined(detail)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(error: &str) -> ErrorDetail {
        ErrorDetail {
            error: error.to_string(),
            error_description: "description".to_string(),
            error_code: 1000,
        }
    }

    #[test]
    fn classifies_request_rejections() {
        assert!(matches!(
            classify_wire_error(detail("access_denied")),
            LoginError::RequestFailed(RequestFailedReason::AccessDenied(_))
        ));
        assert!(matches!(
            classify_wire_error(detail("invalid_scope")),
            LoginError::RequestFailed(RequestFailedReason::InvalidScope(_))
        ));
        assert!(matches!(
            classify_wire_error(detail("invalid_request")),
            LoginError::RequestFailed(RequestFailedReason::InvalidRequest(_))
        ));
        assert!(matches!(
            classify_wire_error(detail("unsupported_response_type")),
            LoginError::RequestFailed(RequestFailedReason::UnsupportedResponseType(_))
        ));
    }

    #[test]
    fn classifies_server_error() {
        assert!(matches!(
            classify_wire_error(detail("server_error")),
            LoginError::SystemError(_)
        ));
    }

    #[test]
    fn classifies_interaction_requirements() {
        assert!(matches!(
            classify_wire_error(detail("consent_required")),
            LoginError::UserInteractionRequired(UserInteractionRequiredReason::ConsentRequired(_))
        ));
        assert!(matches!(
            classify_wire_error(detail("login_required")),
            LoginError::UserInteractionRequired(UserInteractionRequiredReason::LoginRequired(_))
        ));
        assert!(matches!(
            classify_wire_error(detail("interaction_required")),
            LoginError::UserInteractionRequired(
                UserInteractionRequiredReason::InteractionRequired(_)
            )
        ));
    }

    #[test]
    fn unknown_code_is_undefined_and_keeps_the_detail() {
        let classified = classify_wire_error(detail("unexpected_error"));
        match classified {
            LoginError::ResponseFailed(ResponseFailedReason::Undefined(d)) => {
                assert_eq!(d.error, "unexpected_error");
                assert_eq!(d.error_description, "description");
                assert_eq!(d.error_code, 1000);
            }
            other => panic!("expected Undefined, got {other:?}"),
        }
    }

    #[test]
    fn error_detail_serde_round_trip() {
        let d = detail("server_error");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(serde_json::from_str::<ErrorDetail>(&json).unwrap(), d);
    }
}
