//! Redirect response parsing and validation.

use crate::error::{ErrorDetail, LoginError, ResponseFailedReason, classify_wire_error};
use crate::query;
use tracing::debug;
use url::Url;

/// Payload of a successful authorization response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    /// The authorization code. Exchanging it for tokens is the caller's
    /// business.
    pub authorization_code: String,

    /// The `state` echoed by the server, when one was sent.
    pub state: Option<String>,
}

/// Parse a callback URL into a [`LoginResult`], validating its `state`
/// against the one generated for the outstanding request.
///
/// The evaluation order is load-bearing:
/// an empty query means the user dismissed the agent; the state check runs
/// before any error or code inspection so a tampered response is always
/// reported as invalid state; a complete error triple is classified next;
/// and a well-formed response without a code is treated as a cancellation.
pub fn parse_redirect(url: &Url, expected_state: Option<&str>) -> Result<LoginResult, LoginError> {
    let pairs = query::decode(url.query().unwrap_or(""));
    if pairs.is_empty() {
        debug!("redirect carried no parameters; treating as user cancellation");
        return Err(LoginError::UserCancel);
    }

    let mut authorization_code = None;
    let mut state = None;
    let mut error = None;
    let mut error_description = None;
    let mut error_code = None;
    for (key, value) in pairs {
        match key.as_str() {
            "code" => authorization_code = Some(value),
            "state" => state = Some(value),
            "error" => error = Some(value),
            "error_description" => error_description = Some(value),
            // A non-integer code is treated as absent.
            "error_code" => error_code = value.parse::<i64>().ok(),
            _ => {}
        }
    }

    match (expected_state, state.as_deref()) {
        (None, None) => {}
        (Some(expected), Some(received)) if expected == received => {}
        _ => {
            debug!("state mismatch on redirect");
            return Err(LoginError::ResponseFailed(
                ResponseFailedReason::InvalidState,
            ));
        }
    }

    if let (Some(error), Some(description), Some(numeric)) =
        (&error, &error_description, error_code)
    {
        let detail = ErrorDetail {
            error: error.clone(),
            error_description: description.clone(),
            error_code: numeric,
        };
        return Err(classify_wire_error(detail));
    }

    match authorization_code {
        Some(code) if !code.is_empty() => Ok(LoginResult {
            authorization_code: code,
            state,
        }),
        _ => {
            debug!("redirect carried no authorization code; treating as user cancellation");
            Err(LoginError::UserCancel)
        }
    }
}
