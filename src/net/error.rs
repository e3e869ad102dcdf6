//! Gateway error taxonomy and HTTP status classification.
//!
//! DESIGN
//! ======
//! This is the only module that interprets status codes. Every variant's
//! `Display` string is meant to be shown to the user as-is, so pages render
//! `err.to_string()` and never branch on numbers.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Fallback text for rejections that carry no server message.
pub const REJECTED_FALLBACK: &str = "Request failed.";

/// Classified failure of a gateway call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// 401: the session token is missing, expired, or revoked.
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,
    /// 403: authenticated but not allowed.
    #[error("You do not have permission to access this resource.")]
    Forbidden,
    /// 404.
    #[error("The requested resource does not exist.")]
    NotFound,
    /// 5xx, or a success response whose payload could not be decoded.
    #[error("Server error, please try again later.")]
    ServerFault,
    /// 409, or a 400 whose message reports a uniqueness violation.
    #[error("That record already exists.")]
    Conflict,
    /// Any other non-success status.
    #[error("{message}")]
    RequestRejected { status: u16, message: String },
    /// No response arrived (network failure or request deadline).
    #[error("Network error, please check your connection.")]
    Unreachable,
    /// The request could not be built or dispatched.
    #[error("Request configuration error.")]
    ClientMisconfigured,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Fragments of database uniqueness errors the backend relays verbatim in
/// 400 bodies.
const DUPLICATE_MARKERS: [&str; 5] =
    ["unique constraint", "duplicate entry", "duplicate key", "integrityerror", "already exists"];

/// Whether `status` is a 2xx success.
#[must_use]
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map a non-success response to its [`GatewayError`].
#[must_use]
pub fn classify_status(status: u16, body: &str) -> GatewayError {
    match status {
        401 => GatewayError::Unauthorized,
        403 => GatewayError::Forbidden,
        404 => GatewayError::NotFound,
        409 => GatewayError::Conflict,
        500..=599 => GatewayError::ServerFault,
        _ => {
            let message = server_message(body);
            if status == 400 && message.as_deref().is_some_and(reports_duplicate) {
                return GatewayError::Conflict;
            }
            GatewayError::RequestRejected { status, message: message.unwrap_or_else(|| REJECTED_FALLBACK.to_owned()) }
        }
    }
}

fn reports_duplicate(message: &str) -> bool {
    let lowered = message.to_ascii_lowercase();
    DUPLICATE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Extract the server-supplied `error` (or `message`) text from a JSON body.
#[must_use]
pub fn server_message(body: &str) -> Option<String> {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return None;
    };
    parsed
        .error
        .into_iter()
        .chain(parsed.message)
        .map(|text| text.trim().to_owned())
        .find(|text| !text.is_empty())
}
