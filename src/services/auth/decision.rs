//! Maps a verification outcome to an HTTP-level allow/deny decision.
//!
//! The mapping is fixed and total. Every token failure is a 401 with
//! `error = "unauthorized"`; only the message varies. `Malformed` gets a generic
//! message so the response says nothing about token structure.

use axum::http::StatusCode;

use crate::services::auth::credential::MissingCredential;
use crate::services::auth::verifier::VerificationOutcome;

pub const UNAUTHORIZED: &str = "unauthorized";
pub const PERMISSION_DENIED: &str = "permission_denied";

pub const MSG_MISSING_CREDENTIAL: &str = "Authorization header required";
pub const MSG_MALFORMED: &str = "Invalid or expired token";
pub const MSG_EXPIRED: &str = "Token has expired";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allow { subject: String },
    Deny(Denial),
}

/// Rendered as `{"error": error_code, "message": message}` with `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    pub status: StatusCode,
    pub error_code: &'static str,
    pub message: String,
}

impl Denial {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error_code: UNAUTHORIZED,
            message: message.into(),
        }
    }

    /// Second-layer denial: the token was fine but the caller may not do this.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            error_code: PERMISSION_DENIED,
            message: message.into(),
        }
    }
}

pub fn decide(outcome: VerificationOutcome) -> AuthorizationDecision {
    match outcome {
        VerificationOutcome::Valid { subject } => AuthorizationDecision::Allow { subject },
        VerificationOutcome::Malformed => {
            AuthorizationDecision::Deny(Denial::unauthorized(MSG_MALFORMED))
        }
        VerificationOutcome::Invalid { reason } => AuthorizationDecision::Deny(
            Denial::unauthorized(format!("Invalid token: {}", capitalize(reason.as_str()))),
        ),
        VerificationOutcome::Expired => {
            AuthorizationDecision::Deny(Denial::unauthorized(MSG_EXPIRED))
        }
    }
}

impl From<MissingCredential> for AuthorizationDecision {
    fn from(_: MissingCredential) -> Self {
        AuthorizationDecision::Deny(Denial::unauthorized(MSG_MISSING_CREDENTIAL))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
