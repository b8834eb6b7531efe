/*
 * Responsibility
 * - Type of the "authenticated context" handlers see
 * - The access middleware verifies the token and stores this in request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - Token parsing/verification lives in services::auth
 */

/// Context attached to an authorized request.
///
/// - `subject` is `sub` for signed tokens and `"static"` for the shared secret
/// - `mode` is the verification mode that accepted the request (for logs)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub subject: String,
    pub mode: &'static str,
}

impl AuthCtx {
    pub fn new(subject: String, mode: &'static str) -> Self {
        Self { subject, mode }
    }
}
