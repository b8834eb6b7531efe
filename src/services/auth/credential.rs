//! Bearer credential extraction from the raw `Authorization` header value.
//!
//! Only `Bearer <token>` is accepted: the scheme is case-sensitive and followed by
//! exactly one space. Nothing else is trimmed.

use std::fmt;

use thiserror::Error;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Raw bearer token taken from one request.
///
/// Key material: `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("authorization header required")]
pub struct MissingCredential;

/// Parse an `Authorization` header value into a [`Credential`].
///
/// `None` (header absent or not visible ASCII), a different scheme, or an empty /
/// whitespace-only token all yield [`MissingCredential`].
pub fn extract(header: Option<&str>) -> Result<Credential, MissingCredential> {
    let token = header
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .ok_or(MissingCredential)?;

    if token.trim().is_empty() {
        return Err(MissingCredential);
    }

    Ok(Credential(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bearer_scheme() {
        let credential = extract(Some("Bearer abc.def")).unwrap();
        assert_eq!(credential.as_str(), "abc.def");
    }

    #[test]
    fn keeps_token_bytes_after_prefix_verbatim() {
        let credential = extract(Some("Bearer  padded ")).unwrap();
        assert_eq!(credential.as_str(), " padded ");
    }

    #[test]
    fn rejects_anything_not_bearer_prefixed() {
        for header in [
            None,
            Some(""),
            Some("Bearer"),
            Some("Bearer "),
            Some("Bearer    "),
            Some("bearer token"),
            Some("BEARER token"),
            Some("Basic dXNlcjpwYXNz"),
            Some("Bearer\ttoken"),
            Some("token"),
            Some(" Bearer token"),
        ] {
            assert_eq!(extract(header), Err(MissingCredential), "{header:?}");
        }
    }

    #[test]
    fn debug_redacts_token() {
        let credential = extract(Some("Bearer super-secret")).unwrap();
        assert!(!format!("{credential:?}").contains("super-secret"));
    }
}
