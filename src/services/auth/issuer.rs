use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims written into every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    pub jti: String,
}

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("token lifetime must be positive, got {0}s")]
    NonPositiveTtl(i64),
    #[error("subject must not be empty")]
    EmptySubject,
    #[error("failed to sign token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
    #[error("failed to gather entropy: {0}")]
    Entropy(String),
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// HS256 token issuer, the counterpart of `SignedTokenVerifier`.
///
/// Used by the `token-gen` CLI and by tests; the server itself never issues tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: Option<String>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: &[u8], issuer: Option<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            issuer,
        }
    }

    pub fn issue(&self, subject: &str, ttl_seconds: i64) -> Result<IssuedToken, IssueError> {
        self.issue_at(subject, chrono::Utc::now().timestamp(), ttl_seconds)
    }

    /// Issue a token whose `iat` is `issued_at` and whose `exp` is `issued_at + ttl_seconds`.
    pub fn issue_at(
        &self,
        subject: &str,
        issued_at: i64,
        ttl_seconds: i64,
    ) -> Result<IssuedToken, IssueError> {
        if ttl_seconds <= 0 {
            return Err(IssueError::NonPositiveTtl(ttl_seconds));
        }
        if subject.trim().is_empty() {
            return Err(IssueError::EmptySubject);
        }

        let expires_at = issued_at.saturating_add(ttl_seconds);
        let claims = SignedClaims {
            sub: subject.to_string(),
            iat: issued_at,
            exp: expires_at,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key)?;

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }
}

/// 32 random bytes, base64url without padding.
pub fn generate_secret() -> Result<String, IssueError> {
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes).map_err(|e| IssueError::Entropy(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
