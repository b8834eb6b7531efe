use std::fmt;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::services::auth::credential::Credential;

/// Subject reported for a credential accepted by the static verifier.
pub const STATIC_SUBJECT: &str = "static";

/// Every JWT header serializes as a JSON object, so its base64url form starts with `eyJ`.
pub const JWT_PREFIX: &str = "eyJ";

/// Structural hint only: a static secret may start with the same prefix.
pub fn looks_like_jwt(token: &str) -> bool {
    token.starts_with(JWT_PREFIX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    TokenMismatch,
    UnsupportedAlgorithm,
    SignatureMismatch,
    MissingExpiration,
    InvalidExpiration,
    IssuerMismatch,
    MissingSubject,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokenMismatch => "token mismatch",
            Self::UnsupportedAlgorithm => "unsupported signing algorithm",
            Self::SignatureMismatch => "signature verification failed",
            Self::MissingExpiration => "missing expiration claim",
            Self::InvalidExpiration => "invalid expiration claim",
            Self::IssuerMismatch => "issuer mismatch",
            Self::MissingSubject => "missing subject claim",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one verification attempt. Exactly one variant per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Valid { subject: String },
    Invalid { reason: InvalidReason },
    Expired,
    Malformed,
}

impl VerificationOutcome {
    fn invalid(reason: InvalidReason) -> Self {
        Self::Invalid { reason }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Short label for logs (never includes token material).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Valid { .. } => "valid",
            Self::Invalid { .. } => "invalid",
            Self::Expired => "expired",
            Self::Malformed => "malformed",
        }
    }
}

/// Static shared-secret verifier.
///
/// Only the SHA-256 digest of the secret is kept. Comparing fixed-length digests with
/// `ct_eq` hides both the secret length and the position of the first differing byte.
#[derive(Clone)]
pub struct StaticTokenVerifier {
    digest: [u8; 32],
}

impl StaticTokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            digest: digest(secret.as_bytes()),
        }
    }

    pub fn verify(&self, credential: &Credential) -> VerificationOutcome {
        let provided = digest(credential.as_str().as_bytes());

        if bool::from(provided.as_slice().ct_eq(self.digest.as_slice())) {
            VerificationOutcome::Valid {
                subject: STATIC_SUBJECT.to_string(),
            }
        } else {
            VerificationOutcome::invalid(InvalidReason::TokenMismatch)
        }
    }
}

impl fmt::Debug for StaticTokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenVerifier")
            .field("digest", &"[REDACTED]")
            .finish()
    }
}

fn digest(bytes: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(bytes));
    out
}

/// HMAC-SHA256 key shared by the verifier and `TokenIssuer`.
#[derive(Clone)]
pub struct SigningKey {
    decoding_key: DecodingKey,
}

impl SigningKey {
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(bytes.as_ref()),
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// HS256 JWT verifier.
///
/// Checks, in order: three segments, decodable header/payload, `alg`, signature,
/// payload shape, `exp`, optional `iss`, `sub`. The signature is checked before the
/// payload is interpreted, so a tampered payload always reports a signature failure
/// and an expired token is only reported as `Expired` once it is known to be genuine.
///
/// `jsonwebtoken` checks the signature only; `exp` is compared here so the clock can
/// be injected through `verify_at`.
#[derive(Clone)]
pub struct SignedTokenVerifier {
    key: SigningKey,
    validation: Validation,
    expected_issuer: Option<String>,
}

impl fmt::Debug for SignedTokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedTokenVerifier")
            .field("key", &self.key)
            .field("expected_issuer", &self.expected_issuer)
            .finish()
    }
}

impl SignedTokenVerifier {
    pub fn new(key: SigningKey, expected_issuer: Option<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key,
            validation,
            expected_issuer,
        }
    }

    /// Verify against the current wall clock (read once per call).
    pub fn verify(&self, credential: &Credential) -> VerificationOutcome {
        self.verify_at(credential, chrono::Utc::now().timestamp())
    }

    /// Verify as of `now` (unix seconds).
    pub fn verify_at(&self, credential: &Credential, now: i64) -> VerificationOutcome {
        let token = credential.as_str();

        let mut segments = token.split('.');
        let (Some(_), Some(payload_b64), Some(_), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return VerificationOutcome::Malformed;
        };

        let Ok(header) = jsonwebtoken::decode_header(token) else {
            return VerificationOutcome::Malformed;
        };
        if URL_SAFE_NO_PAD.decode(payload_b64).is_err() {
            return VerificationOutcome::Malformed;
        }

        if header.alg != Algorithm::HS256 {
            return VerificationOutcome::invalid(InvalidReason::UnsupportedAlgorithm);
        }

        let claims = match jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.key.decoding_key,
            &self.validation,
        ) {
            Ok(data) => data.claims,
            Err(e) => return map_jwt_error(&e),
        };

        let expires_at = match claims.get("exp") {
            None | Some(Value::Null) => {
                return VerificationOutcome::invalid(InvalidReason::MissingExpiration);
            }
            Some(value) => match numeric_date(value) {
                Some(exp) => exp,
                None => return VerificationOutcome::invalid(InvalidReason::InvalidExpiration),
            },
        };
        if now as f64 >= expires_at {
            return VerificationOutcome::Expired;
        }

        if let Some(expected) = self.expected_issuer.as_deref() {
            if claims.get("iss").and_then(Value::as_str) != Some(expected) {
                return VerificationOutcome::invalid(InvalidReason::IssuerMismatch);
            }
        }

        match claims.get("sub").and_then(Value::as_str) {
            Some(sub) if !sub.trim().is_empty() => VerificationOutcome::Valid {
                subject: sub.to_string(),
            },
            _ => VerificationOutcome::invalid(InvalidReason::MissingSubject),
        }
    }
}

fn map_jwt_error(err: &jsonwebtoken::errors::Error) -> VerificationOutcome {
    match err.kind() {
        // Header and payload already decoded, so a base64 failure here is the signature.
        ErrorKind::InvalidSignature | ErrorKind::Base64(_) => {
            VerificationOutcome::invalid(InvalidReason::SignatureMismatch)
        }
        ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
            VerificationOutcome::invalid(InvalidReason::UnsupportedAlgorithm)
        }
        _ => VerificationOutcome::Malformed,
    }
}

// NumericDate, compared in f64 so fractional expiries keep their sub-second part.
fn numeric_date(value: &Value) -> Option<f64> {
    value.as_f64().filter(|f| f.is_finite())
}

/// Verification strategy, fixed once at startup.
#[derive(Debug, Clone)]
pub enum VerificationMode {
    Static(StaticTokenVerifier),
    Signed(SignedTokenVerifier),
    /// Legacy compatibility: tokens starting with [`JWT_PREFIX`] go to the signed
    /// verifier, everything else to the static one.
    Hybrid {
        static_token: StaticTokenVerifier,
        signed: SignedTokenVerifier,
    },
}

impl VerificationMode {
    pub fn verify(&self, credential: &Credential) -> VerificationOutcome {
        self.verify_at(credential, chrono::Utc::now().timestamp())
    }

    pub fn verify_at(&self, credential: &Credential, now: i64) -> VerificationOutcome {
        match self {
            Self::Static(verifier) => verifier.verify(credential),
            Self::Signed(verifier) => verifier.verify_at(credential, now),
            Self::Hybrid {
                static_token,
                signed,
            } => {
                if looks_like_jwt(credential.as_str()) {
                    signed.verify_at(credential, now)
                } else {
                    static_token.verify(credential)
                }
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::Signed(_) => "jwt",
            Self::Hybrid { .. } => "hybrid",
        }
    }
}
