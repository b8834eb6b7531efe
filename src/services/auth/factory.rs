/// Factory: build the process-wide `VerificationMode` from application `Config`.
use std::sync::Arc;

use crate::config::AuthSettings;
use crate::services::auth::verifier::{
    SignedTokenVerifier, SigningKey, StaticTokenVerifier, VerificationMode,
};

pub fn build_verification_mode(settings: &AuthSettings) -> Arc<VerificationMode> {
    let signed = |secret_key: &str, issuer: &Option<String>| {
        SignedTokenVerifier::new(SigningKey::new(secret_key.as_bytes()), issuer.clone())
    };

    let mode = match settings {
        AuthSettings::Static { bearer_token } => {
            VerificationMode::Static(StaticTokenVerifier::new(bearer_token))
        }
        AuthSettings::Jwt { secret_key, issuer } => {
            VerificationMode::Signed(signed(secret_key, issuer))
        }
        AuthSettings::Hybrid {
            bearer_token,
            secret_key,
            issuer,
        } => VerificationMode::Hybrid {
            static_token: StaticTokenVerifier::new(bearer_token),
            signed: signed(secret_key, issuer),
        },
    };

    Arc::new(mode)
}
