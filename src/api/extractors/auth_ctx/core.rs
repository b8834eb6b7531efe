use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::decision::MSG_MISSING_CREDENTIAL;

use super::AuthCtx;

/// Extractor handing the `AuthCtx` to handlers.
/// Assumes the access middleware already inserted it into request extensions;
/// if it is missing (middleware not applied) the request is rejected with 401.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or_else(|| AppError::Unauthorized(MSG_MISSING_CREDENTIAL.to_string()))
    }
}
