use axum::Json;

use crate::api::dto::secure::SecureResponse;
use crate::api::extractors::AuthCtxExtractor;

/// GET /api/secure: only reachable once the access middleware allowed the request.
pub async fn secure(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<SecureResponse> {
    tracing::debug!(subject = %ctx.subject, mode = ctx.mode, "secure request authorized");
    Json(SecureResponse::authorized())
}
