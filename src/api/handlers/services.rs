use axum::Json;
use axum::extract::State;

use crate::api::dto::services::ServicesResponse;
use crate::api::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/services
///
/// The token was already accepted by the access middleware. Listing is a separate
/// check done with the service's own credentials, so a refusal here is a 403.
pub async fn list_services(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<ServicesResponse>, AppError> {
    let listing = state.lister.list_services().await.map_err(|err| {
        tracing::warn!(subject = %ctx.subject, error = %err, "listing cloud run services failed");
        AppError::from(err)
    })?;

    Ok(Json(ServicesResponse::from(listing)))
}
