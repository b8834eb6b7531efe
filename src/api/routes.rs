/*
 * Responsibility
 * - URL layout under /api
 * - Public: /health
 * - Bearer-protected: /secure, /services (access middleware via route_layer)
 */
use axum::{Router, routing::get};

use crate::api::handlers::{health::health, secure::secure, services::list_services};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/secure", get(secure))
        .route("/services", get(list_services));
    let protected = middleware::auth::access::apply(protected, state);

    Router::new().route("/health", get(health)).merge(protected)
}
