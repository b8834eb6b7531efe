//! Bearer verification for protected routes: header → credential → outcome →
//! decision. On `Allow` an `AuthCtx` is stored in request extensions; on `Deny` the
//! request never reaches the handler.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::api::extractors::AuthCtx;
use crate::services::auth::verifier::looks_like_jwt;
use crate::services::auth::{AuthorizationDecision, credential, decide};
use crate::state::AppState;

/// Apply the access middleware to every route of `router`.
///
/// `route_layer` keeps unknown paths as 404 rather than 401.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum's from_fn cannot take a State extractor, so pass state explicitly
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // A non-ASCII header value is treated like a missing one.
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let decision = match credential::extract(authorization) {
        Ok(credential) => {
            let outcome = state.verifier.verify(&credential);
            if !outcome.is_valid() {
                tracing::warn!(
                    outcome = outcome.kind(),
                    mode = state.verifier.kind(),
                    jwt_shaped = looks_like_jwt(credential.as_str()),
                    "access token rejected"
                );
            }
            decide(outcome)
        }
        Err(missing) => {
            tracing::warn!(mode = state.verifier.kind(), "bearer credential missing");
            AuthorizationDecision::from(missing)
        }
    };

    match decision {
        AuthorizationDecision::Allow { subject } => {
            // middleware → extractor handoff
            req.extensions_mut()
                .insert(AuthCtx::new(subject, state.verifier.kind()));
            next.run(req).await
        }
        AuthorizationDecision::Deny(denial) => denial.into_response(),
    }
}
