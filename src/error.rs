/*
 * Responsibility
 * - Shared AppError definition for handlers and middleware
 * - IntoResponse (HTTP status + flat JSON body {"error", "message"})
 * - Conversion from auth denials and service-lister failures
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::Denial;
use crate::services::cloud_run::ListError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    PermissionDenied(String),
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("{0}")]
    Upstream(String),
    #[error("request timed out")]
    Timeout,
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthorized(message) => return Denial::unauthorized(message).into_response(),
            AppError::PermissionDenied(message) => {
                return Denial::permission_denied(message).into_response();
            }
            AppError::ServiceUnavailable(message) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", message)
            }
            AppError::Upstream(message) => (StatusCode::BAD_GATEWAY, "upstream_error", message),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "request_timeout",
                "request timed out".into(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal server error".into(),
            ),
        };

        (status, Json(ErrorBody { error: code, message })).into_response()
    }
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        let challenge = self.status == StatusCode::UNAUTHORIZED;
        let body = ErrorBody {
            error: self.error_code,
            message: self.message,
        };

        let mut response = (self.status, Json(body)).into_response();
        if challenge {
            // RFC 6750 challenge on every 401
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<ListError> for AppError {
    fn from(e: ListError) -> Self {
        match e {
            ListError::PermissionDenied(detail) => AppError::PermissionDenied(format!(
                "Service account lacks permission to list Cloud Run services: {detail}"
            )),
            ListError::NotConfigured => {
                AppError::ServiceUnavailable("Service listing is not configured".into())
            }
            ListError::Upstream(_) => {
                AppError::Upstream("Failed to list Cloud Run services".into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_carries_bearer_challenge() {
        let response = AppError::Unauthorized("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }

    #[test]
    fn lister_errors_keep_their_own_status() {
        let forbidden = AppError::from(ListError::PermissionDenied("denied".into())).into_response();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert!(forbidden.headers().get(header::WWW_AUTHENTICATE).is_none());

        let unavailable = AppError::from(ListError::NotConfigured).into_response();
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let upstream = AppError::from(ListError::Upstream("boom".into())).into_response();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
    }
}
