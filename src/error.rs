/*
 * Responsibility
 * - ApiError shared by the whole app
 * - IntoResponse (HTTP status / JSON error body): the single place failures become responses
 * - Convert auth failures and guard denies into one shape
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::error::{AuthError, Deny};

/// Wire shape of every error: `{ "success": false, "message": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthorized: {0}")]
    Unauthorized(AuthError),
    #[error("forbidden: {0}")]
    Forbidden(Deny),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    /// Status code and stable machine-readable message.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::BadRequest { code, .. } => (StatusCode::BAD_REQUEST, *code),
            AppError::Unauthorized(err) => match err {
                AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
                AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
                AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
                AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, "USER_NOT_FOUND"),
                AuthError::AccountDeactivated => {
                    (StatusCode::UNAUTHORIZED, "ACCOUNT_DEACTIVATED")
                }
                // normally converted to `AppError::Internal` before reaching here
                AuthError::Internal(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")
                }
            },
            AppError::Forbidden(deny) => match deny {
                Deny::InsufficientRole { .. } => (StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE"),
                Deny::CommunityMismatch => (StatusCode::FORBIDDEN, "COMMUNITY_MISMATCH"),
                Deny::NotOwner => (StatusCode::FORBIDDEN, "NOT_OWNER"),
            },
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Unauthorized(AuthError::Internal(detail)) = &self {
            tracing::error!(detail = %detail, "internal failure during authentication");
        }
        if let AppError::BadRequest { code, message } = &self {
            tracing::debug!(code = *code, message = %message, "bad request");
        }

        let (status, message) = self.status_and_message();
        let body = ErrorResponse {
            success: false,
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal failure during authentication");
                AppError::Internal
            }
            other => AppError::Unauthorized(other),
        }
    }
}

impl From<Deny> for AppError {
    fn from(d: Deny) -> Self {
        AppError::Forbidden(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::identity::Role;

    #[test]
    fn authentication_failures_are_401() {
        for (err, message) in [
            (AuthError::MissingToken, "MISSING_TOKEN"),
            (AuthError::InvalidToken, "INVALID_TOKEN"),
            (AuthError::TokenExpired, "TOKEN_EXPIRED"),
            (AuthError::UserNotFound, "USER_NOT_FOUND"),
            (AuthError::AccountDeactivated, "ACCOUNT_DEACTIVATED"),
        ] {
            assert_eq!(
                AppError::from(err).status_and_message(),
                (StatusCode::UNAUTHORIZED, message)
            );
        }
    }

    #[test]
    fn denies_are_403() {
        for (deny, message) in [
            (
                Deny::InsufficientRole {
                    allowed: vec![Role::Admin],
                },
                "INSUFFICIENT_ROLE",
            ),
            (Deny::CommunityMismatch, "COMMUNITY_MISMATCH"),
            (Deny::NotOwner, "NOT_OWNER"),
        ] {
            assert_eq!(
                AppError::from(deny).status_and_message(),
                (StatusCode::FORBIDDEN, message)
            );
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = AppError::from(AuthError::Internal("pool timed out: postgres://x".into()));
        assert!(matches!(err, AppError::Internal));
        assert_eq!(
            err.status_and_message(),
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")
        );
    }

    #[test]
    fn payload_too_large_is_413() {
        assert_eq!(
            AppError::PayloadTooLarge.status_and_message(),
            (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE")
        );
    }

    #[tokio::test]
    async fn body_shape() {
        let response = AppError::Forbidden(Deny::NotOwner).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "message": "NOT_OWNER" })
        );
    }
}
