/*
 * Responsibility
 * - JSON request bodies for handlers
 * - Rejections use the `{ success, message }` error shape instead of axum's plain text
 */
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};

use crate::error::AppError;

/// `axum::Json` with rejections mapped onto `AppError`.
///
/// Bodies over the extractor limit are `PAYLOAD_TOO_LARGE`; anything else
/// that does not deserialize is `INVALID_BODY`.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(AppError::PayloadTooLarge)
            }
            Err(rejection) => Err(AppError::bad_request("INVALID_BODY", rejection.body_text())),
        }
    }
}
