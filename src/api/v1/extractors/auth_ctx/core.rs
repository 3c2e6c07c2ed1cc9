use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::error::AuthError;
use crate::services::auth::identity::Identity;
use crate::state::AppState;

use super::AuthCtx;

/// Handler-side access to the AuthCtx, anonymous or not.
/// The access middleware must have inserted it into request extensions;
/// a route without a guard chain gets 401.
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized(AuthError::MissingToken))
    }
}

/// The authenticated identity. Anonymous callers are rejected with 401.
pub struct CurrentIdentity(pub Identity);

impl FromRequestParts<AppState> for CurrentIdentity
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .and_then(|ctx| ctx.identity().cloned())
            .map(CurrentIdentity)
            .ok_or(AppError::Unauthorized(AuthError::MissingToken))
    }
}
