/*
 * Responsibility
 * - GET /me: the authenticated caller as the pipeline resolved it
 */
use axum::Json;

use crate::api::v1::{dto::identity::IdentityResponse, extractors::CurrentIdentity};

pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<IdentityResponse> {
    Json(identity.into())
}
