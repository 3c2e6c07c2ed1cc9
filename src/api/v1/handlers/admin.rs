/*
 * Responsibility
 * - DELETE /admin/users/{userId} (admin only)
 * - Persistence is out of scope; the handler acknowledges the request
 */
use axum::{Json, extract::Path, http::StatusCode};
use serde_json::{Value, json};

use crate::api::v1::extractors::CurrentIdentity;

pub async fn deactivate_user(
    Path(user_id): Path<String>,
    CurrentIdentity(admin): CurrentIdentity,
) -> (StatusCode, Json<Value>) {
    tracing::info!(target_user = %user_id, admin_id = %admin.id, "user deactivation requested");

    (
        StatusCode::ACCEPTED,
        Json(json!({ "success": true, "userId": user_id })),
    )
}
