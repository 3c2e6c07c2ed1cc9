/*
 * Responsibility
 * - GET /communities/{communityId}/routes
 * - Guarded by MultiRole(admin, community_admin) + Community; this handler
 *   only runs for callers allowed into the community
 */
use axum::{Json, extract::Path};
use serde_json::{Value, json};

use crate::api::v1::extractors::CurrentIdentity;

pub async fn list_routes(
    Path(community_id): Path<String>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Json<Value> {
    Json(json!({
        "success": true,
        "communityId": community_id,
        "requestedBy": identity.id,
        "routes": [],
    }))
}
