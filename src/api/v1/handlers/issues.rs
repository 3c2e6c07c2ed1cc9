/*
 * Responsibility
 * - GET /issues: reachable anonymously, personalized when a valid token is sent
 * - Issue storage is out of scope; the list is always empty here
 */
use axum::Json;
use serde_json::{Value, json};

use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn list_issues(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<Value> {
    Json(json!({
        "success": true,
        "personalized": ctx.is_authenticated(),
        "viewer": ctx.user_id(),
        "issues": [],
    }))
}
