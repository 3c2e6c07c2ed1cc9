/*
 * Responsibility
 * - What handlers may reveal about the caller (never credential fields)
 */
use serde::Serialize;

use crate::services::auth::identity::{Identity, Role};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub community_ref: Option<String>,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            role: identity.role,
            name: identity.name,
            community_ref: identity.community_ref,
        }
    }
}
