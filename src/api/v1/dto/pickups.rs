/*
 * Responsibility
 * - Pickup update request/response DTO
 * - `user` is the owner field the ownership guard reads from the body
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePickupRequest {
    pub user: Option<String>,
    pub scheduled_for: Option<String>,
    pub notes: Option<String>,
}

impl UpdatePickupRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(user) = &self.user
            && user.trim().is_empty()
        {
            return Err("user cannot be empty");
        }
        if let Some(notes) = &self.notes
            && notes.len() > 1000
        {
            return Err("notes must be <= 1000 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupUpdateResponse {
    pub success: bool,
    pub pickup_id: String,
    pub updated_by: String,
}
