/*
 * Responsibility
 * - PUT /pickups/{pickupId}
 * - Ownership is already enforced by the guard chain (owner field `user`)
 */
use axum::{Json, extract::Path};

use crate::{
    api::v1::{
        dto::pickups::{PickupUpdateResponse, UpdatePickupRequest},
        extractors::{ApiJson, CurrentIdentity},
    },
    error::AppError,
};

pub async fn update_pickup(
    Path(pickup_id): Path<String>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiJson(req): ApiJson<UpdatePickupRequest>,
) -> Result<Json<PickupUpdateResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_PICKUP", msg))?;

    tracing::info!(pickup_id = %pickup_id, user_id = %identity.id, "pickup update accepted");

    Ok(Json(PickupUpdateResponse {
        success: true,
        pickup_id,
        updated_by: identity.id,
    }))
}
