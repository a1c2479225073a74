//! Slot endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use vivaplan_common::db::models::Slot;

use crate::api::ApiError;
use crate::scheduling::compose::{self, AddSlotRequest, UpdateSlotRequest};
use crate::AppState;

/// POST /api/sessions/:id/slots
///
/// Adds a student slot to a session. The slot's date is inherited from the
/// session; any date in the payload is ignored.
pub async fn add_slot(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<AddSlotRequest>,
) -> Result<(StatusCode, Json<Slot>), ApiError> {
    let slot = compose::add_slot(&state.db, &session_id, req).await?;

    Ok((StatusCode::CREATED, Json(slot)))
}

/// PUT /api/slots/:id
///
/// Updates a slot's subject and time range only.
pub async fn update_slot(
    State(state): State<AppState>,
    Path(slot_id): Path<String>,
    Json(req): Json<UpdateSlotRequest>,
) -> Result<Json<Slot>, ApiError> {
    Ok(Json(compose::update_slot(&state.db, &slot_id, req).await?))
}
