//! Session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use vivaplan_common::db::models::Slot;

use crate::api::ApiError;
use crate::scheduling::compose::{self, CreateSessionRequest};
use crate::scheduling::finder;
use crate::scheduling::view::{self, SessionResponse};
use crate::AppState;

/// POST /api/sessions
///
/// Creates a session and returns it with every association materialized.
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let details = compose::create_session(&state.db, req).await?;

    Ok((StatusCode::CREATED, Json(view::session_response(&details))))
}

/// GET /api/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    Ok(Json(finder::all_sessions(&state.db).await?))
}

/// GET /api/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    Ok(Json(finder::session_by_id(&state.db, &id).await?))
}

/// GET /api/sessions/:id/slots
pub async fn list_session_slots(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Slot>>, ApiError> {
    Ok(Json(finder::slots_for_session(&state.db, &id).await?))
}
