//! Person-scoped lookup endpoints
//!
//! Path ids here are ambiguous by design: callers may send the person
//! record's id or the id of the login account that owns it. The scheduling
//! core resolves both forms with a fixed try-order.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::ApiError;
use crate::scheduling::finder;
use crate::scheduling::view::{SessionResponse, SlotSummary};
use crate::AppState;

/// GET /api/students/:id/slots
pub async fn student_slots(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SlotSummary>>, ApiError> {
    Ok(Json(finder::slots_for_student(&state.db, &id).await?))
}

/// GET /api/students/:id/sessions
pub async fn student_sessions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    Ok(Json(finder::sessions_for_student(&state.db, &id).await?))
}

/// GET /api/reviewers/:id/sessions
pub async fn reviewer_sessions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    Ok(Json(finder::sessions_for_reviewer(&state.db, &id).await?))
}
