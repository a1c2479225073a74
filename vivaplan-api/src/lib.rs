//! vivaplan-api library - defense session scheduling service
//!
//! Schedules academic defense sessions and their per-student slots. The
//! scheduling core resolves ambiguous person references (record id vs.
//! owning-account id), composes sessions and slots, and assembles response
//! views from fully materialized associations.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod scheduling;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    Router::new()
        .route("/health", get(api::health_check))
        .route(
            "/api/sessions",
            post(api::create_session).get(api::list_sessions),
        )
        .route("/api/sessions/:id", get(api::get_session))
        .route(
            "/api/sessions/:id/slots",
            post(api::add_slot).get(api::list_session_slots),
        )
        .route("/api/slots/:id", put(api::update_slot))
        .route("/api/students/:id/slots", get(api::student_slots))
        .route("/api/students/:id/sessions", get(api::student_sessions))
        .route("/api/reviewers/:id/sessions", get(api::reviewer_sessions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
