//! API error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use vivaplan_common::Error;

/// Wrapper mapping service errors onto HTTP responses
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidDate(_)
            | Error::StudentRequired
            | Error::DanglingReference(_)
            | Error::Config(_) => StatusCode::BAD_REQUEST,
            Error::StudentNotFound { .. }
            | Error::ReviewerNotFound { .. }
            | Error::SessionNotFound(_)
            | Error::SlotNotFound(_) => StatusCode::NOT_FOUND,
            Error::NotFoundAfterInsert(_) => {
                // Invariant violation, not user input
                error!("insert/reload invariant violated: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Database(_) | Error::Io(_) => {
                error!("internal error: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
