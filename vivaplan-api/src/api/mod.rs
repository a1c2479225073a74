//! HTTP API surface

mod error;
mod health;
mod people;
mod sessions;
mod slots;

pub use error::ApiError;
pub use health::health_check;
pub use people::{reviewer_sessions, student_sessions, student_slots};
pub use sessions::{create_session, get_session, list_session_slots, list_sessions};
pub use slots::{add_slot, update_slot};
