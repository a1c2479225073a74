//! Common error types for vivaplan

use thiserror::Error;

/// Common result type for vivaplan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the vivaplan services
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Date string did not parse as an ISO calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Slot payload carried no student reference
    #[error("Student reference is required for a defense slot")]
    StudentRequired,

    /// Neither a student id nor an owning-account id matched
    #[error("Student not found for id {id}")]
    StudentNotFound {
        /// The candidate id as supplied by the caller
        id: String,
    },

    /// Neither a reviewer id nor an owning-account id matched
    #[error("Reviewer not found for id {id}")]
    ReviewerNotFound {
        /// The candidate id as supplied by the caller
        id: String,
    },

    /// No session with the given id
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// No slot with the given id
    #[error("Slot not found: {0}")]
    SlotNotFound(String),

    /// The store rejected a direct foreign-key reference at persist time
    #[error("Dangling reference: {0}")]
    DanglingReference(String),

    /// The just-written session row was not visible to the immediate reload
    #[error("Session {0} not found after insert")]
    NotFoundAfterInsert(String),
}
