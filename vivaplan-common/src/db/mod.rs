//! Database models and queries

pub mod init;
pub mod models;
pub mod refs;
pub mod reviewers;
pub mod sessions;
pub mod slots;
pub mod students;

pub use init::*;
pub use models::*;
