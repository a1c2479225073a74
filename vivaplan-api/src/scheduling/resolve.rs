//! Ambiguous person-id resolution
//!
//! Externally supplied person ids may name the domain record directly or the
//! login account that owns it. Resolution order is fixed: the direct id is
//! tried first, then the owning-account id, because the direct id is the
//! more specific and operationally more common case. Which strategy
//! succeeded is never exposed to callers.
//!
//! Resolution only reads; it never creates person records. There is no
//! caching: the same id may resolve differently over time as accounts and
//! records change, and call volume is low.

use sqlx::SqlitePool;
use vivaplan_common::db::models::{Reviewer, Student};
use vivaplan_common::db::{reviewers, students};
use vivaplan_common::{Error, Result};

/// Resolve a student by direct id, then by owning-account id
pub async fn find_student(db: &SqlitePool, candidate_id: &str) -> Result<Option<Student>> {
    if let Some(student) = students::get(db, candidate_id).await? {
        return Ok(Some(student));
    }
    students::get_by_account(db, candidate_id).await
}

/// Resolve a student, failing with `StudentNotFound` when both lookups miss
pub async fn resolve_student(db: &SqlitePool, candidate_id: &str) -> Result<Student> {
    find_student(db, candidate_id).await?.ok_or_else(|| Error::StudentNotFound {
        id: candidate_id.to_string(),
    })
}

/// Resolve a reviewer by direct id, then by owning-account id
pub async fn find_reviewer(db: &SqlitePool, candidate_id: &str) -> Result<Option<Reviewer>> {
    if let Some(reviewer) = reviewers::get(db, candidate_id).await? {
        return Ok(Some(reviewer));
    }
    reviewers::get_by_account(db, candidate_id).await
}

/// Resolve a reviewer, failing with `ReviewerNotFound` when both lookups miss
pub async fn resolve_reviewer(db: &SqlitePool, candidate_id: &str) -> Result<Reviewer> {
    find_reviewer(db, candidate_id).await?.ok_or_else(|| Error::ReviewerNotFound {
        id: candidate_id.to_string(),
    })
}
