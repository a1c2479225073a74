//! Session lookup with documented fallback order
//!
//! Read paths absorb failed person resolution into fallback attempts and
//! surface empty results, with one exception: `sessions_for_student` needs a
//! concrete subject and errors when the student cannot be resolved at all.
//! Every call is a fresh, idempotent resolution; nothing is cached across
//! calls.

use std::collections::HashSet;

use sqlx::SqlitePool;
use vivaplan_common::db::models::Slot;
use vivaplan_common::db::{reviewers, sessions, slots, students};
use vivaplan_common::{Error, Result};

use crate::scheduling::resolve;
use crate::scheduling::view::{self, SessionResponse, SlotSummary};

/// All sessions as response views
pub async fn all_sessions(db: &SqlitePool) -> Result<Vec<SessionResponse>> {
    Ok(sessions::list_all(db)
        .await?
        .iter()
        .map(view::session_response)
        .collect())
}

/// One session as a response view
pub async fn session_by_id(db: &SqlitePool, id: &str) -> Result<SessionResponse> {
    let details = sessions::get_with_associations(db, id)
        .await?
        .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

    Ok(view::session_response(&details))
}

/// The slots belonging to one session, ordered by start time
pub async fn slots_for_session(db: &SqlitePool, session_id: &str) -> Result<Vec<Slot>> {
    slots::list_by_session(db, session_id).await
}

/// Slots for a student referenced by an ambiguous id
///
/// The id is used as a student id first; when that yields nothing it is
/// re-read as an owning-account id and the query re-runs. Nothing found by
/// either path is an empty sequence, not an error.
pub async fn slots_for_student(db: &SqlitePool, candidate_id: &str) -> Result<Vec<SlotSummary>> {
    let mut found = slots::list_by_student(db, candidate_id).await?;

    if found.is_empty() {
        if let Some(student) = students::get_by_account(db, candidate_id).await? {
            found = slots::list_by_student(db, &student.guid).await?;
        }
    }

    Ok(found.iter().map(|row| view::slot_summary(&row.slot)).collect())
}

/// Sessions a student should attend
///
/// When the student's classification keys (class group, department, academic
/// year) are complete, sessions matching that exact 3-tuple win. When the
/// keys are incomplete, or the 3-tuple matches nothing, the student's slot
/// chain remains authoritative: slots are projected to their parent sessions
/// and deduplicated in first-seen order. Production data may carry
/// inconsistent or partially-populated keys while the slots stay correct.
pub async fn sessions_for_student(
    db: &SqlitePool,
    candidate_id: &str,
) -> Result<Vec<SessionResponse>> {
    let student = resolve::resolve_student(db, candidate_id).await?;

    if let (Some(group), Some(dept), Some(year)) = (
        student.class_group_id.as_deref(),
        student.department_id.as_deref(),
        student.academic_year_id.as_deref(),
    ) {
        let matched = sessions::list_by_keys(db, group, dept, year).await?;
        if !matched.is_empty() {
            return Ok(matched.iter().map(view::session_response).collect());
        }
    }

    sessions_from_slots(db, &student.guid).await
}

/// Sessions supervised by a reviewer referenced by an ambiguous id
///
/// The id is used as a reviewer id first; when that yields nothing it is
/// re-read as an owning-account id and the query re-runs against the
/// resolved reviewer. A miss on both paths is an empty sequence, never an
/// error: a reviewer legitimately may have zero sessions.
pub async fn sessions_for_reviewer(
    db: &SqlitePool,
    candidate_id: &str,
) -> Result<Vec<SessionResponse>> {
    let direct = sessions::list_by_reviewer(db, candidate_id).await?;
    if !direct.is_empty() {
        return Ok(direct.iter().map(view::session_response).collect());
    }

    if let Some(reviewer) = reviewers::get_by_account(db, candidate_id).await? {
        let via_account = sessions::list_by_reviewer(db, &reviewer.guid).await?;
        return Ok(via_account.iter().map(view::session_response).collect());
    }

    Ok(Vec::new())
}

/// Project a student's slots onto their parent sessions, deduplicated by
/// session id in first-seen order
async fn sessions_from_slots(db: &SqlitePool, student_id: &str) -> Result<Vec<SessionResponse>> {
    let slot_rows = slots::list_by_student(db, student_id).await?;

    let mut seen = HashSet::new();
    let mut responses = Vec::new();
    for row in &slot_rows {
        let session = match &row.session {
            Some(session) => session,
            None => continue,
        };
        if !seen.insert(session.guid.clone()) {
            continue;
        }
        if let Some(details) = sessions::get_with_associations(db, &session.guid).await? {
            responses.push(view::session_response(&details));
        }
    }

    Ok(responses)
}
