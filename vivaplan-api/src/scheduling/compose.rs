//! Session and slot composition
//!
//! Write paths for the scheduling service. Every person reference entering a
//! write is resolved through [`resolve`](crate::scheduling::resolve) before
//! anything is persisted. A created session is reloaded with its
//! associations inside the same transaction, so callers always receive
//! materialized data and no concurrent reader can observe a session whose
//! reload failed.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::error;
use uuid::Uuid;
use vivaplan_common::db::models::{Session, SessionDetails, Slot};
use vivaplan_common::db::{sessions, slots};
use vivaplan_common::{Error, Result};

use crate::scheduling::resolve;

/// Request payload for creating a defense session
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    /// ISO calendar date (YYYY-MM-DD)
    pub date: String,
    /// Reviewer reference: a reviewer id or the owning account's id
    pub reviewer_id: String,
    pub department_id: String,
    pub class_group_id: String,
    pub academic_year_id: String,
}

/// Request payload for adding a slot to a session
#[derive(Debug, Clone, Deserialize)]
pub struct AddSlotRequest {
    /// Student reference: a student id or the owning account's id
    pub student_id: Option<String>,
    /// Accepted but never trusted: the slot inherits the parent session's
    /// date
    pub date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
}

/// Fields of a slot that may change after creation
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSlotRequest {
    pub subject: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Create a session with all four associations resolved and materialized
pub async fn create_session(db: &SqlitePool, req: CreateSessionRequest) -> Result<SessionDetails> {
    // Malformed dates are rejected before any store interaction
    let date: NaiveDate = req
        .date
        .parse()
        .map_err(|_| Error::InvalidDate(req.date.clone()))?;

    let reviewer = resolve::resolve_reviewer(db, &req.reviewer_id).await?;

    let session = Session {
        guid: Uuid::new_v4().to_string(),
        session_date: date,
        reviewer_id: reviewer.guid,
        department_id: req.department_id,
        class_group_id: req.class_group_id,
        academic_year_id: req.academic_year_id,
    };

    // Insert and reload as one unit: a dropped transaction leaves nothing
    // behind, so a session is never observable without a successful reload.
    let mut tx = db.begin().await?;

    match sessions::insert(&mut *tx, &session).await {
        Ok(()) => {}
        Err(Error::Database(e)) if is_foreign_key_violation(&e) => {
            return Err(Error::DanglingReference(
                "department, class group, or academic year does not exist".to_string(),
            ));
        }
        Err(e) => return Err(e),
    }

    let details = match sessions::get_with_associations(&mut *tx, &session.guid).await? {
        Some(details) => details,
        None => {
            error!(
                "session {} not visible to the reload immediately after insert",
                session.guid
            );
            return Err(Error::NotFoundAfterInsert(session.guid));
        }
    };

    tx.commit().await?;

    Ok(details)
}

/// Add a slot to an existing session
///
/// The slot's date is overwritten with the parent session's date regardless
/// of any caller-supplied value, and the slot links to the resolved
/// student's primary id, never the raw candidate id.
pub async fn add_slot(db: &SqlitePool, session_id: &str, req: AddSlotRequest) -> Result<Slot> {
    let session = sessions::get(db, session_id)
        .await?
        .ok_or_else(|| Error::SessionNotFound(session_id.to_string()))?;

    let student_ref = req.student_id.as_deref().ok_or(Error::StudentRequired)?;
    let student = resolve::resolve_student(db, student_ref).await?;

    let slot = Slot {
        guid: Uuid::new_v4().to_string(),
        session_id: session.guid,
        student_id: student.guid,
        slot_date: session.session_date,
        start_time: req.start_time,
        end_time: req.end_time,
        subject: req.subject,
    };

    slots::insert(db, &slot).await?;

    Ok(slot)
}

/// Overwrite a slot's subject and time range
///
/// Date, session linkage, and student linkage are never touched here.
pub async fn update_slot(db: &SqlitePool, slot_id: &str, req: UpdateSlotRequest) -> Result<Slot> {
    let mut slot = slots::get(db, slot_id)
        .await?
        .ok_or_else(|| Error::SlotNotFound(slot_id.to_string()))?;

    // TODO: reject time ranges that overlap another slot of the same
    // session; the schedule currently accepts them.
    slot.subject = req.subject;
    slot.start_time = req.start_time;
    slot.end_time = req.end_time;

    slots::update_times_and_subject(db, &slot.guid, &slot.subject, slot.start_time, slot.end_time)
        .await?;

    Ok(slot)
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        err.as_database_error().map(|db_err| db_err.kind()),
        Some(sqlx::error::ErrorKind::ForeignKeyViolation)
    )
}
