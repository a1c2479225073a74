//! Slot store queries
//!
//! `list_by_student` pre-loads the parent session on every row so the
//! slot-to-session fallback chain never issues per-row lookups.

use crate::db::models::{Session, Slot, SlotWithSession};
use crate::Result;
use chrono::NaiveTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const COLUMNS: &str = "guid, session_id, student_id, slot_date, start_time, end_time, subject";

/// Look up a slot by primary id
pub async fn get(db: &SqlitePool, id: &str) -> Result<Option<Slot>> {
    let sql = format!("SELECT {COLUMNS} FROM slots WHERE guid = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

/// Insert a slot row
pub async fn insert(db: &SqlitePool, slot: &Slot) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO slots (guid, session_id, student_id, slot_date, start_time, end_time, subject)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&slot.guid)
    .bind(&slot.session_id)
    .bind(&slot.student_id)
    .bind(slot.slot_date)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(&slot.subject)
    .execute(db)
    .await?;

    Ok(())
}

/// Overwrite the mutable fields of a slot: subject, start time, end time.
///
/// Date, session linkage, and student linkage are deliberately not part of
/// this statement.
pub async fn update_times_and_subject(
    db: &SqlitePool,
    id: &str,
    subject: &str,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<()> {
    sqlx::query(
        "UPDATE slots SET subject = ?, start_time = ?, end_time = ?, updated_at = CURRENT_TIMESTAMP
         WHERE guid = ?",
    )
    .bind(subject)
    .bind(start_time)
    .bind(end_time)
    .bind(id)
    .execute(db)
    .await?;

    Ok(())
}

/// Slots of one session, ordered by start time
pub async fn list_by_session(db: &SqlitePool, session_id: &str) -> Result<Vec<Slot>> {
    let sql = format!("SELECT {COLUMNS} FROM slots WHERE session_id = ? ORDER BY start_time, guid");
    Ok(sqlx::query_as(&sql)
        .bind(session_id)
        .fetch_all(db)
        .await?)
}

/// Slots of one student with the parent session pre-loaded, ordered by
/// date then start time
pub async fn list_by_student(db: &SqlitePool, student_id: &str) -> Result<Vec<SlotWithSession>> {
    let rows = sqlx::query(
        r#"
        SELECT
            t.guid, t.session_id, t.student_id, t.slot_date, t.start_time, t.end_time, t.subject,
            s.guid AS s_guid, s.session_date AS s_session_date, s.reviewer_id AS s_reviewer_id,
            s.department_id AS s_department_id, s.class_group_id AS s_class_group_id,
            s.academic_year_id AS s_academic_year_id
        FROM slots t
        LEFT JOIN sessions s ON s.guid = t.session_id
        WHERE t.student_id = ?
        ORDER BY t.slot_date, t.start_time, t.guid
        "#,
    )
    .bind(student_id)
    .fetch_all(db)
    .await?;

    rows.iter().map(slot_with_session_from_row).collect()
}

fn slot_with_session_from_row(row: &SqliteRow) -> Result<SlotWithSession> {
    let slot = Slot {
        guid: row.try_get("guid")?,
        session_id: row.try_get("session_id")?,
        student_id: row.try_get("student_id")?,
        slot_date: row.try_get("slot_date")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        subject: row.try_get("subject")?,
    };

    let session = match row.try_get::<Option<String>, _>("s_guid")? {
        Some(guid) => Some(Session {
            guid,
            session_date: row.try_get("s_session_date")?,
            reviewer_id: row.try_get("s_reviewer_id")?,
            department_id: row.try_get("s_department_id")?,
            class_group_id: row.try_get("s_class_group_id")?,
            academic_year_id: row.try_get("s_academic_year_id")?,
        }),
        None => None,
    };

    Ok(SlotWithSession { slot, session })
}
