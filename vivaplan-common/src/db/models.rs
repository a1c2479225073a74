//! Database models

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Organizational department (reference entity)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Department {
    pub guid: String,
    pub name: String,
}

/// Class group (reference entity)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClassGroup {
    pub guid: String,
    pub name: String,
}

/// Academic year (reference entity)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AcademicYear {
    pub guid: String,
    pub label: String,
}

/// Student record, possibly owned by a separate login account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub guid: String,
    pub family_name: String,
    pub given_name: String,
    /// Id of the owning account; distinct from `guid` and may be absent
    pub account_id: Option<String>,
    pub class_group_id: Option<String>,
    pub department_id: Option<String>,
    pub academic_year_id: Option<String>,
}

/// Reviewer record, possibly owned by a separate login account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reviewer {
    pub guid: String,
    pub family_name: String,
    pub given_name: String,
    pub specialty: String,
    /// Id of the owning account; distinct from `guid` and may be absent
    pub account_id: Option<String>,
    pub department_id: Option<String>,
}

/// Defense session: a date, a supervising reviewer, and the classification
/// keys that bind it to a cohort of students
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub guid: String,
    pub session_date: NaiveDate,
    pub reviewer_id: String,
    pub department_id: String,
    pub class_group_id: String,
    pub academic_year_id: String,
}

/// One student's time allocation within a session
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Slot {
    pub guid: String,
    pub session_id: String,
    pub student_id: String,
    /// Always equals the parent session's date
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
}

/// A session with its associations materialized by the store.
///
/// Association fields are optional at read time even though the write path
/// requires them: rows predating the current write path may lack references,
/// and readers project what is present rather than failing.
#[derive(Debug, Clone)]
pub struct SessionDetails {
    pub session: Session,
    pub reviewer: Option<Reviewer>,
    /// The reviewer's own department, when the reviewer carries one
    pub reviewer_department: Option<Department>,
    pub department: Option<Department>,
    pub class_group: Option<ClassGroup>,
    pub academic_year: Option<AcademicYear>,
}

/// A slot with its parent session pre-loaded
#[derive(Debug, Clone)]
pub struct SlotWithSession {
    pub slot: Slot,
    /// Absent only for orphaned rows; readers skip those
    pub session: Option<Session>,
}
