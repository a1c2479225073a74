//! Response view assembly
//!
//! Pure projections from store entities to API response shapes. These
//! functions operate only on associations already materialized by the store
//! and perform no I/O. Absent associations are omitted from the response
//! rather than treated as errors: rows predating the current write path may
//! lack references even though the write path requires them.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use vivaplan_common::db::models::{Department, SessionDetails, Slot};

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassGroupSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AcademicYearSummary {
    pub id: String,
    pub label: String,
}

/// Reviewer projection, nesting the reviewer's own department when present
#[derive(Debug, Clone, Serialize)]
pub struct ReviewerSummary {
    pub id: String,
    pub family_name: String,
    pub given_name: String,
    pub specialty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentSummary>,
}

/// Full session response shape
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<ReviewerSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_group: Option<ClassGroupSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<AcademicYearSummary>,
}

/// Lightweight slot projection for person-scoped listings
#[derive(Debug, Clone, Serialize)]
pub struct SlotSummary {
    pub student_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
}

/// Project a materialized session into its response shape
pub fn session_response(details: &SessionDetails) -> SessionResponse {
    let reviewer = details.reviewer.as_ref().map(|r| ReviewerSummary {
        id: r.guid.clone(),
        family_name: r.family_name.clone(),
        given_name: r.given_name.clone(),
        specialty: r.specialty.clone(),
        department: details.reviewer_department.as_ref().map(department_summary),
    });

    SessionResponse {
        id: details.session.guid.clone(),
        date: details.session.session_date,
        reviewer,
        department: details.department.as_ref().map(department_summary),
        class_group: details.class_group.as_ref().map(|g| ClassGroupSummary {
            id: g.guid.clone(),
            name: g.name.clone(),
        }),
        academic_year: details.academic_year.as_ref().map(|y| AcademicYearSummary {
            id: y.guid.clone(),
            label: y.label.clone(),
        }),
    }
}

fn department_summary(department: &Department) -> DepartmentSummary {
    DepartmentSummary {
        id: department.guid.clone(),
        name: department.name.clone(),
    }
}

/// Project a slot into its lightweight summary shape
pub fn slot_summary(slot: &Slot) -> SlotSummary {
    SlotSummary {
        student_id: slot.student_id.clone(),
        date: slot.slot_date,
        start_time: slot.start_time,
        end_time: slot.end_time,
        subject: slot.subject.clone(),
    }
}
