//! Session store queries
//!
//! All list queries return fully-joined `SessionDetails` rows so readers
//! never chase associations afterwards. The same LEFT-JOIN select backs the
//! post-insert reload and every list variant.

use crate::db::models::{AcademicYear, ClassGroup, Department, Reviewer, Session, SessionDetails};
use crate::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const DETAILS_SELECT: &str = r#"
SELECT
    s.guid, s.session_date, s.reviewer_id, s.department_id, s.class_group_id, s.academic_year_id,
    r.guid AS r_guid, r.family_name AS r_family_name, r.given_name AS r_given_name,
    r.specialty AS r_specialty, r.account_id AS r_account_id, r.department_id AS r_department_id,
    rd.guid AS rd_guid, rd.name AS rd_name,
    d.guid AS d_guid, d.name AS d_name,
    g.guid AS g_guid, g.name AS g_name,
    y.guid AS y_guid, y.label AS y_label
FROM sessions s
LEFT JOIN reviewers r ON r.guid = s.reviewer_id
LEFT JOIN departments rd ON rd.guid = r.department_id
LEFT JOIN departments d ON d.guid = s.department_id
LEFT JOIN class_groups g ON g.guid = s.class_group_id
LEFT JOIN academic_years y ON y.guid = s.academic_year_id
"#;

/// Insert a session row
///
/// Takes any executor so the create path can run it inside the same
/// transaction as the associations-reload.
pub async fn insert(executor: impl sqlx::SqliteExecutor<'_>, session: &Session) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO sessions (guid, session_date, reviewer_id, department_id, class_group_id, academic_year_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&session.guid)
    .bind(session.session_date)
    .bind(&session.reviewer_id)
    .bind(&session.department_id)
    .bind(&session.class_group_id)
    .bind(&session.academic_year_id)
    .execute(executor)
    .await?;

    Ok(())
}

/// Look up a session row (no associations) by id
pub async fn get(db: &SqlitePool, id: &str) -> Result<Option<Session>> {
    Ok(sqlx::query_as(
        "SELECT guid, session_date, reviewer_id, department_id, class_group_id, academic_year_id
         FROM sessions WHERE guid = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?)
}

/// Look up a session by id with every association materialized
pub async fn get_with_associations(
    executor: impl sqlx::SqliteExecutor<'_>,
    id: &str,
) -> Result<Option<SessionDetails>> {
    let sql = format!("{DETAILS_SELECT} WHERE s.guid = ?");
    let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;

    match row {
        Some(row) => Ok(Some(details_from_row(&row)?)),
        None => Ok(None),
    }
}

/// All sessions with associations, ordered by date
pub async fn list_all(db: &SqlitePool) -> Result<Vec<SessionDetails>> {
    let sql = format!("{DETAILS_SELECT} ORDER BY s.session_date, s.guid");
    let rows = sqlx::query(&sql).fetch_all(db).await?;

    rows.iter().map(details_from_row).collect()
}

/// Sessions supervised by the given reviewer id
pub async fn list_by_reviewer(db: &SqlitePool, reviewer_id: &str) -> Result<Vec<SessionDetails>> {
    let sql = format!("{DETAILS_SELECT} WHERE s.reviewer_id = ? ORDER BY s.session_date, s.guid");
    let rows = sqlx::query(&sql).bind(reviewer_id).fetch_all(db).await?;

    rows.iter().map(details_from_row).collect()
}

/// Sessions matching an exact classification 3-tuple
pub async fn list_by_keys(
    db: &SqlitePool,
    class_group_id: &str,
    department_id: &str,
    academic_year_id: &str,
) -> Result<Vec<SessionDetails>> {
    let sql = format!(
        "{DETAILS_SELECT} WHERE s.class_group_id = ? AND s.department_id = ? AND s.academic_year_id = ?
         ORDER BY s.session_date, s.guid"
    );
    let rows = sqlx::query(&sql)
        .bind(class_group_id)
        .bind(department_id)
        .bind(academic_year_id)
        .fetch_all(db)
        .await?;

    rows.iter().map(details_from_row).collect()
}

/// Map one joined row to a `SessionDetails`
///
/// Every association side of the LEFT JOIN is read through its aliased guid
/// first; a NULL guid means the association is absent.
fn details_from_row(row: &SqliteRow) -> Result<SessionDetails> {
    let session = Session {
        guid: row.try_get("guid")?,
        session_date: row.try_get("session_date")?,
        reviewer_id: row.try_get("reviewer_id")?,
        department_id: row.try_get("department_id")?,
        class_group_id: row.try_get("class_group_id")?,
        academic_year_id: row.try_get("academic_year_id")?,
    };

    let reviewer = match row.try_get::<Option<String>, _>("r_guid")? {
        Some(guid) => Some(Reviewer {
            guid,
            family_name: row.try_get("r_family_name")?,
            given_name: row.try_get("r_given_name")?,
            specialty: row.try_get("r_specialty")?,
            account_id: row.try_get("r_account_id")?,
            department_id: row.try_get("r_department_id")?,
        }),
        None => None,
    };

    let reviewer_department = match row.try_get::<Option<String>, _>("rd_guid")? {
        Some(guid) => Some(Department {
            guid,
            name: row.try_get("rd_name")?,
        }),
        None => None,
    };

    let department = match row.try_get::<Option<String>, _>("d_guid")? {
        Some(guid) => Some(Department {
            guid,
            name: row.try_get("d_name")?,
        }),
        None => None,
    };

    let class_group = match row.try_get::<Option<String>, _>("g_guid")? {
        Some(guid) => Some(ClassGroup {
            guid,
            name: row.try_get("g_name")?,
        }),
        None => None,
    };

    let academic_year = match row.try_get::<Option<String>, _>("y_guid")? {
        Some(guid) => Some(AcademicYear {
            guid,
            label: row.try_get("y_label")?,
        }),
        None => None,
    };

    Ok(SessionDetails {
        session,
        reviewer,
        reviewer_department,
        department,
        class_group,
        academic_year,
    })
}
