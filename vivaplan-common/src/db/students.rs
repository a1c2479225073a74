//! Student store queries
//!
//! Point lookups by primary id and by owning-account id. The service never
//! creates students; `insert` exists for seeding and fixtures.

use crate::db::models::Student;
use crate::Result;
use sqlx::SqlitePool;

const COLUMNS: &str =
    "guid, family_name, given_name, account_id, class_group_id, department_id, academic_year_id";

/// Look up a student by primary id
pub async fn get(db: &SqlitePool, id: &str) -> Result<Option<Student>> {
    let sql = format!("SELECT {COLUMNS} FROM students WHERE guid = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

/// Look up a student by the account that owns the record
pub async fn get_by_account(db: &SqlitePool, account_id: &str) -> Result<Option<Student>> {
    let sql = format!("SELECT {COLUMNS} FROM students WHERE account_id = ?");
    Ok(sqlx::query_as(&sql).bind(account_id).fetch_optional(db).await?)
}

/// Insert a student row
pub async fn insert(db: &SqlitePool, student: &Student) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO students (guid, family_name, given_name, account_id, class_group_id, department_id, academic_year_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&student.guid)
    .bind(&student.family_name)
    .bind(&student.given_name)
    .bind(&student.account_id)
    .bind(&student.class_group_id)
    .bind(&student.department_id)
    .bind(&student.academic_year_id)
    .execute(db)
    .await?;

    Ok(())
}
