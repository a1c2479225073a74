//! Reviewer store queries

use crate::db::models::Reviewer;
use crate::Result;
use sqlx::SqlitePool;

const COLUMNS: &str = "guid, family_name, given_name, specialty, account_id, department_id";

/// Look up a reviewer by primary id
pub async fn get(db: &SqlitePool, id: &str) -> Result<Option<Reviewer>> {
    let sql = format!("SELECT {COLUMNS} FROM reviewers WHERE guid = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

/// Look up a reviewer by the account that owns the record
pub async fn get_by_account(db: &SqlitePool, account_id: &str) -> Result<Option<Reviewer>> {
    let sql = format!("SELECT {COLUMNS} FROM reviewers WHERE account_id = ?");
    Ok(sqlx::query_as(&sql).bind(account_id).fetch_optional(db).await?)
}

/// Insert a reviewer row
pub async fn insert(db: &SqlitePool, reviewer: &Reviewer) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO reviewers (guid, family_name, given_name, specialty, account_id, department_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&reviewer.guid)
    .bind(&reviewer.family_name)
    .bind(&reviewer.given_name)
    .bind(&reviewer.specialty)
    .bind(&reviewer.account_id)
    .bind(&reviewer.department_id)
    .execute(db)
    .await?;

    Ok(())
}
