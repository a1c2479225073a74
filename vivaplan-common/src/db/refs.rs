//! Reference entity store queries (departments, class groups, academic years)

use crate::db::models::{AcademicYear, ClassGroup, Department};
use crate::Result;
use sqlx::SqlitePool;

/// Look up a department by id
pub async fn get_department(db: &SqlitePool, id: &str) -> Result<Option<Department>> {
    Ok(
        sqlx::query_as("SELECT guid, name FROM departments WHERE guid = ?")
            .bind(id)
            .fetch_optional(db)
            .await?,
    )
}

/// Look up a class group by id
pub async fn get_class_group(db: &SqlitePool, id: &str) -> Result<Option<ClassGroup>> {
    Ok(
        sqlx::query_as("SELECT guid, name FROM class_groups WHERE guid = ?")
            .bind(id)
            .fetch_optional(db)
            .await?,
    )
}

/// Look up an academic year by id
pub async fn get_academic_year(db: &SqlitePool, id: &str) -> Result<Option<AcademicYear>> {
    Ok(
        sqlx::query_as("SELECT guid, label FROM academic_years WHERE guid = ?")
            .bind(id)
            .fetch_optional(db)
            .await?,
    )
}

/// Insert a department row
pub async fn insert_department(db: &SqlitePool, department: &Department) -> Result<()> {
    sqlx::query("INSERT INTO departments (guid, name) VALUES (?, ?)")
        .bind(&department.guid)
        .bind(&department.name)
        .execute(db)
        .await?;

    Ok(())
}

/// Insert a class group row
pub async fn insert_class_group(db: &SqlitePool, class_group: &ClassGroup) -> Result<()> {
    sqlx::query("INSERT INTO class_groups (guid, name) VALUES (?, ?)")
        .bind(&class_group.guid)
        .bind(&class_group.name)
        .execute(db)
        .await?;

    Ok(())
}

/// Insert an academic year row
pub async fn insert_academic_year(db: &SqlitePool, academic_year: &AcademicYear) -> Result<()> {
    sqlx::query("INSERT INTO academic_years (guid, label) VALUES (?, ?)")
        .bind(&academic_year.guid)
        .bind(&academic_year.label)
        .execute(db)
        .await?;

    Ok(())
}
