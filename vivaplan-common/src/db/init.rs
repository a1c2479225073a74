//! Database initialization
//!
//! Creates the connection pool and the schema on first run. All DDL is
//! idempotent (`CREATE TABLE IF NOT EXISTS`) so startup is safe against an
//! existing database file.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Foreign keys must be enforced on every connection: session and slot
    // rows reference reviewers, students, and the classification entities,
    // and a dangling direct reference must be rejected at persist time.
    // WAL allows concurrent readers with one writer.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes (idempotent, safe to call multiple times)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // Reference entities first, then the rows that point at them
    create_departments_table(pool).await?;
    create_class_groups_table(pool).await?;
    create_academic_years_table(pool).await?;
    create_students_table(pool).await?;
    create_reviewers_table(pool).await?;
    create_sessions_table(pool).await?;
    create_slots_table(pool).await?;

    Ok(())
}

async fn create_departments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS departments (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_class_groups_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS class_groups (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_academic_years_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS academic_years (
            guid TEXT PRIMARY KEY,
            label TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the students table
///
/// A student row may be owned by a login account (`account_id`) distinct
/// from the student id itself. Classification keys are nullable: production
/// data may be partially populated.
async fn create_students_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            guid TEXT PRIMARY KEY,
            family_name TEXT NOT NULL,
            given_name TEXT NOT NULL,
            account_id TEXT UNIQUE,
            class_group_id TEXT REFERENCES class_groups(guid),
            department_id TEXT REFERENCES departments(guid),
            academic_year_id TEXT REFERENCES academic_years(guid),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_account ON students(account_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_reviewers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviewers (
            guid TEXT PRIMARY KEY,
            family_name TEXT NOT NULL,
            given_name TEXT NOT NULL,
            specialty TEXT NOT NULL DEFAULT '',
            account_id TEXT UNIQUE,
            department_id TEXT REFERENCES departments(guid),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reviewers_account ON reviewers(account_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the sessions table
///
/// All four associations are required at creation; the write path resolves
/// them before any insert, so a NULL here never occurs through the service.
async fn create_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            guid TEXT PRIMARY KEY,
            session_date TEXT NOT NULL,
            reviewer_id TEXT NOT NULL REFERENCES reviewers(guid),
            department_id TEXT NOT NULL REFERENCES departments(guid),
            class_group_id TEXT NOT NULL REFERENCES class_groups(guid),
            academic_year_id TEXT NOT NULL REFERENCES academic_years(guid),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_reviewer ON sessions(reviewer_id)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_sessions_keys ON sessions(class_group_id, department_id, academic_year_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the slots table
///
/// `slot_date` always equals the parent session's date; the write path
/// copies it on insert rather than trusting the caller.
async fn create_slots_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slots (
            guid TEXT PRIMARY KEY,
            session_id TEXT NOT NULL REFERENCES sessions(guid) ON DELETE CASCADE,
            student_id TEXT NOT NULL REFERENCES students(guid),
            slot_date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            subject TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_slots_session ON slots(session_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_slots_student ON slots(student_id)")
        .execute(pool)
        .await?;

    Ok(())
}
