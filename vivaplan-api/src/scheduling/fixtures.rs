//! Shared in-memory database fixtures for scheduling tests

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;
use vivaplan_common::db::models::{AcademicYear, ClassGroup, Department, Reviewer, Student};
use vivaplan_common::db::{create_schema, refs, reviewers, students};

/// In-memory pool pinned to a single connection so every query sees the
/// same database, with foreign keys enforced as in production.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();
    create_schema(&pool).await.unwrap();
    pool
}

/// Insert a department / class group / academic year triple
pub async fn seed_refs(db: &SqlitePool) -> (Department, ClassGroup, AcademicYear) {
    let department = Department {
        guid: Uuid::new_v4().to_string(),
        name: "Computer Science".to_string(),
    };
    let class_group = ClassGroup {
        guid: Uuid::new_v4().to_string(),
        name: "CS-3A".to_string(),
    };
    let academic_year = AcademicYear {
        guid: Uuid::new_v4().to_string(),
        label: "2024-2025".to_string(),
    };
    refs::insert_department(db, &department).await.unwrap();
    refs::insert_class_group(db, &class_group).await.unwrap();
    refs::insert_academic_year(db, &academic_year).await.unwrap();
    (department, class_group, academic_year)
}

/// Build a student record with a fresh account id, without inserting it
pub fn student_record(keys: Option<(&str, &str, &str)>) -> Student {
    Student {
        guid: Uuid::new_v4().to_string(),
        family_name: "Haddad".to_string(),
        given_name: "Lina".to_string(),
        account_id: Some(Uuid::new_v4().to_string()),
        class_group_id: keys.map(|(group, _, _)| group.to_string()),
        department_id: keys.map(|(_, dept, _)| dept.to_string()),
        academic_year_id: keys.map(|(_, _, year)| year.to_string()),
    }
}

pub async fn insert_student(db: &SqlitePool, student: &Student) {
    students::insert(db, student).await.unwrap();
}

/// Insert a student; `keys` carries (class_group_id, department_id,
/// academic_year_id) when the classification should be complete
pub async fn seed_student(db: &SqlitePool, keys: Option<(&str, &str, &str)>) -> Student {
    let student = student_record(keys);
    insert_student(db, &student).await;
    student
}

/// Insert a reviewer with a fresh account id
pub async fn seed_reviewer(db: &SqlitePool, department_id: Option<String>) -> Reviewer {
    let reviewer = Reviewer {
        guid: Uuid::new_v4().to_string(),
        family_name: "Mansour".to_string(),
        given_name: "Karim".to_string(),
        specialty: "Distributed systems".to_string(),
        account_id: Some(Uuid::new_v4().to_string()),
        department_id,
    };
    reviewers::insert(db, &reviewer).await.unwrap();
    reviewer
}
