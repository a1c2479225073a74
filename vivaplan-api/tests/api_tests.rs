//! Integration tests for the vivaplan-api HTTP endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Session creation (date parsing, ambiguous reviewer references,
//!   dangling classification references)
//! - Slot creation and update (date inheritance, field immutability)
//! - Person-scoped lookups (student/reviewer ambiguous ids, fallbacks)

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method
use uuid::Uuid;
use vivaplan_api::{build_router, AppState};
use vivaplan_common::db::models::{AcademicYear, ClassGroup, Department, Reviewer, Student};
use vivaplan_common::db::{create_schema, refs, reviewers, students};

/// Test helper: In-memory database pinned to a single connection so every
/// query sees the same schema, with foreign keys enforced as in production
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should connect to in-memory database");
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Should enable foreign keys");
    create_schema(&pool).await.expect("Should create schema");
    pool
}

fn setup_app(db: SqlitePool) -> axum::Router {
    build_router(AppState::new(db))
}

/// Test helper: Request with optional JSON body
fn test_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

struct Fixture {
    department: Department,
    class_group: ClassGroup,
    academic_year: AcademicYear,
    reviewer: Reviewer,
    student: Student,
}

/// Seed one of everything a session needs, plus a student with an account
async fn seed(db: &SqlitePool) -> Fixture {
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

    let reviewer = Reviewer {
        guid: Uuid::new_v4().to_string(),
        family_name: "Mansour".to_string(),
        given_name: "Karim".to_string(),
        specialty: "Distributed systems".to_string(),
        account_id: Some(Uuid::new_v4().to_string()),
        department_id: Some(department.guid.clone()),
    };
    reviewers::insert(db, &reviewer).await.unwrap();

    let student = Student {
        guid: Uuid::new_v4().to_string(),
        family_name: "Haddad".to_string(),
        given_name: "Lina".to_string(),
        account_id: Some(Uuid::new_v4().to_string()),
        class_group_id: None,
        department_id: None,
        academic_year_id: None,
    };
    students::insert(db, &student).await.unwrap();

    Fixture {
        department,
        class_group,
        academic_year,
        reviewer,
        student,
    }
}

fn create_session_body(fixture: &Fixture, reviewer_ref: &str) -> Value {
    json!({
        "date": "2025-06-10",
        "reviewer_id": reviewer_ref,
        "department_id": fixture.department.guid,
        "class_group_id": fixture.class_group.guid,
        "academic_year_id": fixture.academic_year.guid,
    })
}

async fn create_session(app: &axum::Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(test_request("POST", "/api/sessions", Some(body)))
        .await
        .unwrap();
    let status = response.status();
    let json = extract_json(response.into_body()).await;
    (status, json)
}

// =============================================================================
// Health Endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let response = app
        .oneshot(test_request("GET", "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "vivaplan-api");
    assert!(body["version"].is_string());
}

// =============================================================================
// Session Creation
// =============================================================================

#[tokio::test]
async fn test_create_session_returns_materialized_view() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db);

    let (status, body) =
        create_session(&app, create_session_body(&fixture, &fixture.reviewer.guid)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["date"], "2025-06-10");
    assert_eq!(body["reviewer"]["family_name"], "Mansour");
    assert_eq!(body["reviewer"]["specialty"], "Distributed systems");
    assert_eq!(body["reviewer"]["department"]["name"], "Computer Science");
    assert_eq!(body["department"]["id"], fixture.department.guid.as_str());
    assert_eq!(body["class_group"]["name"], "CS-3A");
    assert_eq!(body["academic_year"]["label"], "2024-2025");
}

#[tokio::test]
async fn test_create_session_accepts_reviewer_account_id() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db);

    let account = fixture.reviewer.account_id.clone().unwrap();
    let (status, body) = create_session(&app, create_session_body(&fixture, &account)).await;

    assert_eq!(status, StatusCode::CREATED);
    // The response carries the resolved reviewer record, not the account id
    assert_eq!(body["reviewer"]["id"], fixture.reviewer.guid.as_str());
}

#[tokio::test]
async fn test_create_session_rejects_malformed_date() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db);

    let mut body = create_session_body(&fixture, &fixture.reviewer.guid);
    body["date"] = json!("not-a-date");
    let (status, body) = create_session(&app, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid date"));
}

#[tokio::test]
async fn test_create_session_unknown_reviewer_is_404() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db);

    let (status, body) = create_session(&app, create_session_body(&fixture, "ghost")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Reviewer not found"));
}

#[tokio::test]
async fn test_create_session_dangling_department_is_400() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db.clone());

    let mut body = create_session_body(&fixture, &fixture.reviewer.guid);
    body["department_id"] = json!("no-such-department");
    let (status, _) = create_session(&app, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing observable was left behind
    let response = app
        .oneshot(test_request("GET", "/api/sessions", None))
        .await
        .unwrap();
    let sessions = extract_json(response.into_body()).await;
    assert_eq!(sessions.as_array().unwrap().len(), 0);
}

// =============================================================================
// Slots
// =============================================================================

#[tokio::test]
async fn test_add_slot_inherits_session_date() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db);

    let (_, session) =
        create_session(&app, create_session_body(&fixture, &fixture.reviewer.guid)).await;
    let session_id = session["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(test_request(
            "POST",
            &format!("/api/sessions/{session_id}/slots"),
            Some(json!({
                "student_id": fixture.student.guid,
                // Contradicts the session date on purpose
                "date": "2030-01-01",
                "start_time": "09:00:00",
                "end_time": "09:30:00",
                "subject": "Compiler backend",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let slot = extract_json(response.into_body()).await;
    assert_eq!(slot["slot_date"], "2025-06-10");
    assert_eq!(slot["student_id"], fixture.student.guid.as_str());

    // Visible through the session's slot listing
    let response = app
        .oneshot(test_request(
            "GET",
            &format!("/api/sessions/{session_id}/slots"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let slots = extract_json(response.into_body()).await;
    assert_eq!(slots.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_slot_without_student_is_400() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db);

    let (_, session) =
        create_session(&app, create_session_body(&fixture, &fixture.reviewer.guid)).await;
    let session_id = session["id"].as_str().unwrap();

    let response = app
        .oneshot(test_request(
            "POST",
            &format!("/api/sessions/{session_id}/slots"),
            Some(json!({
                "start_time": "09:00:00",
                "end_time": "09:30:00",
                "subject": "Compiler backend",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_slot_to_missing_session_is_404() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db);

    let response = app
        .oneshot(test_request(
            "POST",
            "/api/sessions/no-such-session/slots",
            Some(json!({
                "student_id": fixture.student.guid,
                "start_time": "09:00:00",
                "end_time": "09:30:00",
                "subject": "Compiler backend",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_slot_changes_only_subject_and_times() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db);

    let (_, session) =
        create_session(&app, create_session_body(&fixture, &fixture.reviewer.guid)).await;
    let session_id = session["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(test_request(
            "POST",
            &format!("/api/sessions/{session_id}/slots"),
            Some(json!({
                "student_id": fixture.student.guid,
                "start_time": "09:00:00",
                "end_time": "09:30:00",
                "subject": "Compiler backend",
            })),
        ))
        .await
        .unwrap();
    let created = extract_json(response.into_body()).await;
    let slot_id = created["guid"].as_str().unwrap();

    let response = app
        .oneshot(test_request(
            "PUT",
            &format!("/api/slots/{slot_id}"),
            Some(json!({
                "subject": "Query planner",
                "start_time": "14:00:00",
                "end_time": "14:45:00",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = extract_json(response.into_body()).await;
    assert_eq!(updated["subject"], "Query planner");
    assert_eq!(updated["start_time"], "14:00:00");
    assert_eq!(updated["end_time"], "14:45:00");
    assert_eq!(updated["slot_date"], created["slot_date"]);
    assert_eq!(updated["session_id"], created["session_id"]);
    assert_eq!(updated["student_id"], created["student_id"]);
}

// =============================================================================
// Person-Scoped Lookups
// =============================================================================

#[tokio::test]
async fn test_student_slots_by_account_id_match_record_id() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db);

    let (_, session) =
        create_session(&app, create_session_body(&fixture, &fixture.reviewer.guid)).await;
    let session_id = session["id"].as_str().unwrap();

    app.clone()
        .oneshot(test_request(
            "POST",
            &format!("/api/sessions/{session_id}/slots"),
            Some(json!({
                "student_id": fixture.student.guid,
                "start_time": "09:00:00",
                "end_time": "09:30:00",
                "subject": "Compiler backend",
            })),
        ))
        .await
        .unwrap();

    let by_id = app
        .clone()
        .oneshot(test_request(
            "GET",
            &format!("/api/students/{}/slots", fixture.student.guid),
            None,
        ))
        .await
        .unwrap();
    let by_id = extract_json(by_id.into_body()).await;

    let account = fixture.student.account_id.as_deref().unwrap();
    let by_account = app
        .oneshot(test_request(
            "GET",
            &format!("/api/students/{account}/slots"),
            None,
        ))
        .await
        .unwrap();
    let by_account = extract_json(by_account.into_body()).await;

    assert_eq!(by_id, by_account);
    assert_eq!(by_id.as_array().unwrap().len(), 1);
    assert_eq!(by_id[0]["subject"], "Compiler backend");
}

#[tokio::test]
async fn test_student_sessions_deduplicates_via_slot_chain() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db);

    // Two sessions; the student (incomplete classification keys) has two
    // slots in the first and one in the second
    let (_, session_a) =
        create_session(&app, create_session_body(&fixture, &fixture.reviewer.guid)).await;
    let mut body = create_session_body(&fixture, &fixture.reviewer.guid);
    body["date"] = json!("2025-06-11");
    let (_, session_b) = create_session(&app, body).await;

    for (session, hour) in [(&session_a, "09"), (&session_a, "10"), (&session_b, "09")] {
        let session_id = session["id"].as_str().unwrap();
        app.clone()
            .oneshot(test_request(
                "POST",
                &format!("/api/sessions/{session_id}/slots"),
                Some(json!({
                    "student_id": fixture.student.guid,
                    "start_time": format!("{hour}:00:00"),
                    "end_time": format!("{hour}:30:00"),
                    "subject": "Compiler backend",
                })),
            ))
            .await
            .unwrap();
    }

    let account = fixture.student.account_id.as_deref().unwrap();
    let response = app
        .oneshot(test_request(
            "GET",
            &format!("/api/students/{account}/sessions"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let found = extract_json(response.into_body()).await;
    let ids: Vec<&str> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            session_a["id"].as_str().unwrap(),
            session_b["id"].as_str().unwrap()
        ]
    );
}

#[tokio::test]
async fn test_unknown_student_sessions_is_404() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let response = app
        .oneshot(test_request("GET", "/api/students/ghost/sessions", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_reviewer_sessions_is_empty_200() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let response = app
        .oneshot(test_request("GET", "/api/reviewers/ghost/sessions", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let found = extract_json(response.into_body()).await;
    assert_eq!(found.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_reviewer_sessions_by_account_id() {
    let db = setup_test_db().await;
    let fixture = seed(&db).await;
    let app = setup_app(db);

    create_session(&app, create_session_body(&fixture, &fixture.reviewer.guid)).await;

    let account = fixture.reviewer.account_id.as_deref().unwrap();
    let response = app
        .oneshot(test_request(
            "GET",
            &format!("/api/reviewers/{account}/sessions"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let found = extract_json(response.into_body()).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(
        found[0]["reviewer"]["id"],
        fixture.reviewer.guid.as_str()
    );
}

#[tokio::test]
async fn test_get_session_missing_is_404() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let response = app
        .oneshot(test_request("GET", "/api/sessions/ghost", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
