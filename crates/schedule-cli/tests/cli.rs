//! CLI integration tests against a mock backend.

mod common;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli, run_cli_failure, run_cli_success, seed_credentials, stored_credentials};

fn api(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

#[tokio::test]
async fn test_login_persists_tokens_and_role() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/token/"))
        .and(body_json(json!({"username": "petrova", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "a1",
            "refresh": "r1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "username": "petrova",
            "role": "TEACHER"
        })))
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["login", "--username", "petrova", "--password", "secret"],
        &api(&server),
        temp.path(),
    )
    .await;

    assert!(stdout.contains("Logged in successfully"));
    assert!(stdout.contains("TEACHER"));

    let stored = stored_credentials(temp.path());
    assert_eq!(stored["accessToken"], "a1");
    assert_eq!(stored["refreshToken"], "r1");
    assert_eq!(stored["userRole"], "TEACHER");
}

#[tokio::test]
async fn test_login_failure_reports_backend_message() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&server)
        .await;

    let stderr = run_cli_failure(
        &["login", "--username", "petrova", "--password", "wrong"],
        &api(&server),
        temp.path(),
    )
    .await;

    assert!(stderr.contains("No active account found with the given credentials"));
    assert_eq!(stored_credentials(temp.path()), json!({}));
}

#[tokio::test]
async fn test_whoami_requires_login() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    let stderr = run_cli_failure(&["whoami"], &api(&server), temp.path()).await;
    assert!(stderr.contains("Not logged in"));
}

#[tokio::test]
async fn test_whoami_prints_user() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    seed_credentials(temp.path(), "a1", "r1");

    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "admin",
            "role": "ADMIN_DB"
        })))
        .mount(&server)
        .await;

    let stdout = run_cli_success(&["whoami"], &api(&server), temp.path()).await;

    assert!(stdout.contains("admin"));
    assert!(stdout.contains("ADMIN_DB"));
}

#[tokio::test]
async fn test_list_refreshes_expired_token() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    seed_credentials(temp.path(), "a1", "r1");

    Mock::given(method("GET"))
        .and(path("/api/rooms/"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .and(body_json(json!({"refresh": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "a2"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rooms/"))
        .and(header("authorization", "Bearer a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "number": "101"},
            {"id": 2, "number": "214"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(&["list", "rooms"], &api(&server), temp.path()).await;

    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("214"));

    let stored = stored_credentials(temp.path());
    assert_eq!(stored["accessToken"], "a2");
    assert_eq!(stored["refreshToken"], "r1");
}

#[tokio::test]
async fn test_rejected_refresh_asks_to_log_in_again() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    seed_credentials(temp.path(), "a1", "r1");

    Mock::given(method("GET"))
        .and(path("/api/groups/3/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is invalid or expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stderr = run_cli_failure(&["get", "groups", "3"], &api(&server), temp.path()).await;

    assert!(stderr.contains("Session expired"));
    assert_eq!(stored_credentials(temp.path()), json!({}));
}

#[tokio::test]
async fn test_create_sends_json_body() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    seed_credentials(temp.path(), "a1", "r1");

    Mock::given(method("POST"))
        .and(path("/api/departments/"))
        .and(body_json(json!({"name": "Mathematics"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5,
            "name": "Mathematics"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["create", "departments", "--data", r#"{"name": "Mathematics"}"#],
        &api(&server),
        temp.path(),
    )
    .await;

    assert!(stdout.contains(r#""id":5"#));
}

#[tokio::test]
async fn test_delete_accepts_empty_response() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    seed_credentials(temp.path(), "a1", "r1");

    Mock::given(method("DELETE"))
        .and(path("/api/lessons/12/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(&["delete", "lessons", "12"], &api(&server), temp.path()).await;
    assert!(stdout.contains("Deleted lessons 12"));
}

#[tokio::test]
async fn test_lessons_by_teacher_with_week() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/lessons/by_teacher/"))
        .and(query_param("teacher_id", "4"))
        .and(query_param("week", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["lessons", "--teacher", "4", "--week", "2"],
        &api(&server),
        temp.path(),
    )
    .await;
    assert_eq!(stdout.trim(), "[]");
}

#[tokio::test]
async fn test_lessons_needs_exactly_one_owner() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    let output = run_cli(
        &["lessons", "--group", "1", "--room", "2"],
        &api(&server),
        temp.path(),
    )
    .await;
    assert!(!output.status.success());

    let output = run_cli(&["lessons"], &api(&server), temp.path()).await;
    assert!(!output.status.success());
}

#[tokio::test]
async fn test_free_rooms_query() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/rooms/free/"))
        .and(query_param("start", "2024-09-02T08:30:00"))
        .and(query_param("end", "2024-09-02T10:00:00"))
        .and(query_param("type", "lab"))
        .and(query_param("capacity", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3}])))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &[
            "free-rooms",
            "--start",
            "2024-09-02T08:30",
            "--end",
            "2024-09-02 10:00",
            "--type",
            "lab",
            "--capacity",
            "20",
        ],
        &api(&server),
        temp.path(),
    )
    .await;
    assert!(stdout.contains(r#""id":3"#));
}

#[tokio::test]
async fn test_free_rooms_range_is_checked_by_backend() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/rooms/free/"))
        .and(query_param("start", "2024-09-02T10:00:00"))
        .and(query_param("end", "2024-09-02T08:30:00"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "End time must be after start time"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stderr = run_cli_failure(
        &[
            "free-rooms",
            "--start",
            "2024-09-02T10:00",
            "--end",
            "2024-09-02T08:30",
        ],
        &api(&server),
        temp.path(),
    )
    .await;

    assert!(stderr.contains("End time must be after start time"));
}

#[tokio::test]
async fn test_register_reports_field_errors() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "username": ["A user with that username already exists."],
            "password": ["This password is too short."]
        })))
        .mount(&server)
        .await;

    let stderr = run_cli_failure(
        &[
            "register",
            "--data",
            r#"{"username": "petrova", "password": "1"}"#,
        ],
        &api(&server),
        temp.path(),
    )
    .await;

    assert!(stderr.contains(
        "A user with that username already exists., This password is too short."
    ));
}

#[tokio::test]
async fn test_call_with_custom_header() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    seed_credentials(temp.path(), "a1", "r1");

    Mock::given(method("PUT"))
        .and(path("/api/rooms/2/"))
        .and(header("authorization", "Bearer a1"))
        .and(header("x-request-id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &[
            "call",
            "put",
            "/rooms/2/",
            "--data",
            r#"{"number": "202"}"#,
            "-H",
            "X-Request-Id: 42",
        ],
        &api(&server),
        temp.path(),
    )
    .await;
    assert!(stdout.contains(r#""id":2"#));
}

#[tokio::test]
async fn test_logout_clears_stored_credentials() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    seed_credentials(temp.path(), "a1", "r1");

    run_cli_success(&["logout"], &api(&server), temp.path()).await;

    assert_eq!(stored_credentials(temp.path()), json!({}));
}
