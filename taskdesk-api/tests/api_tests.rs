/// HTTP-level tests for the TaskDesk API
///
/// Each test drives the real router over its own temporary database.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use serde_json::json;

#[tokio::test]
async fn test_health_reports_connected_and_migrated() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["migrations"]["up_to_date"], true);
}

#[tokio::test]
async fn test_bob_scenario() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post_json("/signup", json!({"username": "bob", "password": "x123"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created");

    let (status, body) = ctx
        .post_json("/signup", json!({"username": "bob", "password": "y456"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate_username");

    let (status, body) = ctx
        .post_json("/login", json!({"username": "bob", "password": "x123"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert!(body["user_id"].is_i64());

    let (status, body) = ctx
        .post_json("/login", json!({"username": "bob", "password": "wrong"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");

    let (status, body) = ctx
        .post_json("/tasks", json!({"username": "bob", "title": "write report"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Task added");

    let (status, body) = ctx.get("/tasks/bob").await;
    assert_eq!(status, StatusCode::OK);
    let tasks = body.as_array().expect("Expected a JSON array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "write report");
    assert_eq!(tasks[0]["completed"], false);
    assert!(tasks[0]["id"].is_i64());
    assert!(tasks[0]["user_id"].is_i64());
}

#[tokio::test]
async fn test_signup_missing_fields_is_validation_error() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.post_json("/signup", json!({"username": "bob"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "password");

    let (status, body) = ctx
        .post_json("/signup", json!({"username": "", "password": ""}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_login_failures_share_one_classification() {
    let ctx = TestContext::new().await.unwrap();

    ctx.post_json("/signup", json!({"username": "erin", "password": "pw"}))
        .await;

    let wrong_password = ctx
        .post_json("/login", json!({"username": "erin", "password": "nope"}))
        .await;
    let unknown_user = ctx
        .post_json("/login", json!({"username": "nobody", "password": "pw"}))
        .await;
    let missing_fields = ctx.post_json("/login", json!({})).await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password, missing_fields);
}

#[tokio::test]
async fn test_add_task_errors() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post_json("/tasks", json!({"username": "ghost", "title": "haunt"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user_not_found");

    let (status, body) = ctx.post_json("/tasks", json!({"username": "ghost"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "title");
}

#[tokio::test]
async fn test_list_tasks_unknown_and_empty() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.get("/tasks/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user_not_found");

    ctx.post_json("/signup", json!({"username": "idle", "password": "pw"}))
        .await;

    let (status, body) = ctx.get("/tasks/idle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_tasks_is_repeatable() {
    let ctx = TestContext::new().await.unwrap();

    ctx.post_json("/signup", json!({"username": "alice", "password": "pw"}))
        .await;
    for title in ["buy milk", "call mom"] {
        let (status, _) = ctx
            .post_json("/tasks", json!({"username": "alice", "title": title}))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let first = ctx.get("/tasks/alice").await;
    let second = ctx.get("/tasks/alice").await;
    assert_eq!(first, second);

    let titles: Vec<&str> = first
        .1
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["buy milk", "call mom"]);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/signup")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = ctx.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}
