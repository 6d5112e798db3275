//! Integration tests for user endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

async fn create_role(app: &common::TestApp, prefix: &str) -> i32 {
    let body = json!({ "name": format!("{}-{}", prefix, Uuid::new_v4()) });
    let (status, response) = app.post("/roles", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    response["data"]["roleId"].as_i64().unwrap() as i32
}

fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, Uuid::new_v4())
}

async fn create_user(app: &common::TestApp, email: &str, role_id: i32) -> serde_json::Value {
    let body = json!({
        "fullName": "Test User",
        "email": email,
        "password": "secret1",
        "roleId": role_id
    });
    let (status, response) = app.post("/users", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&response).unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_user_returns_nested_role_without_hash() {
    let app = common::TestApp::new().await;

    let role_id = create_role(&app, "Members").await;
    let email = unique_email("create");
    let response = create_user(&app, &email, role_id).await;

    assert_eq!(response["success"], true);
    let data = &response["data"];
    assert!(data["userId"].as_i64().unwrap() > 0);
    assert_eq!(data["email"], email.as_str());
    assert_eq!(data["roleId"].as_i64().unwrap() as i32, role_id);
    assert_eq!(data["role"]["roleId"].as_i64().unwrap() as i32, role_id);
    // The password hash never leaves the service layer
    assert!(data.get("passwordHash").is_none());
    assert!(data.get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_user_with_duplicate_email_fails() {
    let app = common::TestApp::new().await;

    let role_id = create_role(&app, "Dup").await;
    let email = unique_email("dup");
    create_user(&app, &email, role_id).await;

    let body = json!({
        "fullName": "Another",
        "email": email,
        "password": "secret1",
        "roleId": role_id
    });
    let (status, response) = app.post("/users", &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["success"], false);

    // No second row was written
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_user_with_unknown_role_fails_before_write() {
    let app = common::TestApp::new().await;

    let email = unique_email("norole");
    let body = json!({
        "fullName": "No Role",
        "email": email,
        "password": "secret1",
        "roleId": 999999
    });
    let (status, response) = app.post("/users", &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["success"], false);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_get_user_by_id_and_not_found() {
    let app = common::TestApp::new().await;

    let role_id = create_role(&app, "Get").await;
    let email = unique_email("get");
    let created = create_user(&app, &email, role_id).await;
    let id = created["data"]["userId"].as_i64().unwrap();

    let (status, response) = app.get(&format!("/users/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["data"]["email"], email.as_str());

    let (status, _) = app.get("/users/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_list_users_by_role() {
    let app = common::TestApp::new().await;

    let role_id = create_role(&app, "Crew").await;
    let other_role_id = create_role(&app, "OtherCrew").await;
    let email = unique_email("crew");
    create_user(&app, &email, role_id).await;
    create_user(&app, &unique_email("other"), other_role_id).await;

    let (status, response) = app.get(&format!("/users/by-role/{}", role_id)).await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let users = response["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], email.as_str());

    // Unknown role yields an empty list, not a 404
    let (status, response) = app.get("/users/by-role/999999").await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["success"], true);
    assert!(response["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_user_without_password_keeps_hash() {
    let app = common::TestApp::new().await;

    let role_id = create_role(&app, "Keep").await;
    let email = unique_email("keep");
    let created = create_user(&app, &email, role_id).await;
    let id = created["data"]["userId"].as_i64().unwrap();

    let hash_before: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(id as i32)
        .fetch_one(&app.pool)
        .await
        .unwrap();

    let body = json!({
        "fullName": "Renamed User",
        "email": email,
        "roleId": role_id
    });
    let (status, _) = app.put(&format!("/users/{}", id), &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let hash_after: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(id as i32)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(hash_before, hash_after);

    // The original password still logs in
    let body = json!({ "email": email, "password": "secret1" });
    let (status, _) = app.post("/auth/login", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_user_with_password_replaces_hash() {
    let app = common::TestApp::new().await;

    let role_id = create_role(&app, "Rotate").await;
    let email = unique_email("rotate");
    let created = create_user(&app, &email, role_id).await;
    let id = created["data"]["userId"].as_i64().unwrap();

    let body = json!({
        "fullName": "Test User",
        "email": email,
        "password": "newsecret",
        "roleId": role_id
    });
    let (status, _) = app.put(&format!("/users/{}", id), &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    // Old password no longer verifies, new one does
    let body = json!({ "email": email, "password": "secret1" });
    let (status, _) = app.post("/auth/login", &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "email": email, "password": "newsecret" });
    let (status, _) = app.post("/auth/login", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_user_email_conflict_only_when_changed() {
    let app = common::TestApp::new().await;

    let role_id = create_role(&app, "Mail").await;
    let email_a = unique_email("mail_a");
    let email_b = unique_email("mail_b");
    create_user(&app, &email_a, role_id).await;
    let created = create_user(&app, &email_b, role_id).await;
    let id = created["data"]["userId"].as_i64().unwrap();

    // Changing to a taken email fails
    let body = json!({
        "fullName": "Test User",
        "email": email_a,
        "roleId": role_id
    });
    let (status, _) = app.put(&format!("/users/{}", id), &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Keeping the own email is fine
    let body = json!({
        "fullName": "Test User",
        "email": email_b,
        "roleId": role_id
    });
    let (status, _) = app.put(&format!("/users/{}", id), &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_user() {
    let app = common::TestApp::new().await;

    let role_id = create_role(&app, "Gone").await;
    let created = create_user(&app, &unique_email("gone"), role_id).await;
    let id = created["data"]["userId"].as_i64().unwrap();

    let (status, _) = app.delete(&format!("/users/{}", id)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete(&format!("/users/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
