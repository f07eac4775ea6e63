//! Integration tests for authentication endpoints

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = common::TestApp::new().await;

    let body = json!({ "username": "alice", "password": "SecurePassword123!" });
    let (status, response) = app.post("/api/v1/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!response["token"].as_str().unwrap().is_empty());
    assert_eq!(response["token_type"], "Bearer");
    assert_eq!(response["expires_in"], 600);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = common::TestApp::new().await;
    let body = json!({ "username": "bob", "password": "SecurePassword123!" }).to_string();

    let (status, _) = app.post("/api/v1/auth/register", &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.post("/api/v1/auth/register", &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_long_username() {
    let app = common::TestApp::new().await;
    let body = json!({ "username": "x".repeat(33), "password": "pw" });

    let (status, _) = app.post("/api/v1/auth/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_token_then_profile() {
    let app = common::TestApp::new().await;
    let credentials = json!({ "username": "carol", "password": "s3cret" }).to_string();
    app.post("/api/v1/auth/register", &credentials).await;

    let (status, response) = app.post("/api/v1/auth/token", &credentials).await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let token = response["token"].as_str().unwrap();

    let (status, profile) = app
        .request(Method::GET, "/api/v1/auth/me", Some(token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let profile: serde_json::Value = serde_json::from_str(&profile).unwrap();
    assert_eq!(profile["username"], "carol");
    assert!(profile.get("password_hash").is_none());
}

#[tokio::test]
async fn test_token_wrong_password() {
    let app = common::TestApp::new().await;
    app.post(
        "/api/v1/auth/register",
        &json!({ "username": "dave", "password": "right" }).to_string(),
    )
    .await;

    let (status, _) = app
        .post(
            "/api/v1/auth/token",
            &json!({ "username": "dave", "password": "wrong" }).to_string(),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_unknown_user() {
    let app = common::TestApp::new().await;
    let (status, _) = app
        .post(
            "/api/v1/auth/token",
            &json!({ "username": "nobody", "password": "whatever" }).to_string(),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password() {
    let app = common::TestApp::new().await;
    let (_, response) = app
        .post(
            "/api/v1/auth/register",
            &json!({ "username": "erin", "password": "old-pass" }).to_string(),
        )
        .await;
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let token = response["token"].as_str().unwrap().to_string();

    let change = json!({ "current_password": "old-pass", "new_password": "new-pass" });
    let (status, _) = app
        .request(
            Method::PUT,
            "/api/v1/auth/password",
            Some(&token),
            Some(&change.to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .post(
            "/api/v1/auth/token",
            &json!({ "username": "erin", "password": "new-pass" }).to_string(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/v1/auth/token",
            &json!({ "username": "erin", "password": "old-pass" }).to_string(),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_does_not_survive_restart() {
    let before = common::TestApp::new().await;
    let token = before.register_random().await;

    // A new app has a new ephemeral key, like a restarted process
    let after = common::TestApp::new().await;
    let (status, body) = after
        .request(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Invalid token"));
}
