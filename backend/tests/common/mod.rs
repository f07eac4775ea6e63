//! Common test utilities for integration tests
//!
//! Each [`TestApp`] owns a fresh, migrated in-memory SQLite database.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use fake::{
    faker::internet::en::{Password, Username},
    Fake,
};
use shoe_catalog_backend::{config::AppConfig, db, routes, state::AppState};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = db::create_memory_pool()
            .await
            .expect("Failed to open in-memory database");
        db::prepare(&pool).await.expect("Failed to prepare schema");

        let state = AppState::new(pool.clone(), AppConfig::default());
        let app = routes::create_router(state.clone());

        Self { app, pool, state }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.request(Method::GET, path, None, None).await
    }

    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.request(Method::POST, path, None, Some(body)).await
    }

    /// Register a random user and return its token
    pub async fn register_random(&self) -> String {
        let username: String = Username().fake();
        let password: String = Password(8..20).fake();
        let body = serde_json::json!({ "username": username, "password": password });

        let (status, response) = self.post("/api/v1/auth/register", &body.to_string()).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", response);

        let response: serde_json::Value = serde_json::from_str(&response).unwrap();
        response["token"].as_str().unwrap().to_string()
    }
}
