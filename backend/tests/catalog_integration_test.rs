//! Integration tests for catalog endpoints

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

async fn create_category(app: &common::TestApp, token: &str, name: &str) -> Value {
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/categories",
            Some(token),
            Some(&json!({ "name": name }).to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    serde_json::from_str(&body).unwrap()
}

async fn create_item(app: &common::TestApp, token: &str, category_id: i64, name: &str) -> Value {
    let (status, body) = app
        .request(
            Method::POST,
            &format!("/api/v1/categories/{}/items", category_id),
            Some(token),
            Some(&json!({ "name": name, "description": "Running shoe" }).to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_category_serialization_shape() {
    let app = common::TestApp::new().await;
    let token = app.register_random().await;

    let category = create_category(&app, &token, "Shoes").await;
    let id = category["id"].as_i64().unwrap();
    assert_eq!(category, json!({ "id": id, "name": "Shoes" }));

    let (status, body) = app.get(&format!("/api/v1/categories/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "id": id, "name": "Shoes" })
    );
}

#[tokio::test]
async fn test_item_serialization_omits_category() {
    let app = common::TestApp::new().await;
    let token = app.register_random().await;
    let category_id = create_category(&app, &token, "Shoes").await["id"]
        .as_i64()
        .unwrap();

    let item = create_item(&app, &token, category_id, "Sneaker").await;
    let item_id = item["id"].as_i64().unwrap();
    let expected = json!({ "id": item_id, "name": "Sneaker", "description": "Running shoe" });
    assert_eq!(item, expected);

    let (status, body) = app.get(&format!("/api/v1/items/{}", item_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), expected);

    let (status, body) = app
        .get(&format!("/api/v1/categories/{}/items", category_id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([expected]));
}

#[tokio::test]
async fn test_list_categories_sorted_by_name() {
    let app = common::TestApp::new().await;
    let token = app.register_random().await;
    create_category(&app, &token, "Sandals").await;
    create_category(&app, &token, "Boots").await;

    let (status, body) = app.get("/api/v1/categories").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<String> = serde_json::from_str::<Vec<Value>>(&body)
        .unwrap()
        .into_iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Boots", "Sandals"]);
}

#[tokio::test]
async fn test_missing_records_are_404() {
    let app = common::TestApp::new().await;
    let token = app.register_random().await;

    assert_eq!(app.get("/api/v1/categories/41").await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/v1/categories/41/items").await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/v1/items/41").await.0, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/categories/41/items",
            Some(&token),
            Some(&json!({ "name": "Ghost", "description": "None" }).to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_writes_require_token() {
    let app = common::TestApp::new().await;
    let (status, _) = app
        .post("/api/v1/categories", &json!({ "name": "Shoes" }).to_string())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blank_category_name_rejected() {
    let app = common::TestApp::new().await;
    let token = app.register_random().await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/categories",
            Some(&token),
            Some(&json!({ "name": "" }).to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_item() {
    let app = common::TestApp::new().await;
    let token = app.register_random().await;
    let category_id = create_category(&app, &token, "Shoes").await["id"]
        .as_i64()
        .unwrap();
    let item_id = create_item(&app, &token, category_id, "Clog").await["id"]
        .as_i64()
        .unwrap();
    let path = format!("/api/v1/items/{}", item_id);

    let (status, _) = app.request(Method::DELETE, &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.request(Method::DELETE, &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storage_failure_reports_database_error() {
    let app = common::TestApp::new().await;
    sqlx::query("DROP TABLE items")
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, body) = app.get("/api/v1/items/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    assert!(!body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("no such table"));
}
