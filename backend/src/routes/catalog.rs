//! Catalog routes
//!
//! Reads are public; writes need a bearer token.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shoe_catalog_shared::{CategoryView, CreateCategoryRequest, CreateItemRequest, ItemView};
use tracing::debug;

/// Create catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:id", get(get_category))
        .route("/categories/:id/items", get(list_items).post(create_item))
        .route("/items/:id", get(get_item).delete(delete_item))
}

/// GET /api/v1/categories
async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<CategoryView>>> {
    Ok(Json(CatalogService::list_categories(state.db()).await?))
}

/// POST /api/v1/categories
async fn create_category(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryView>)> {
    debug!(user_id = auth_user.user_id, "Creating category");
    let category = CatalogService::create_category(state.db(), &req.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/categories/:id
async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CategoryView>> {
    Ok(Json(CatalogService::get_category(state.db(), id).await?))
}

/// GET /api/v1/categories/:id/items
async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<ItemView>>> {
    Ok(Json(CatalogService::list_items(state.db(), id).await?))
}

/// POST /api/v1/categories/:id/items
async fn create_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<ItemView>)> {
    debug!(user_id = auth_user.user_id, category_id = id, "Creating item");
    let item = CatalogService::create_item(state.db(), id, &req.name, &req.description).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/items/:id
async fn get_item(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<ItemView>> {
    Ok(Json(CatalogService::get_item(state.db(), id).await?))
}

/// DELETE /api/v1/items/:id
async fn delete_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    debug!(user_id = auth_user.user_id, item_id = id, "Deleting item");
    CatalogService::delete_item(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
