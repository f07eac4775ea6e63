//! Catalog service: categories and the items filed under them

use crate::error::ApiError;
use crate::models::Category;
use crate::repositories::{CategoryRepository, ItemRepository};
use shoe_catalog_shared::validation::{validate_description, validate_name};
use shoe_catalog_shared::{CategoryView, ItemView};
use sqlx::SqlitePool;
use tracing::info;

pub struct CatalogService;

impl CatalogService {
    pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<CategoryView>, ApiError> {
        let categories = CategoryRepository::list(pool)
            .await
            .map_err(ApiError::from)?;
        Ok(categories.into_iter().map(CategoryView::from).collect())
    }

    pub async fn get_category(pool: &SqlitePool, id: i64) -> Result<CategoryView, ApiError> {
        Ok(Self::find_category(pool, id).await?.into())
    }

    pub async fn create_category(pool: &SqlitePool, name: &str) -> Result<CategoryView, ApiError> {
        validate_name(name).map_err(ApiError::Validation)?;

        let category = CategoryRepository::create(pool, name)
            .await
            .map_err(ApiError::from)?;

        info!(category_id = category.id, "Created category");
        Ok(category.into())
    }

    /// Items of one category; 404 when the category does not exist
    pub async fn list_items(pool: &SqlitePool, category_id: i64) -> Result<Vec<ItemView>, ApiError> {
        let category = Self::find_category(pool, category_id).await?;
        let items = ItemRepository::list_by_category(pool, category.id)
            .await
            .map_err(ApiError::from)?;
        Ok(items.into_iter().map(ItemView::from).collect())
    }

    pub async fn get_item(pool: &SqlitePool, id: i64) -> Result<ItemView, ApiError> {
        let item = ItemRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;
        Ok(item.into())
    }

    pub async fn create_item(
        pool: &SqlitePool,
        category_id: i64,
        name: &str,
        description: &str,
    ) -> Result<ItemView, ApiError> {
        validate_name(name).map_err(ApiError::Validation)?;
        validate_description(description).map_err(ApiError::Validation)?;
        let category = Self::find_category(pool, category_id).await?;

        let item = ItemRepository::create(pool, name, description, Some(category.id))
            .await
            .map_err(ApiError::from)?;

        info!(item_id = item.id, category_id = category.id, "Created item");
        Ok(item.into())
    }

    pub async fn delete_item(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
        if !ItemRepository::delete(pool, id)
            .await
            .map_err(ApiError::from)?
        {
            return Err(ApiError::NotFound("Item not found".to_string()));
        }

        info!(item_id = id, "Deleted item");
        Ok(())
    }

    async fn find_category(pool: &SqlitePool, id: i64) -> Result<Category, ApiError> {
        CategoryRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))
    }
}
