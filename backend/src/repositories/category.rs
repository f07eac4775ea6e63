//! Category repository

use crate::models::Category;
use anyhow::Result;
use sqlx::SqlitePool;

pub struct CategoryRepository;

impl CategoryRepository {
    pub async fn create(pool: &SqlitePool, name: &str) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO category (name)
            VALUES (?1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name FROM category WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }

    /// All categories ordered by name
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name FROM category ORDER BY name, id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }
}
