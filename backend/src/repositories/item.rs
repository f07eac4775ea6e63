//! Catalog item repository

use crate::models::Item;
use anyhow::Result;
use sqlx::SqlitePool;

pub struct ItemRepository;

impl ItemRepository {
    pub async fn create(
        pool: &SqlitePool,
        name: &str,
        description: &str,
        category_id: Option<i64>,
    ) -> Result<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description, category_id)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, description, category_id
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(category_id)
        .fetch_one(pool)
        .await?;

        Ok(item)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, category_id
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    pub async fn list_by_category(pool: &SqlitePool, category_id: i64) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, category_id
            FROM items
            WHERE category_id = ?1
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// Delete an item; returns false when nothing matched
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
