//! User repository for database operations

use crate::models::User;
use anyhow::Result;
use sqlx::SqlitePool;

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Insert a user with an already computed password hash
    ///
    /// The name check and the insert are one statement, so concurrent
    /// registrations cannot both claim a username. Returns `None` when the
    /// name is already taken.
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (username, password_hash)
            SELECT ?1, ?2
            WHERE NOT EXISTS (SELECT 1 FROM "user" WHERE username = ?1)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM "user"
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by username
    ///
    /// The username index is not unique; the oldest account wins.
    pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM "user"
            WHERE username = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Check if a username is taken
    pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM "user" WHERE username = ?1)
            "#,
        )
        .bind(username)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Persist a new password hash; returns false when the user is gone
    pub async fn update_password_hash(
        pool: &SqlitePool,
        id: i64,
        password_hash: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE "user" SET password_hash = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
