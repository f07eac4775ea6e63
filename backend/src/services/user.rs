//! User service for registration, login and password changes
//!
//! Argon2 work is moved onto the blocking pool; token signing is cheap and
//! stays on the runtime.

use crate::auth::{PasswordService, TokenSigner};
use crate::error::ApiError;
use crate::models::User;
use crate::repositories::UserRepository;
use shoe_catalog_shared::validation::{validate_password, validate_username};
use shoe_catalog_shared::{AuthError, AuthToken, UserProfile};
use sqlx::SqlitePool;
use tracing::info;

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user and issue a token for it
    pub async fn register(
        pool: &SqlitePool,
        signer: &TokenSigner,
        username: &str,
        password: &str,
    ) -> Result<AuthToken, ApiError> {
        validate_username(username).map_err(ApiError::Validation)?;
        validate_password(password).map_err(ApiError::Validation)?;

        if UserRepository::username_exists(pool, username)
            .await
            .map_err(ApiError::from)?
        {
            return Err(username_taken());
        }

        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::from)?;

        // Another registration may have claimed the name while hashing
        let user = UserRepository::create(pool, username, &password_hash)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(username_taken)?;

        info!(user_id = user.id, "Registered user");
        Self::issue(signer, &user)
    }

    /// Exchange username and password for a token
    pub async fn login(
        pool: &SqlitePool,
        signer: &TokenSigner,
        username: &str,
        password: &str,
    ) -> Result<AuthToken, ApiError> {
        let user = UserRepository::find_by_username(pool, username)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(invalid_credentials)?;

        let (user, valid) = Self::check_password(user, password.to_string()).await?;
        if !valid {
            return Err(invalid_credentials());
        }

        Self::issue(signer, &user)
    }

    /// Verify the current password, then rehash and store the new one
    pub async fn change_password(
        pool: &SqlitePool,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        validate_password(new_password).map_err(ApiError::Validation)?;

        let user = Self::find(pool, user_id).await?;
        let (user, valid) = Self::check_password(user, current_password.to_string()).await?;
        if !valid {
            return Err(invalid_credentials());
        }

        let new_password = new_password.to_string();
        let user = tokio::task::spawn_blocking(move || {
            let mut user = user;
            user.hash_password(&new_password).map(|()| user)
        })
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Task join error: {}", e)))?
        .map_err(ApiError::from)?;

        let hash = user.password_hash.as_deref().unwrap_or_default();
        if !UserRepository::update_password_hash(pool, user.id, hash)
            .await
            .map_err(ApiError::from)?
        {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        info!(user_id = user.id, "Password changed");
        Ok(())
    }

    /// Get user profile
    pub async fn get_profile(pool: &SqlitePool, user_id: i64) -> Result<UserProfile, ApiError> {
        let user = Self::find(pool, user_id).await?;
        Ok(UserProfile {
            id: user.id,
            username: user.username,
        })
    }

    async fn find(pool: &SqlitePool, user_id: i64) -> Result<User, ApiError> {
        UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    async fn check_password(user: User, password: String) -> Result<(User, bool), ApiError> {
        tokio::task::spawn_blocking(move || {
            let valid = user.verify_password(&password);
            (user, valid)
        })
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Task join error: {}", e)))
    }

    fn issue(signer: &TokenSigner, user: &User) -> Result<AuthToken, ApiError> {
        let token = user
            .generate_auth_token(signer)
            .map_err(ApiError::from)?;

        Ok(AuthToken {
            token,
            token_type: "Bearer".to_string(),
            expires_in: signer.default_expiry_secs(),
        })
    }
}

fn username_taken() -> ApiError {
    ApiError::Conflict("Username already taken".to_string())
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized(AuthError::InvalidCredentials.to_string())
}
