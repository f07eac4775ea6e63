//! Application state management
//!
//! Shared resources passed to handlers through Axum's state extraction.
//! Everything in here is built once at startup and read-only afterwards.

use crate::auth::TokenSigner;
use crate::config::AppConfig;
use secrecy::SecretString;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::warn;

/// Shared application state
///
/// All fields are cheap to clone: the pool and signer are internally
/// reference counted and the config is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Signing key for auth tokens
    pub tokens: TokenSigner,
}

impl AppState {
    /// Build state, deriving the token signer from `config.auth`
    ///
    /// Without a configured secret a random key is generated here, so
    /// tokens issued by this process stop verifying after a restart.
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let expiry = config.auth.token_expiry_secs;
        let tokens = match config.auth.secret.clone() {
            Some(secret) => TokenSigner::new(&SecretString::new(secret), expiry),
            None => {
                warn!("No auth secret configured; using an ephemeral signing key");
                TokenSigner::with_random_secret(expiry)
            }
        };

        Self::with_signer(db, config, tokens)
    }

    /// Build state around an existing signer
    pub fn with_signer(db: SqlitePool, config: AppConfig, tokens: TokenSigner) -> Self {
        Self {
            db,
            config: Arc::new(config),
            tokens,
        }
    }

    #[inline]
    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn tokens(&self) -> &TokenSigner {
        &self.tokens
    }
}
