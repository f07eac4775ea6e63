//! Configuration management for the shoe catalog backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: CATALOG__)

use crate::auth::MAX_TOKEN_EXPIRY_SECS;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::error;

/// Minimum length of a configured signing secret in production
pub const MIN_SECRET_LEN: usize = 32;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

/// Token signing configuration
///
/// When `secret` is unset a random key is generated at startup, so tokens
/// stop verifying once the process restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub secret: Option<String>,
    pub token_expiry_secs: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: "sqlite://shoecatalog.db".to_string(),
                max_connections: 5,
                acquire_timeout_secs: default_acquire_timeout_secs(),
            },
            auth: AuthConfig {
                secret: None,
                token_expiry_secs: 600,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with CATALOG__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        Self::from_sources(
            config::File::with_name(&config_file).required(false),
            // e.g., CATALOG__SERVER__PORT=9000 sets server.port
            config::Environment::with_prefix("CATALOG").separator("__"),
        )
    }

    /// Layer a file source and an environment source over the defaults
    pub fn from_sources<F, E>(file: F, environment: E) -> Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
        E: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(file)
            .add_source(environment)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validate configuration for production deployment
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if let Some(secret) = &self.auth.secret {
            if secret.chars().count() < MIN_SECRET_LEN {
                errors.push("Auth secret must be at least 32 characters");
            }
        }

        if self.auth.token_expiry_secs <= 0 {
            errors.push("Token expiry must be positive");
        }

        if self.auth.token_expiry_secs > MAX_TOKEN_EXPIRY_SECS {
            errors.push("Token expiry must be at most 30 days");
        }

        if !errors.is_empty() {
            for err in &errors {
                error!("Configuration error: {}", err);
            }
            anyhow::bail!("Invalid production configuration: {}", errors.join("; "));
        }

        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
