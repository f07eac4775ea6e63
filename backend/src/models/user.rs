//! User record and its credential operations

use crate::auth::{PasswordService, TokenSigner};
use anyhow::Result;
use tracing::warn;

/// Row of the `user` table
///
/// `password_hash` is `None` until [`User::hash_password`] has run.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: Option<String>,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: None,
        }
    }

    /// Replace the stored hash with a salted hash of `password`
    ///
    /// Blocking; run on the blocking pool from async code.
    pub fn hash_password(&mut self, password: &str) -> Result<()> {
        self.password_hash = Some(PasswordService::hash(password)?);
        Ok(())
    }

    /// Check a candidate password against the stored hash
    ///
    /// A missing or unreadable stored hash never matches.
    pub fn verify_password(&self, password: &str) -> bool {
        let Some(hash) = self.password_hash.as_deref() else {
            return false;
        };

        match PasswordService::verify(password, hash) {
            Ok(valid) => valid,
            Err(e) => {
                warn!(user_id = self.id, error = %e, "Stored password hash is malformed");
                false
            }
        }
    }

    /// Issue an auth token for this user with the signer's default lifetime
    pub fn generate_auth_token(&self, signer: &TokenSigner) -> Result<String> {
        signer.issue_default(self.id)
    }

    /// Issue an auth token for this user valid for `expiration_secs`
    pub fn generate_auth_token_with_expiry(
        &self,
        signer: &TokenSigner,
        expiration_secs: i64,
    ) -> Result<String> {
        signer.issue(self.id, expiration_secs)
    }

    /// Resolve a token to the user id it was issued for
    ///
    /// Expired and invalid tokens both give `None`; use
    /// [`TokenSigner::verify`] to tell them apart.
    pub fn verify_auth_token(signer: &TokenSigner, token: &str) -> Option<i64> {
        signer.verify(token).user_id()
    }
}
