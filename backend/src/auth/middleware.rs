//! Authentication extractor
//!
//! Validates the bearer token against the signer held in [`AppState`] and
//! yields the authenticated user id. Expired and invalid tokens are both
//! rejected with 401, but with distinct messages.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use shoe_catalog_shared::AuthError;
use tracing::debug;

/// Authenticated user extracted from the `Authorization` header
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Pull the raw token out of a `Bearer` authorization header
pub fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized(AuthError::MissingToken.to_string()))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = bearer_token(parts)?;

        app_state
            .tokens()
            .verify(token)
            .into_result()
            .map(|user_id| AuthUser { user_id })
            .map_err(|reason| {
                debug!(%reason, "Rejected bearer token");
                ApiError::Unauthorized(reason.to_string())
            })
    }
}
