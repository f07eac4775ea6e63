//! Authentication routes
//!
//! Registration, token issuance, profile and password change.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use shoe_catalog_shared::{AuthToken, ChangePasswordRequest, CredentialsRequest, UserProfile};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(issue_token))
        .route("/me", get(get_profile))
        .route("/password", put(change_password))
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<AuthToken>)> {
    let token = UserService::register(state.db(), state.tokens(), &req.username, &req.password).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// POST /api/v1/auth/token
async fn issue_token(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<AuthToken>> {
    let token = UserService::login(state.db(), state.tokens(), &req.username, &req.password).await?;
    Ok(Json(token))
}

/// GET /api/v1/auth/me
async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<UserProfile>> {
    let profile = UserService::get_profile(state.db(), auth_user.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/auth/password
async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    UserService::change_password(
        state.db(),
        auth_user.user_id,
        &req.current_password,
        &req.new_password,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
