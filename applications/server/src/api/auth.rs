/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    services::auth::TokenPair,
    state::AppState,
};
use axum::{extract::State, Json};
use mixtape_core::{NewUser, PlaylistStore, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Returned by both register and login: the safe user plus a token pair
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: User,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>> {
    if req.password.trim().is_empty() {
        return Err(ServerError::BadRequest("password is required".to_string()));
    }

    let password_hash = app_state.auth_service.hash_password(&req.password)?;
    let user = app_state
        .store
        .create_user(NewUser {
            username: req.username.trim().to_string(),
            password_hash,
            display_name: req.display_name.trim().to_string(),
            avatar_url: req.avatar_url.trim().to_string(),
        })
        .await?;

    let tokens = app_state.auth_service.issue_tokens(&user.id)?;
    Ok(Json(SessionResponse { user, tokens }))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let credentials = app_state
        .store
        .credentials(&req.username)
        .await?
        .ok_or_else(|| ServerError::Auth("Invalid username or password".to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &credentials.password_hash)?
    {
        return Err(ServerError::Auth("Invalid username or password".to_string()));
    }

    let user = app_state
        .store
        .find_user(&credentials.user_id)
        .await?
        .ok_or_else(|| ServerError::Auth("Invalid username or password".to_string()))?;

    let tokens = app_state.auth_service.issue_tokens(&user.id)?;
    Ok(Json(SessionResponse { user, tokens }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    // Verify refresh token
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    // Create new access token
    let access_token = app_state.auth_service.create_access_token(&user_id)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}
