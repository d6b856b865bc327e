use axum::{
    Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState};

/// Verified caller identity, resolved by the auth middleware and handed
/// to handlers as a request extension. The wrapped value is the user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity(pub i32);

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub api_key: String,
}

/// Authentication middleware. Accepts the API key from either:
/// 1. `X-Api-Key` header
/// 2. `Authorization: Bearer <api_key>` header
///
/// On success the resolved [`CallerIdentity`] is attached to the request.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let Some(api_key) = extract_api_key(&headers) else {
        return Err(ApiError::Unauthorized("Missing identity token".to_string()));
    };

    let user = state
        .store
        .verify_api_key(&api_key)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?;

    let Some(user) = user else {
        return Err(ApiError::Unauthorized("Invalid identity token".to_string()));
    };

    tracing::Span::current().record("user_id", user.id);
    request.extensions_mut().insert(CallerIdentity(user.id));

    Ok(next.run(request).await)
}

fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

/// POST /auth/login
/// Authenticate with username and password, returns the API key on success
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("username", "Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("password", "Password is required"));
    }

    let is_valid = state
        .store
        .verify_user_password(&payload.username, &payload.password)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?;

    if !is_valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let user = state
        .store
        .get_user_by_username(&payload.username)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to get user: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

    Ok(Json(LoginResponse {
        username: user.username,
        api_key: user.api_key,
    }))
}
