// handlers/public/auth/login.rs - POST /users/login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /users/login - Authenticate user and receive JWT token
///
/// Unknown email and wrong password both answer 401 with the same message.
/// The token carries the user id and expires after the configured lifetime.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) = payload?;

    let email = request
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("email is required"))?;
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("password is required"))?;

    let (user_id, _) = state.credentials.verify_credentials(&email, &password).await?;
    let token = state.tokens.issue(user_id)?;

    tracing::info!(user_id, "User logged in");
    Ok(ApiResponse::success(LoginResponse { token }))
}
