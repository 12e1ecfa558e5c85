// handlers/public/auth/register.rs - POST /users/register handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::validate_registration;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub age: Option<i32>,
}

/// POST /users/register - Register new user account
///
/// Expected Input:
/// ```json
/// {
///   "full_name": "string",
///   "email": "string",
///   "username": "string",
///   "password": "string",
///   "age": 30
/// }
/// ```
///
/// Responds 201 with `{ message, user_id, email }`, 400 on invalid fields and
/// 409 when the email or username is taken.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    let registration = validate_registration(request)?;
    let email = registration.email.clone();

    let user_id = state.credentials.register(registration).await?;
    tracing::info!(user_id, "User registered");

    Ok(ApiResponse::created(json!({
        "message": "User registered successfully",
        "user_id": user_id,
        "email": email,
    })))
}
