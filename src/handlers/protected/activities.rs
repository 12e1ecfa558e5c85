use axum::extract::State;

use crate::database::models::Activity;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /activities - The caller's own audit trail, oldest first
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Vec<Activity>> {
    let activities = state.activity.list_for_user(auth.user_id).await?;
    Ok(ApiResponse::success(activities))
}
