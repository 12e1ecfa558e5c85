// handlers/protected/comments.rs - /comments endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::database::models::{Comment, CommentDetail};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::utils::parse_id;

/// Any `author_id` in the body is ignored; the caller is the author.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
    pub post_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub id: i64,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct AuthorSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub comment: Comment,
    pub post: PostSummary,
    pub author: AuthorSummary,
}

impl From<CommentDetail> for CommentView {
    fn from(detail: CommentDetail) -> Self {
        Self {
            comment: detail.comment(),
            post: PostSummary {
                id: detail.post_id,
                content: detail.post_content,
            },
            author: AuthorSummary {
                id: detail.author_id,
                name: detail.author_name,
            },
        }
    }
}

/// POST /comments - Comment on an existing post
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    let comment = state
        .comments
        .create(auth.user_id, request.content, request.post_id)
        .await?;

    Ok(ApiResponse::created(json!({
        "message": "Comment created successfully",
        "comment": comment,
    })))
}

/// GET /comments/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<CommentView> {
    let comment_id = parse_id(&id, "comment")?;
    let detail = state.comments.get(comment_id).await?;
    Ok(ApiResponse::success(detail.into()))
}

/// DELETE /comments/:id - Author-only
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let comment_id = parse_id(&id, "comment")?;
    state.comments.delete(auth.user_id, comment_id).await?;

    tracing::info!(comment_id, user_id = auth.user_id, "Comment deleted");
    Ok(ApiResponse::success(json!({ "message": "Comment deleted successfully" })))
}
