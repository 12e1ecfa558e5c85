// handlers/protected/posts.rs - /posts endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::database::models::Post;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::PostWithComments;
use crate::state::AppState;

use super::utils::parse_id;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentAuthor {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub content: String,
    pub author: CommentAuthor,
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub post: Post,
    pub comments: Vec<CommentView>,
}

impl From<PostWithComments> for PostView {
    fn from(value: PostWithComments) -> Self {
        let comments = value
            .comments
            .into_iter()
            .map(|c| CommentView {
                id: c.id,
                content: c.content,
                author: CommentAuthor {
                    id: c.author_id,
                    name: c.author_name,
                },
            })
            .collect();

        Self {
            post: value.post,
            comments,
        }
    }
}

/// POST /posts - Create a post owned by the caller
///
/// Blank or missing content is filled with a joke from the upstream joke API.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    let post = state
        .posts
        .create(auth.user_id, request.content, request.image_url)
        .await?;

    Ok(ApiResponse::created(json!({
        "message": "Post created successfully",
        "post": post,
    })))
}

/// GET /posts - All posts ordered by id
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Post>> {
    let posts = state.posts.list().await?;
    Ok(ApiResponse::success(posts))
}

/// GET /posts/:id - One post with its comments and their authors
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<PostView> {
    let post_id = parse_id(&id, "post")?;
    let post = state.posts.get(post_id).await?;
    Ok(ApiResponse::success(post.into()))
}

/// DELETE /posts/:id - Owner-only; comments are removed with the post
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let post_id = parse_id(&id, "post")?;
    state.posts.delete(auth.user_id, post_id).await?;

    tracing::info!(post_id, user_id = auth.user_id, "Post deleted");
    Ok(ApiResponse::success(json!({ "message": "Post deleted successfully" })))
}
