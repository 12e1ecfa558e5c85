use std::sync::Arc;

use crate::auth::require_ownership;
use crate::database::models::{Comment, CommentDetail, NewComment};
use crate::database::{CommentStore, StoreError};
use crate::services::{ActivityRecorder, ServiceError};

pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    activity: ActivityRecorder,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, activity: ActivityRecorder) -> Self {
        Self { comments, activity }
    }

    /// The author is always the caller; client-supplied author ids never reach here.
    pub async fn create(
        &self,
        caller_id: i64,
        content: Option<String>,
        post_id: Option<i64>,
    ) -> Result<Comment, ServiceError> {
        let content = content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ServiceError::invalid_input("content is required"))?;
        let post_id = post_id
            .filter(|id| *id > 0)
            .ok_or_else(|| ServiceError::invalid_input("post_id is required"))?;

        let comment = self
            .comments
            .insert_comment(NewComment {
                content,
                post_id,
                author_id: caller_id,
            })
            .await
            .map_err(|e| match e {
                StoreError::ForeignKeyViolation(_) => ServiceError::not_found("post not found"),
                other => other.into(),
            })?;

        self.activity
            .record_best_effort(caller_id, &format!("User commented on POST with ID {}", post_id))
            .await;

        Ok(comment)
    }

    pub async fn get(&self, comment_id: i64) -> Result<CommentDetail, ServiceError> {
        self.comments
            .find_comment_detail(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("comment not found"))
    }

    pub async fn delete(&self, caller_id: i64, comment_id: i64) -> Result<(), ServiceError> {
        let comment = self
            .comments
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("comment not found"))?;

        require_ownership(comment.author_id, caller_id, "comment")?;

        self.comments.delete_comment(comment_id).await?;
        Ok(())
    }
}
