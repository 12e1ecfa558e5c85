use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{
    Activity, Comment, CommentDetail, NewComment, NewPost, NewUser, Post, PostComment, User,
};

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Storage-level failures, classified so services can map them to domain errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Referenced row does not exist: {0}")]
    ForeignKeyViolation(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return StoreError::UniqueViolation(constraint),
                Some(FOREIGN_KEY_VIOLATION) => return StoreError::ForeignKeyViolation(constraint),
                _ => {}
            }
        }
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Sqlx(other),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return the generated id
    async fn insert_user(&self, user: NewUser) -> Result<i64, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert_post(&self, post: NewPost) -> Result<Post, StoreError>;

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    async fn find_post(&self, id: i64) -> Result<Option<Post>, StoreError>;

    async fn list_post_comments(&self, post_id: i64) -> Result<Vec<PostComment>, StoreError>;

    /// Delete a post together with its comments
    async fn delete_post(&self, id: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError>;

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError>;

    async fn find_comment_detail(&self, id: i64) -> Result<Option<CommentDetail>, StoreError>;

    async fn delete_comment(&self, id: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn insert_activity(&self, user_id: i64, description: &str) -> Result<(), StoreError>;

    async fn list_activities(&self, user_id: i64) -> Result<Vec<Activity>, StoreError>;
}

/// Convenience bound for backends that serve every table
pub trait Store: UserStore + PostStore + CommentStore + ActivityStore {}

impl<T> Store for T where T: UserStore + PostStore + CommentStore + ActivityStore {}
