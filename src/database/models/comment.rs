use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
    pub author_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub post_id: i64,
    pub author_id: i64,
}

/// A comment listed under its post, joined with the author's display name
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PostComment {
    pub id: i64,
    pub content: String,
    pub author_id: i64,
    pub author_name: String,
}

/// A single comment joined with its parent post and author
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CommentDetail {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
    pub author_id: i64,
    pub post_content: String,
    pub author_name: String,
}

impl CommentDetail {
    pub fn comment(&self) -> Comment {
        Comment {
            id: self.id,
            content: self.content.clone(),
            post_id: self.post_id,
            author_id: self.author_id,
        }
    }
}
