use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub content: String,
    pub image_url: String,
    pub user_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub content: String,
    pub image_url: String,
    pub user_id: i64,
}
