use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::{
    Activity, Comment, CommentDetail, NewComment, NewPost, NewUser, Post, PostComment, User,
};
use crate::database::store::{ActivityStore, CommentStore, PostStore, StoreError, UserStore};

/// Postgres-backed store. Every statement is parameterized.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (full_name, email, username, password_hash, age)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.age)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, full_name, email, username, password_hash, age
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl PostStore for PgStore {
    async fn insert_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (content, image_url, user_id)
             VALUES ($1, $2, $3)
             RETURNING id, content, image_url, user_id",
        )
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, content, image_url, user_id FROM posts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, content, image_url, user_id FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_post_comments(&self, post_id: i64) -> Result<Vec<PostComment>, StoreError> {
        let comments = sqlx::query_as::<_, PostComment>(
            "SELECT c.id, c.content, c.author_id, u.full_name AS author_name
             FROM comments c
             JOIN users u ON c.author_id = u.id
             WHERE c.post_id = $1
             ORDER BY c.id",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn delete_post(&self, id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (content, post_id, author_id)
             VALUES ($1, $2, $3)
             RETURNING id, content, post_id, author_id",
        )
        .bind(&comment.content)
        .bind(comment.post_id)
        .bind(comment.author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, content, post_id, author_id FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_comment_detail(&self, id: i64) -> Result<Option<CommentDetail>, StoreError> {
        let detail = sqlx::query_as::<_, CommentDetail>(
            "SELECT c.id, c.content, c.post_id, c.author_id,
                    p.content AS post_content, u.full_name AS author_name
             FROM comments c
             JOIN posts p ON c.post_id = p.id
             JOIN users u ON c.author_id = u.id
             WHERE c.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(detail)
    }

    async fn delete_comment(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for PgStore {
    async fn insert_activity(&self, user_id: i64, description: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO user_activity_logs (user_id, description) VALUES ($1, $2)")
            .bind(user_id)
            .bind(description)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_activities(&self, user_id: i64) -> Result<Vec<Activity>, StoreError> {
        let activities = sqlx::query_as::<_, Activity>(
            "SELECT id, user_id, description, created_at
             FROM user_activity_logs
             WHERE user_id = $1
             ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }
}
