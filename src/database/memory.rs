use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::models::{
    Activity, Comment, CommentDetail, NewComment, NewPost, NewUser, Post, PostComment, User,
};
use crate::database::store::{ActivityStore, CommentStore, PostStore, StoreError, UserStore};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    activities: BTreeMap<i64, Activity>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn author_name(&self, author_id: i64) -> Option<String> {
        self.users.get(&author_id).map(|u| u.full_name.clone())
    }
}

/// In-process store with the same constraint behavior as the postgres schema.
/// Used by `STORAGE_BACKEND=memory` and the test suites; nothing is persisted.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<i64, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation("users_email_key".to_string()));
        }
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation("users_username_key".to_string()));
        }

        let id = tables.next_id();
        tables.users.insert(
            id,
            User {
                id,
                full_name: user.full_name,
                email: user.email,
                username: user.username,
                password_hash: user.password_hash,
                age: user.age,
            },
        );
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&post.user_id) {
            return Err(StoreError::ForeignKeyViolation("posts_user_id_fkey".to_string()));
        }

        let id = tables.next_id();
        let post = Post {
            id,
            content: post.content,
            image_url: post.image_url,
            user_id: post.user_id,
        };
        tables.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.values().cloned().collect())
    }

    async fn find_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn list_post_comments(&self, post_id: i64) -> Result<Vec<PostComment>, StoreError> {
        let tables = self.tables.read().await;
        let comments = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .filter_map(|c| {
                tables.author_name(c.author_id).map(|author_name| PostComment {
                    id: c.id,
                    content: c.content.clone(),
                    author_id: c.author_id,
                    author_name,
                })
            })
            .collect();
        Ok(comments)
    }

    async fn delete_post(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.comments.retain(|_, c| c.post_id != id);
        tables.posts.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.posts.contains_key(&comment.post_id) {
            return Err(StoreError::ForeignKeyViolation("comments_post_id_fkey".to_string()));
        }
        if !tables.users.contains_key(&comment.author_id) {
            return Err(StoreError::ForeignKeyViolation("comments_author_id_fkey".to_string()));
        }

        let id = tables.next_id();
        let comment = Comment {
            id,
            content: comment.content,
            post_id: comment.post_id,
            author_id: comment.author_id,
        };
        tables.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.get(&id).cloned())
    }

    async fn find_comment_detail(&self, id: i64) -> Result<Option<CommentDetail>, StoreError> {
        let tables = self.tables.read().await;
        let detail = tables.comments.get(&id).and_then(|c| {
            let post = tables.posts.get(&c.post_id)?;
            let author_name = tables.author_name(c.author_id)?;
            Some(CommentDetail {
                id: c.id,
                content: c.content.clone(),
                post_id: c.post_id,
                author_id: c.author_id,
                post_content: post.content.clone(),
                author_name,
            })
        });
        Ok(detail)
    }

    async fn delete_comment(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.comments.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn insert_activity(&self, user_id: i64, description: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::ForeignKeyViolation(
                "user_activity_logs_user_id_fkey".to_string(),
            ));
        }

        let id = tables.next_id();
        tables.activities.insert(
            id,
            Activity {
                id,
                user_id,
                description: description.to_string(),
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn list_activities(&self, user_id: i64) -> Result<Vec<Activity>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .activities
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }
}
