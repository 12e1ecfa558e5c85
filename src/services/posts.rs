use std::sync::Arc;

use crate::auth::require_ownership;
use crate::database::models::{NewPost, Post, PostComment};
use crate::database::PostStore;
use crate::services::{ActivityRecorder, JokeSource, ServiceError};

/// A post with its comments, each carrying the author's display name
#[derive(Debug, Clone)]
pub struct PostWithComments {
    pub post: Post,
    pub comments: Vec<PostComment>,
}

pub struct PostService {
    posts: Arc<dyn PostStore>,
    activity: ActivityRecorder,
    jokes: Arc<dyn JokeSource>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        activity: ActivityRecorder,
        jokes: Arc<dyn JokeSource>,
    ) -> Self {
        Self {
            posts,
            activity,
            jokes,
        }
    }

    /// Create a post owned by `caller_id`. Blank content is replaced by a fetched joke.
    pub async fn create(
        &self,
        caller_id: i64,
        content: Option<String>,
        image_url: Option<String>,
    ) -> Result<Post, ServiceError> {
        let image_url = validate_image_url(image_url.as_deref())?;

        let content = match content.filter(|c| !c.trim().is_empty()) {
            Some(content) => content,
            None => self
                .jokes
                .fetch_joke()
                .await
                .map_err(|e| ServiceError::DependencyFailure(e.to_string()))?,
        };

        let post = self
            .posts
            .insert_post(NewPost {
                content,
                image_url,
                user_id: caller_id,
            })
            .await?;

        self.activity
            .record_best_effort(caller_id, &format!("User created a new POST with ID {}", post.id))
            .await;

        Ok(post)
    }

    pub async fn list(&self) -> Result<Vec<Post>, ServiceError> {
        Ok(self.posts.list_posts().await?)
    }

    pub async fn get(&self, post_id: i64) -> Result<PostWithComments, ServiceError> {
        let post = self
            .posts
            .find_post(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("post not found"))?;
        let comments = self.posts.list_post_comments(post_id).await?;

        Ok(PostWithComments { post, comments })
    }

    /// Existence is checked before ownership; comments go with the post.
    pub async fn delete(&self, caller_id: i64, post_id: i64) -> Result<(), ServiceError> {
        let post = self
            .posts
            .find_post(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("post not found"))?;

        require_ownership(post.user_id, caller_id, "post")?;

        self.posts.delete_post(post_id).await?;
        Ok(())
    }
}

fn validate_image_url(image_url: Option<&str>) -> Result<String, ServiceError> {
    let raw = image_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ServiceError::invalid_input("image_url is required"))?;

    match url::Url::parse(raw) {
        Ok(parsed) if parsed.has_host() => Ok(raw.to_string()),
        _ => Err(ServiceError::invalid_input("invalid image_url format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Activity, NewUser};
    use crate::database::{ActivityStore, MemoryStore, StoreError, UserStore};
    use crate::services::JokeError;
    use async_trait::async_trait;

    struct FixedJoke(&'static str);

    #[async_trait]
    impl JokeSource for FixedJoke {
        async fn fetch_joke(&self) -> Result<String, JokeError> {
            Ok(self.0.to_string())
        }
    }

    struct NoJokes;

    /// Audit table that rejects every write
    struct BrokenAudit;

    #[async_trait]
    impl ActivityStore for BrokenAudit {
        async fn insert_activity(&self, _: i64, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("audit table offline".to_string()))
        }

        async fn list_activities(&self, _: i64) -> Result<Vec<Activity>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl JokeSource for NoJokes {
        async fn fetch_joke(&self) -> Result<String, JokeError> {
            Err(JokeError::Empty)
        }
    }

    async fn seed_user(store: &MemoryStore, username: &str) -> i64 {
        store
            .insert_user(NewUser {
                full_name: format!("{} Example", username),
                email: format!("{}@example.com", username),
                username: username.to_string(),
                password_hash: "x".to_string(),
                age: 30,
            })
            .await
            .unwrap()
    }

    fn service(store: Arc<MemoryStore>, jokes: Arc<dyn JokeSource>) -> PostService {
        let activity = ActivityRecorder::new(store.clone());
        PostService::new(store, activity, jokes)
    }

    #[test]
    fn image_url_must_be_absolute() {
        assert!(validate_image_url(Some("https://cdn.example.com/cat.png")).is_ok());
        assert!(validate_image_url(Some("not a url")).is_err());
        assert!(validate_image_url(Some("mailto:someone@example.com")).is_err());
        assert!(validate_image_url(Some("   ")).is_err());
        assert!(validate_image_url(None).is_err());
    }

    #[tokio::test]
    async fn blank_content_is_backfilled_with_joke() {
        let store = Arc::new(MemoryStore::new());
        let user = seed_user(&store, "ada").await;
        let posts = service(store.clone(), Arc::new(FixedJoke("why did the crab cross")));

        let post = posts
            .create(user, Some("   ".to_string()), Some("https://example.com/a.png".to_string()))
            .await
            .unwrap();

        assert_eq!(post.content, "why did the crab cross");
        assert_eq!(post.user_id, user);

        let log = store.list_activities(user).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].description, format!("User created a new POST with ID {}", post.id));
    }

    #[tokio::test]
    async fn audit_failure_does_not_abort_post() {
        let store = Arc::new(MemoryStore::new());
        let user = seed_user(&store, "ada").await;
        let posts = PostService::new(
            store.clone(),
            ActivityRecorder::new(Arc::new(BrokenAudit)),
            Arc::new(NoJokes),
        );

        let post = posts
            .create(user, Some("still here".to_string()), Some("https://example.com/a.png".to_string()))
            .await
            .unwrap();

        assert_eq!(posts.get(post.id).await.unwrap().post, post);
        assert!(store.list_activities(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_joke_fetch_persists_nothing() {
        let store = Arc::new(MemoryStore::new());
        let user = seed_user(&store, "ada").await;
        let posts = service(store.clone(), Arc::new(NoJokes));

        let result = posts
            .create(user, None, Some("https://example.com/a.png".to_string()))
            .await;

        assert!(matches!(result, Err(ServiceError::DependencyFailure(_))));
        assert!(posts.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_image_url_is_rejected_before_fetching() {
        let store = Arc::new(MemoryStore::new());
        let user = seed_user(&store, "ada").await;
        let posts = service(store, Arc::new(NoJokes));

        let result = posts.create(user, None, Some("nope".to_string())).await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn only_owner_may_delete() {
        let store = Arc::new(MemoryStore::new());
        let owner = seed_user(&store, "ada").await;
        let other = seed_user(&store, "bob").await;
        let posts = service(store, Arc::new(NoJokes));

        let post = posts
            .create(owner, Some("hello".to_string()), Some("https://example.com/a.png".to_string()))
            .await
            .unwrap();

        assert!(matches!(
            posts.delete(other, post.id).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(posts.get(post.id).await.is_ok());

        posts.delete(owner, post.id).await.unwrap();
        assert!(matches!(posts.get(post.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn missing_post_is_not_found_before_ownership() {
        let store = Arc::new(MemoryStore::new());
        let user = seed_user(&store, "ada").await;
        let posts = service(store, Arc::new(NoJokes));

        assert!(matches!(
            posts.delete(user, 12345).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
