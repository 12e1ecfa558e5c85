use std::sync::Arc;
use thiserror::Error;

use crate::auth::TokenIssuer;
use crate::config::{AppConfig, ConfigError, Environment, StorageBackend};
use crate::database::{DatabaseError, DatabaseManager, MemoryStore, PgStore, Store};
use crate::services::{
    ActivityRecorder, ApiNinjasJokes, CommentService, CredentialService, JokeError, JokeSource,
    PostService,
};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("failed to build joke client: {0}")]
    Jokes(#[from] JokeError),
}

/// Everything a request handler needs, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenIssuer>,
    pub credentials: Arc<CredentialService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub activity: ActivityRecorder,
    pub database: Option<DatabaseManager>,
}

impl AppState {
    /// Wire services over a store backend and joke source
    pub fn new<S>(
        config: AppConfig,
        store: Arc<S>,
        jokes: Arc<dyn JokeSource>,
        database: Option<DatabaseManager>,
    ) -> Self
    where
        S: Store + 'static,
    {
        let activity = ActivityRecorder::new(store.clone());
        let credentials =
            CredentialService::new(store.clone(), config.security.bcrypt_cost, config.write_timeout());
        let posts = PostService::new(store.clone(), activity.clone(), jokes);
        let comments = CommentService::new(store, activity.clone());

        Self {
            tokens: Arc::new(TokenIssuer::from_config(&config.security)),
            config: Arc::new(config),
            credentials: Arc::new(credentials),
            posts: Arc::new(posts),
            comments: Arc::new(comments),
            activity,
            database,
        }
    }

    /// Select the storage backend from config and connect it
    pub async fn from_config(config: AppConfig) -> Result<Self, StartupError> {
        config.validate()?;
        if config.environment != Environment::Development && config.security.cors_origins.is_empty() {
            tracing::warn!(
                "SECURITY_CORS_ORIGINS is not set in {:?}; allowing any origin",
                config.environment
            );
        }
        let jokes: Arc<dyn JokeSource> = Arc::new(ApiNinjasJokes::new(&config.jokes)?);

        match config.storage {
            StorageBackend::Postgres => {
                let database = DatabaseManager::connect(&config.database).await?;
                let store = Arc::new(PgStore::new(database.pool().clone()));
                Ok(Self::new(config, store, jokes, Some(database)))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data will not survive a restart");
                Ok(Self::new(config, Arc::new(MemoryStore::new()), jokes, None))
            }
        }
    }

    /// Release pooled connections after the server has drained
    pub async fn shutdown(&self) {
        if let Some(database) = &self.database {
            database.close().await;
        }
    }
}
