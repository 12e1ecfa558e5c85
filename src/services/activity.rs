use std::sync::Arc;

use crate::database::models::Activity;
use crate::database::ActivityStore;
use crate::services::ServiceError;

/// Appends audit entries for successful mutating actions
#[derive(Clone)]
pub struct ActivityRecorder {
    store: Arc<dyn ActivityStore>,
}

impl ActivityRecorder {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    /// Single synchronous insert. No retry, no batching.
    pub async fn record(&self, user_id: i64, description: &str) -> Result<(), ServiceError> {
        self.store
            .insert_activity(user_id, description)
            .await
            .map_err(|e| ServiceError::StorageFailure(format!("failed to log activity: {}", e)))
    }

    /// Record an entry, logging and discarding any failure.
    /// Audit rows are not source-of-truth data, so the triggering action always stands.
    pub async fn record_best_effort(&self, user_id: i64, description: &str) {
        if let Err(e) = self.record(user_id, description).await {
            tracing::warn!(user_id, description, "Failed to log activity: {}", e);
        }
    }

    /// Activity entries of the calling user
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Activity>, ServiceError> {
        Ok(self.store.list_activities(user_id).await?)
    }
}
