use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Append-only audit row
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Activity {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
