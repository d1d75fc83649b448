use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a post. Immutable after creation.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
}
