use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a like: a (user, post) membership fact, not a counter.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Like {
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}
