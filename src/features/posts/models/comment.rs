use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a comment
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A comment row joined with its author's identity, for listings
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_username: String,
    pub author_fullname: String,
    pub author_avatar: Option<String>,
}
