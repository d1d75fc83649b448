use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a stored media file attached to a post.
///
/// The id is generated by the service, never supplied by clients, so the
/// derived filename can never collide with or escape the media root.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct MediaAttachment {
    pub id: Uuid,
    pub extension: String,
    pub post_id: i64,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl MediaAttachment {
    /// The retrievable store filename for this attachment.
    pub fn filename(&self) -> String {
        format!("{}.{}", self.id, self.extension)
    }
}
