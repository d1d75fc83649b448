use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Maximum size for a single uploaded media file (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Create post request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreatePostDto {
    /// Optional text content of the post
    pub content: Option<String>,
    /// A media file to attach; repeat the field to attach several in order
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub files: String,
}

/// Query parameters for the post listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPostsQuery {
    /// Restrict the listing to a single author
    pub author_id: Option<i64>,
}

/// Request DTO for the like toggle. `like` is the target state, not a delta.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LikeRequestDto {
    pub like: bool,
}

/// A post enriched with attachments, author identity and social counters
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostResponseDto {
    pub id: i64,
    /// Attachment filenames in display order
    pub images: Vec<String>,
    pub content: Option<String>,
    pub author_id: i64,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub count_likes: i64,
    /// Whether the requesting user has liked this post
    pub liked: bool,
    pub count_comments: i64,
}
