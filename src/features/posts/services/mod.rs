mod comment_service;
mod post_service;

pub use comment_service::CommentService;
pub use post_service::{PostService, UploadedFile};
