use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::features::posts::dtos::MAX_FILE_SIZE;
use crate::features::posts::handlers::{comment_handler, post_handler, PostState};
use crate::features::posts::services::{CommentService, PostService};

/// Create routes for the posts feature (require auth middleware to be applied by caller)
pub fn routes(post_service: Arc<PostService>, comment_service: Arc<CommentService>) -> Router {
    let state = PostState {
        post_service,
        comment_service,
    };

    Router::new()
        .route(
            "/api/posts",
            get(post_handler::list_posts)
                .post(post_handler::create_post)
                // Allow body size up to MAX_FILE_SIZE + buffer for multipart overhead
                .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024)),
        )
        .route("/api/posts/{post_id}/like", post(post_handler::toggle_like))
        .route(
            "/api/posts/{post_id}/comments",
            get(comment_handler::list_comments).post(comment_handler::create_comment),
        )
        .route(
            "/api/posts/{post_id}/comments/{comment_id}",
            delete(comment_handler::delete_comment),
        )
        .with_state(state)
}
