use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::media::handlers;
use crate::features::media::services::MediaService;

/// Create routes for serving media files (public)
pub fn routes(media_service: Arc<MediaService>) -> Router {
    Router::new()
        .route("/api/media/{filename}", get(handlers::get_media))
        .with_state(media_service)
}
