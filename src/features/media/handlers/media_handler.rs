use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::core::error::Result;
use crate::features::media::services::MediaService;

/// Serve a stored media file
///
/// The filename must be a generated `<uuid>.<extension>` name; anything
/// else is reported as not found.
#[utoipa::path(
    get,
    path = "/api/media/{filename}",
    params(
        ("filename" = String, Path, description = "Stored media filename")
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "File not found")
    ),
    tag = "media"
)]
pub async fn get_media(
    State(service): State<Arc<MediaService>>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let (data, content_type) = service.get_file(&filename).await?;

    Ok(([(header::CONTENT_TYPE, content_type)], data).into_response())
}
