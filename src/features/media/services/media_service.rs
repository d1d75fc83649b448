use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::posts::models::MediaAttachment;
use crate::modules::storage::{parse_media_filename, MediaStore};

/// Service for serving stored media files
pub struct MediaService {
    pool: PgPool,
    media_store: Arc<MediaStore>,
}

impl MediaService {
    pub fn new(pool: PgPool, media_store: Arc<MediaStore>) -> Self {
        Self { pool, media_store }
    }

    /// Look up a media file by its public `<uuid>.<extension>` name and
    /// return its bytes with a guessed content type.
    ///
    /// The name must parse as a generated filename and match a stored
    /// attachment row; the filesystem is never consulted for anything else.
    pub async fn get_file(&self, filename: &str) -> Result<(Vec<u8>, String)> {
        let Some((id, extension)) = parse_media_filename(filename) else {
            return Err(AppError::NotFound("File not found".to_string()));
        };

        let attachment = sqlx::query_as::<_, MediaAttachment>(
            "SELECT id, extension, post_id, sort_order, created_at FROM files WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        if attachment.extension != extension {
            return Err(AppError::NotFound("File not found".to_string()));
        }

        let data = self.media_store.read(&attachment.filename()).await?;

        let content_type = mime_guess::from_ext(&attachment.extension)
            .first_or_octet_stream()
            .to_string();

        Ok((data, content_type))
    }
}
