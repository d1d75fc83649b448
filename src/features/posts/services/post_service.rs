use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::CurrentUser;
use crate::features::posts::dtos::PostResponseDto;
use crate::features::posts::models::{Like, MediaAttachment, Post};
use crate::features::users::services::UserService;
use crate::modules::storage::MediaStore;

/// One uploaded media file, as received from the multipart form
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Service for post operations: creation with attachments, enriched
/// listing, and the like toggle.
pub struct PostService {
    pool: PgPool,
    media_store: Arc<MediaStore>,
    user_service: Arc<UserService>,
}

impl PostService {
    pub fn new(pool: PgPool, media_store: Arc<MediaStore>, user_service: Arc<UserService>) -> Self {
        Self {
            pool,
            media_store,
            user_service,
        }
    }

    /// Create a post with zero or more media attachments.
    ///
    /// File bytes are written to the media store first, so the transaction
    /// covering the post and attachment rows is never held open across file
    /// I/O. If any row insert or the commit fails, the files already written
    /// are removed best-effort before the error is returned. A crash between
    /// the file writes and the commit can still leave orphans behind.
    pub async fn create_post(
        &self,
        user: &CurrentUser,
        content: Option<String>,
        files: Vec<UploadedFile>,
    ) -> Result<PostResponseDto> {
        let mut staged: Vec<(Uuid, String)> = Vec::with_capacity(files.len());
        let mut written: Vec<String> = Vec::with_capacity(files.len());

        for file in &files {
            let attachment_id = Uuid::new_v4();
            let extension = derive_extension(&file.filename);
            let filename = format!("{}.{}", attachment_id, extension);

            if let Err(e) = self.media_store.save(&filename, &file.data).await {
                self.cleanup_files(&written).await;
                return Err(e);
            }
            written.push(filename);
            staged.push((attachment_id, extension));
        }

        let post = match self.insert_post_rows(user.id, &content, &staged).await {
            Ok(post) => post,
            Err(e) => {
                self.cleanup_files(&written).await;
                return Err(e);
            }
        };

        tracing::info!(
            "Post created: id={}, author_id={}, attachments={}",
            post.id,
            user.id,
            written.len()
        );

        Ok(PostResponseDto {
            id: post.id,
            images: written,
            content: post.content,
            author_id: user.id,
            author_name: user.fullname.clone(),
            created_at: post.created_at,
            count_likes: 0,
            liked: false,
            count_comments: 0,
        })
    }

    /// Insert the post row and one attachment row per staged file, all in
    /// one transaction. Attachment rows keep the input position as
    /// `sort_order`.
    async fn insert_post_rows(
        &self,
        author_id: i64,
        content: &Option<String>,
        attachments: &[(Uuid, String)],
    ) -> Result<Post> {
        let mut tx = self.pool.begin().await?;

        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (content, author_id)
            VALUES ($1, $2)
            RETURNING id, content, created_at, author_id
            "#,
        )
        .bind(content)
        .bind(author_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert post: {:?}", e);
            AppError::Database(e)
        })?;

        for (index, (attachment_id, extension)) in attachments.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO files (id, extension, post_id, sort_order)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(attachment_id)
            .bind(extension)
            .bind(post.id)
            .bind(index as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert attachment row: {:?}", e);
                AppError::Database(e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit post creation: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(post)
    }

    /// List posts, optionally restricted to one author, each enriched with
    /// attachment filenames, author identity, like count, the caller's liked
    /// flag and comment count. Related collections are batch-loaded with one
    /// query per table instead of one query per post.
    pub async fn list_posts(
        &self,
        current_user_id: i64,
        author_filter: Option<i64>,
    ) -> Result<Vec<PostResponseDto>> {
        if let Some(author_id) = author_filter {
            if self.user_service.find_by_id(author_id).await?.is_none() {
                return Err(AppError::NotFound("Author not found".to_string()));
            }
        }

        // One transaction for the snapshot: posts plus every related
        // collection read at the same point in time.
        let mut tx = self.pool.begin().await?;

        let posts = match author_filter {
            Some(author_id) => {
                sqlx::query_as::<_, Post>(
                    "SELECT id, content, created_at, author_id FROM posts WHERE author_id = $1 ORDER BY id",
                )
                .bind(author_id)
                .fetch_all(&mut *tx)
                .await?
            }
            None => {
                sqlx::query_as::<_, Post>(
                    "SELECT id, content, created_at, author_id FROM posts ORDER BY id",
                )
                .fetch_all(&mut *tx)
                .await?
            }
        };

        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let author_ids: Vec<i64> = posts
            .iter()
            .map(|p| p.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let author_names: HashMap<i64, String> = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, fullname FROM users WHERE id = ANY($1)",
        )
        .bind(&author_ids)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .collect();

        let attachments = sqlx::query_as::<_, MediaAttachment>(
            r#"
            SELECT id, extension, post_id, sort_order, created_at
            FROM files
            WHERE post_id = ANY($1)
            ORDER BY post_id, sort_order
            "#,
        )
        .bind(&post_ids)
        .fetch_all(&mut *tx)
        .await?;

        let mut images_by_post: HashMap<i64, Vec<String>> = HashMap::new();
        for attachment in attachments {
            images_by_post
                .entry(attachment.post_id)
                .or_default()
                .push(attachment.filename());
        }

        let likes = sqlx::query_as::<_, Like>(
            "SELECT user_id, post_id, created_at FROM likes WHERE post_id = ANY($1)",
        )
        .bind(&post_ids)
        .fetch_all(&mut *tx)
        .await?;

        let mut like_counts: HashMap<i64, i64> = HashMap::new();
        let mut liked_by_me: HashSet<i64> = HashSet::new();
        for like in likes {
            *like_counts.entry(like.post_id).or_insert(0) += 1;
            if like.user_id == current_user_id {
                liked_by_me.insert(like.post_id);
            }
        }

        let comment_counts: HashMap<i64, i64> = sqlx::query_as::<_, (i64, i64)>(
            "SELECT post_id, COUNT(*) FROM comments WHERE post_id = ANY($1) GROUP BY post_id",
        )
        .bind(&post_ids)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .collect();

        tx.commit().await?;

        let views = posts
            .into_iter()
            .map(|post| PostResponseDto {
                id: post.id,
                images: images_by_post.remove(&post.id).unwrap_or_default(),
                content: post.content,
                author_id: post.author_id,
                author_name: author_names
                    .get(&post.author_id)
                    .cloned()
                    .unwrap_or_default(),
                created_at: post.created_at,
                count_likes: like_counts.get(&post.id).copied().unwrap_or(0),
                liked: liked_by_me.contains(&post.id),
                count_comments: comment_counts.get(&post.id).copied().unwrap_or(0),
            })
            .collect();

        Ok(views)
    }

    /// Set the caller's like state for a post.
    ///
    /// `like` is the target state: repeated identical calls change nothing,
    /// and the composite primary key resolves concurrent duplicate inserts.
    pub async fn toggle_like(&self, current_user_id: i64, post_id: i64, like: bool) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;

        if exists.is_none() {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        if like {
            sqlx::query(
                r#"
                INSERT INTO likes (user_id, post_id)
                VALUES ($1, $2)
                ON CONFLICT (user_id, post_id) DO NOTHING
                "#,
            )
            .bind(current_user_id)
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
                .bind(current_user_id)
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Best-effort removal of files written before a failed post creation.
    async fn cleanup_files(&self, filenames: &[String]) {
        for filename in filenames {
            if let Err(e) = self.media_store.delete(filename).await {
                tracing::warn!("Failed to clean up orphaned media file {}: {}", filename, e);
            }
        }
    }
}

/// Derive the store extension from an uploaded filename's suffix.
/// Suffixes that are empty or carry non-alphanumeric characters fall back
/// to "bin" so they can never influence the storage path.
pub fn derive_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext))
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => "bin".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_extension_takes_last_suffix() {
        assert_eq!(derive_extension("photo.png"), "png");
        assert_eq!(derive_extension("archive.tar.GZ"), "gz");
        assert_eq!(derive_extension("a.b.c.JPEG"), "jpeg");
    }

    #[test]
    fn test_derive_extension_falls_back_to_bin() {
        assert_eq!(derive_extension("noextension"), "bin");
        assert_eq!(derive_extension("trailingdot."), "bin");
        assert_eq!(derive_extension("weird.p/ng"), "bin");
        assert_eq!(derive_extension(""), "bin");
    }
}
