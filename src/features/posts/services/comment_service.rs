use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::posts::dtos::CommentListItemDto;
use crate::features::posts::models::{Comment, CommentWithAuthor};

/// Service for comment operations with ownership enforcement
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment on an existing post.
    pub async fn create_comment(
        &self,
        current_user_id: i64,
        post_id: i64,
        content: &str,
    ) -> Result<Comment> {
        let mut tx = self.pool.begin().await?;

        ensure_post_exists(&mut tx, post_id).await?;

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (user_id, post_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, post_id, content, created_at
            "#,
        )
        .bind(current_user_id)
        .bind(post_id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert comment: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await?;

        tracing::info!(
            "Comment created: id={}, post_id={}, user_id={}",
            comment.id,
            post_id,
            current_user_id
        );

        Ok(comment)
    }

    /// List a post's comments in creation order, each with its author and an
    /// ownership flag for the caller.
    pub async fn list_comments(
        &self,
        current_user_id: i64,
        post_id: i64,
    ) -> Result<Vec<CommentListItemDto>> {
        let mut tx = self.pool.begin().await?;

        ensure_post_exists(&mut tx, post_id).await?;

        let rows = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT
                c.id, c.user_id, c.content, c.created_at,
                u.username AS author_username,
                u.fullname AS author_fullname,
                u.avatar AS author_avatar
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at, c.id
            "#,
        )
        .bind(post_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(rows
            .into_iter()
            .map(|row| CommentListItemDto::from_row(row, current_user_id))
            .collect())
    }

    /// Delete a comment. The ownership check always precedes the delete.
    pub async fn delete_comment(
        &self,
        current_user_id: i64,
        post_id: i64,
        comment_id: i64,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, user_id, post_id, content, created_at FROM comments WHERE id = $1 AND post_id = $2",
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Comment with id {} not found", comment_id))
        })?;

        if comment.user_id != current_user_id {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this comment".to_string(),
            ));
        }

        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Comment deleted: id={}, post_id={}, user_id={}",
            comment_id,
            post_id,
            current_user_id
        );

        Ok(())
    }
}

async fn ensure_post_exists(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    post_id: i64,
) -> Result<()> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(&mut **tx)
        .await?;

    if exists.is_none() {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    Ok(())
}
