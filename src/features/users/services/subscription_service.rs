use sqlx::PgPool;

use crate::core::error::{AppError, Result};

/// Service for the directed subscriber -> author graph.
///
/// Both operations are idempotent: the composite primary key on
/// (subscriber_id, author_id) is the final arbiter under concurrent calls.
pub struct SubscriptionService {
    pool: PgPool,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn subscribe(&self, subscriber_id: i64, author_id: i64) -> Result<()> {
        if subscriber_id == author_id {
            return Err(AppError::Validation(
                "Cannot subscribe to yourself".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        ensure_author_exists(&mut tx, author_id).await?;

        sqlx::query(
            r#"
            INSERT INTO subscribes (subscriber_id, author_id)
            VALUES ($1, $2)
            ON CONFLICT (subscriber_id, author_id) DO NOTHING
            "#,
        )
        .bind(subscriber_id)
        .bind(author_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Subscribed: subscriber_id={}, author_id={}",
            subscriber_id,
            author_id
        );

        Ok(())
    }

    /// Deleting a nonexistent edge is a silent success.
    pub async fn unsubscribe(&self, subscriber_id: i64, author_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        ensure_author_exists(&mut tx, author_id).await?;

        sqlx::query("DELETE FROM subscribes WHERE subscriber_id = $1 AND author_id = $2")
            .bind(subscriber_id)
            .bind(author_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Unsubscribed: subscriber_id={}, author_id={}",
            subscriber_id,
            author_id
        );

        Ok(())
    }
}

async fn ensure_author_exists(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    author_id: i64,
) -> Result<()> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = $1")
        .bind(author_id)
        .fetch_optional(&mut **tx)
        .await?;

    if exists.is_none() {
        return Err(AppError::NotFound("Author not found".to_string()));
    }

    Ok(())
}
