use super::RatingStore;
use crate::domain::{Rating, RatingCounts};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Repository for post ratings (table `post_rates`)
#[derive(Clone)]
pub struct PgRatingStore {
    pool: PgPool,
}

impl PgRatingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingStore for PgRatingStore {
    async fn get(&self, user_id: Uuid, post_id: Uuid) -> StoreResult<Rating> {
        let is_like: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT is_like FROM post_rates
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        is_like.map(Rating::from_is_like).ok_or(StoreError::NotFound)
    }

    async fn counts(&self, post_id: Uuid) -> StoreResult<RatingCounts> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE is_like) AS like_count,
                COUNT(*) FILTER (WHERE NOT is_like) AS dislike_count
            FROM post_rates
            WHERE post_id = $1
            "#,
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(RatingCounts {
            like_count: row.get::<i64, _>("like_count"),
            dislike_count: row.get::<i64, _>("dislike_count"),
        })
    }

    async fn create(&self, user_id: Uuid, post_id: Uuid, rating: Rating) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO post_rates (user_id, post_id, is_like)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .bind(rating.is_like())
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_constraint)?;

        Ok(())
    }

    async fn update(&self, user_id: Uuid, post_id: Uuid, rating: Rating) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE post_rates
            SET is_like = $3, updated_at = NOW()
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .bind(rating.is_like())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, user_id: Uuid, post_id: Uuid) -> StoreResult<()> {
        sqlx::query(
            r#"
            DELETE FROM post_rates
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
