use super::CommentStore;
use crate::domain::Comment;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for Comment operations
#[derive(Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn list_by_post(&self, post_id: Uuid) -> StoreResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, user_id, post_id, created_at, body
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn create(&self, author_id: Uuid, post_id: Uuid, body: &str) -> StoreResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (user_id, post_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, post_id, created_at, body
            "#,
        )
        .bind(author_id)
        .bind(post_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_constraint)?;

        Ok(comment)
    }
}
