use super::PostStore;
use crate::domain::{NewPost, Post, PostFilter};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for Post operations
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn get(&self, id: Uuid) -> StoreResult<Post> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, created_at, image_id, category, sex, brand, description, link
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, created_at, image_id, category, sex, brand, description, link
            FROM posts
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn list_by_filter(&self, filter: &PostFilter) -> StoreResult<Vec<Post>> {
        // A NULL parameter disables the corresponding predicate.
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, created_at, image_id, category, sex, brand, description, link
            FROM posts
            WHERE ($1::varchar IS NULL OR category = $1)
              AND ($2::varchar IS NULL OR sex = $2)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(filter.category)
        .bind(filter.sex)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn create(&self, author_id: Uuid, post: &NewPost) -> StoreResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, image_id, category, sex, brand, description, link)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, created_at, image_id, category, sex, brand, description, link
            "#,
        )
        .bind(author_id)
        .bind(&post.image_id)
        .bind(post.category)
        .bind(post.sex)
        .bind(&post.brand)
        .bind(&post.description)
        .bind(&post.link)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_constraint)?;

        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
