/// Post service - handles post creation, retrieval, and deletion
use crate::domain::{EnrichedPost, NewPost, PostFilter};
use crate::error::{ServiceError, ServiceResult, StoreContext};
use crate::repository::{ImageStore, PostStore};
use crate::services::Enricher;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    images: Arc<dyn ImageStore>,
    enricher: Enricher,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, images: Arc<dyn ImageStore>, enricher: Enricher) -> Self {
        Self {
            posts,
            images,
            enricher,
        }
    }

    /// Get a post by ID
    pub async fn get_post(&self, viewer_id: Uuid, post_id: Uuid) -> ServiceResult<EnrichedPost> {
        let post = self
            .posts
            .get(post_id)
            .await
            .or_not_found("posts", "get", || format!("post {}", post_id))?;

        self.enricher.enrich_post(viewer_id, post).await
    }

    /// Get posts authored by `owner_id`
    pub async fn get_users_posts(
        &self,
        viewer_id: Uuid,
        owner_id: Uuid,
    ) -> ServiceResult<Vec<EnrichedPost>> {
        let posts = self
            .posts
            .list_by_owner(owner_id)
            .await
            .in_store("posts", "list_by_owner")?;

        self.enricher.enrich_posts(viewer_id, posts).await
    }

    /// Get posts matching category and/or sex
    pub async fn get_posts_with_params(
        &self,
        viewer_id: Uuid,
        filter: PostFilter,
    ) -> ServiceResult<Vec<EnrichedPost>> {
        let posts = self
            .posts
            .list_by_filter(&filter)
            .await
            .in_store("posts", "list_by_filter")?;

        self.enricher.enrich_posts(viewer_id, posts).await
    }

    /// Create a new post. The referenced image must already be uploaded.
    pub async fn create_post(
        &self,
        author_id: Uuid,
        new_post: NewPost,
    ) -> ServiceResult<EnrichedPost> {
        let image_exists = self
            .images
            .exists(&new_post.image_id)
            .await
            .in_store("images", "exists")?;

        if !image_exists {
            warn!(%author_id, image_id = %new_post.image_id, "post references missing image");
            return Err(ServiceError::BadRequest(format!(
                "no image {}",
                new_post.image_id
            )));
        }

        let post = self
            .posts
            .create(author_id, &new_post)
            .await
            .in_store("posts", "create")?;

        info!(post_id = %post.id, %author_id, "post created");

        self.enricher.enrich_post(author_id, post).await
    }

    /// Delete a post owned by `viewer_id`
    pub async fn delete_post(&self, viewer_id: Uuid, post_id: Uuid) -> ServiceResult<()> {
        let post = self
            .posts
            .get(post_id)
            .await
            .or_not_found("posts", "get", || format!("post {}", post_id))?;

        if post.user_id != viewer_id {
            warn!(%post_id, %viewer_id, owner_id = %post.user_id, "delete rejected: not the author");
            return Err(ServiceError::PermissionDenied(format!(
                "post {} belongs to another user",
                post_id
            )));
        }

        self.posts
            .delete(post_id)
            .await
            .in_store("posts", "delete")?;

        info!(%post_id, %viewer_id, "post deleted");
        Ok(())
    }
}
