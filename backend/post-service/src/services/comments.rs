/// Comment service - append-only comments on posts
use crate::domain::EnrichedComment;
use crate::error::{ServiceError, ServiceResult, StoreContext};
use crate::repository::{CommentStore, PostStore};
use crate::services::Enricher;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    posts: Arc<dyn PostStore>,
    enricher: Enricher,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentStore>,
        posts: Arc<dyn PostStore>,
        enricher: Enricher,
    ) -> Self {
        Self {
            comments,
            posts,
            enricher,
        }
    }

    /// Get comments for a post, newest first
    pub async fn get_post_comments(&self, post_id: Uuid) -> ServiceResult<Vec<EnrichedComment>> {
        let comments = self
            .comments
            .list_by_post(post_id)
            .await
            .in_store("comments", "list_by_post")?;

        self.enricher.enrich_comments(comments).await
    }

    /// Create a new comment
    pub async fn create_comment(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        body: &str,
    ) -> ServiceResult<EnrichedComment> {
        if body.trim().is_empty() {
            return Err(ServiceError::BadRequest("comment body is empty".to_string()));
        }

        self.posts
            .get(post_id)
            .await
            .or_not_found("posts", "get", || format!("post {}", post_id))?;

        let comment = self
            .comments
            .create(author_id, post_id, body)
            .await
            .or_not_found("comments", "create", || {
                format!("post {} or user {}", post_id, author_id)
            })?;

        info!(comment_id = %comment.id, %post_id, %author_id, "comment created");

        self.enricher.enrich_comment(comment).await
    }
}
