//! Read-only composition of stored posts/comments into viewer-facing values.
//!
//! Enrichment never writes to a store. Any failure aborts the whole batch:
//! callers either get every item enriched or an error.

use crate::domain::{Comment, EnrichedComment, EnrichedPost, Post, Rating};
use crate::error::{ServiceError, ServiceResult, StoreContext, StoreError};
use crate::repository::{RatingStore, UserStore};
use futures::{stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_ENRICH_CONCURRENCY: usize = 8;

#[derive(Clone)]
pub struct Enricher {
    users: Arc<dyn UserStore>,
    ratings: Arc<dyn RatingStore>,
    concurrency: usize,
}

impl Enricher {
    pub fn new(users: Arc<dyn UserStore>, ratings: Arc<dyn RatingStore>) -> Self {
        Self {
            users,
            ratings,
            concurrency: DEFAULT_ENRICH_CONCURRENCY,
        }
    }

    /// Number of posts enriched concurrently within one batch (at least 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Attach author name, the viewer's own rating flags and aggregate counts.
    pub async fn enrich_post(&self, viewer_id: Uuid, post: Post) -> ServiceResult<EnrichedPost> {
        let author_name = self.author_name(post.user_id).await?;

        let (is_liked, is_disliked) = match self.ratings.get(viewer_id, post.id).await {
            Ok(Rating::Like) => (true, false),
            Ok(Rating::Dislike) => (false, true),
            Err(StoreError::NotFound) => (false, false),
            Err(e) => return Err(ServiceError::store("ratings", "get", e)),
        };

        let counts = self
            .ratings
            .counts(post.id)
            .await
            .in_store("ratings", "counts")?;

        Ok(EnrichedPost {
            post,
            author_name,
            like_count: counts.like_count,
            dislike_count: counts.dislike_count,
            is_liked,
            is_disliked,
        })
    }

    /// Enrich a batch, preserving input order.
    pub async fn enrich_posts(
        &self,
        viewer_id: Uuid,
        posts: Vec<Post>,
    ) -> ServiceResult<Vec<EnrichedPost>> {
        stream::iter(posts)
            .map(|post| self.enrich_post(viewer_id, post))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    pub async fn enrich_comment(&self, comment: Comment) -> ServiceResult<EnrichedComment> {
        let author_name = self.author_name(comment.user_id).await?;
        Ok(EnrichedComment {
            comment,
            author_name,
        })
    }

    pub async fn enrich_comments(
        &self,
        comments: Vec<Comment>,
    ) -> ServiceResult<Vec<EnrichedComment>> {
        stream::iter(comments)
            .map(|comment| self.enrich_comment(comment))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    /// A missing author is an integrity violation, reported as a store error.
    async fn author_name(&self, author_id: Uuid) -> ServiceResult<String> {
        let user = self
            .users
            .get_by_id(author_id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    tracing::error!(%author_id, "author record missing");
                }
                e
            })
            .in_store("users", "get_by_id")?;

        Ok(user.login)
    }
}
