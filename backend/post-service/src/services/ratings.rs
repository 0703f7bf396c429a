/// Rating state machine: unrated / liked / disliked per (user, post)
use crate::domain::Rating;
use crate::error::{ServiceError, ServiceResult, StoreContext, StoreError};
use crate::repository::RatingStore;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct RatingService {
    ratings: Arc<dyn RatingStore>,
}

impl RatingService {
    pub fn new(ratings: Arc<dyn RatingStore>) -> Self {
        Self { ratings }
    }

    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<()> {
        self.rate(user_id, post_id, Rating::Like).await
    }

    pub async fn dislike(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<()> {
        self.rate(user_id, post_id, Rating::Dislike).await
    }

    /// Remove the viewer's rating. Removing an absent rating succeeds.
    pub async fn unrate(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<()> {
        self.ratings
            .delete(user_id, post_id)
            .await
            .in_store("ratings", "delete")?;

        debug!(%user_id, %post_id, "rating removed");
        Ok(())
    }

    /// Current rating, `None` when unrated.
    pub async fn current(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<Option<Rating>> {
        match self.ratings.get(user_id, post_id).await {
            Ok(rating) => Ok(Some(rating)),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(ServiceError::store("ratings", "get", e)),
        }
    }

    async fn rate(&self, user_id: Uuid, post_id: Uuid, target: Rating) -> ServiceResult<()> {
        let current = self.current(user_id, post_id).await?;

        match current {
            Some(rating) if rating == target => {
                debug!(%user_id, %post_id, rating = ?target, "rating unchanged");
                return Ok(());
            }
            Some(_) => self.update_or_create(user_id, post_id, target).await?,
            None => self.create_or_update(user_id, post_id, target).await?,
        }

        debug!(%user_id, %post_id, from = ?current, to = ?target, "rating transition");
        Ok(())
    }

    /// Unrated branch. A `Conflict` means a concurrent writer inserted the row
    /// between our read and our insert; settle on the target value instead.
    /// The row may be gone again by the time we re-read, so the fallback goes
    /// through `update_or_create`.
    async fn create_or_update(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        target: Rating,
    ) -> ServiceResult<()> {
        match self.ratings.create(user_id, post_id, target).await {
            Ok(()) => Ok(()),
            Err(StoreError::Conflict) => {
                debug!(%user_id, %post_id, "rating created concurrently, re-reading");
                match self.current(user_id, post_id).await? {
                    Some(rating) if rating == target => Ok(()),
                    _ => self.update_or_create(user_id, post_id, target).await,
                }
            }
            Err(StoreError::NotFound) => Err(missing_reference(user_id, post_id)),
            Err(e) => Err(ServiceError::store("ratings", "create", e)),
        }
    }

    /// Rated branch. A `NotFound` means a concurrent unrate removed the row.
    async fn update_or_create(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        target: Rating,
    ) -> ServiceResult<()> {
        match self.ratings.update(user_id, post_id, target).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound) => {
                debug!(%user_id, %post_id, "rating removed concurrently, recreating");
                match self.ratings.create(user_id, post_id, target).await {
                    Ok(()) => Ok(()),
                    Err(StoreError::NotFound) => Err(missing_reference(user_id, post_id)),
                    Err(e) => Err(ServiceError::store("ratings", "create", e)),
                }
            }
            Err(e) => Err(ServiceError::store("ratings", "update", e)),
        }
    }
}

/// A rating insert hit a foreign key: either the post or the rating user is gone.
fn missing_reference(user_id: Uuid, post_id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("post {} or user {}", post_id, user_id))
}
