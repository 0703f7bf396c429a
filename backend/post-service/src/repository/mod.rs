//! Store collaborators used by the services.
//!
//! Each trait is implemented against Postgres (or the filesystem for images)
//! and injected into the services as `Arc<dyn Trait>`.

pub mod comments;
pub mod images;
pub mod posts;
pub mod ratings;
pub mod users;

pub use comments::PgCommentStore;
pub use images::FsImageStore;
pub use posts::PgPostStore;
pub use ratings::PgRatingStore;
pub use users::PgUserStore;

use crate::domain::{Comment, NewPost, Post, PostFilter, Rating, RatingCounts, User};
use crate::error::StoreResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<User>;

    async fn get_by_login(&self, login: &str) -> StoreResult<User>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn get(&self, id: Uuid) -> StoreResult<Post>;

    /// Posts authored by `owner_id`, newest first
    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Post>>;

    /// Posts matching `filter`, newest first
    async fn list_by_filter(&self, filter: &PostFilter) -> StoreResult<Vec<Post>>;

    /// Insert a post; the store assigns `id` and `created_at`.
    async fn create(&self, author_id: Uuid, post: &NewPost) -> StoreResult<Post>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait RatingStore: Send + Sync {
    async fn get(&self, user_id: Uuid, post_id: Uuid) -> StoreResult<Rating>;

    async fn counts(&self, post_id: Uuid) -> StoreResult<RatingCounts>;

    /// Fails with `Conflict` if a rating already exists for the pair and with
    /// `NotFound` if the post does not exist.
    async fn create(&self, user_id: Uuid, post_id: Uuid, rating: Rating) -> StoreResult<()>;

    /// Fails with `NotFound` if there is no rating for the pair.
    async fn update(&self, user_id: Uuid, post_id: Uuid, rating: Rating) -> StoreResult<()>;

    /// Deleting an absent rating succeeds.
    async fn delete(&self, user_id: Uuid, post_id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Comments on `post_id`, newest first
    async fn list_by_post(&self, post_id: Uuid) -> StoreResult<Vec<Comment>>;

    async fn create(&self, author_id: Uuid, post_id: Uuid, body: &str) -> StoreResult<Comment>;
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn exists(&self, image_id: &str) -> StoreResult<bool>;

    /// Persist image bytes and return the new image reference.
    async fn save(&self, bytes: &[u8]) -> StoreResult<String>;

    async fn open(&self, image_id: &str) -> StoreResult<Vec<u8>>;
}
