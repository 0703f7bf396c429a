/// Business logic layer for post-service
///
/// - `ratings`: like/dislike/unrate state machine
/// - `enrichment`: author names, rating flags and counts for read paths
/// - `posts`: post creation, deletion and listings
/// - `comments`: append-only comments
/// - `users`: profile lookups
pub mod comments;
pub mod enrichment;
pub mod posts;
pub mod ratings;
pub mod users;

pub use comments::CommentService;
pub use enrichment::{Enricher, DEFAULT_ENRICH_CONCURRENCY};
pub use posts::PostService;
pub use ratings::RatingService;
pub use users::UserService;
