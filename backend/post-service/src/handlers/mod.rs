/// HTTP handlers for post-service
///
/// Handlers parse and validate requests, take the viewer from `UserId` and
/// delegate to the services. Error kinds are mapped to status codes here and
/// nowhere else.
pub mod comments;
pub mod images;
pub mod posts;
pub mod users;

use crate::error::ServiceError;
use crate::repository::ImageStore;
use crate::services::{CommentService, PostService, RatingService, UserService};
use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub ratings: RatingService,
    pub comments: CommentService,
    pub users: UserService,
    pub images: Arc<dyn ImageStore>,
    pub image_max_bytes: usize,
}

/// Extractor rejections (bad JSON, query or path) use the same error body as
/// handler errors.
fn bad_request(err: impl std::fmt::Display) -> actix_web::Error {
    ServiceError::BadRequest(err.to_string()).into()
}

/// Register the authenticated API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _req| bad_request(err)));

    cfg.route("/posts", web::post().to(posts::create_post))
        .route("/posts", web::get().to(posts::get_posts_with_params))
        .route("/posts/{post_id}", web::get().to(posts::get_post))
        .route("/posts/{post_id}", web::delete().to(posts::delete_post))
        .route("/posts/{post_id}/like", web::put().to(posts::like_post))
        .route("/posts/{post_id}/dislike", web::put().to(posts::dislike_post))
        .route("/posts/{post_id}/unrate", web::delete().to(posts::unrate_post))
        .route(
            "/posts/{post_id}/comments",
            web::get().to(comments::get_post_comments),
        )
        .route(
            "/posts/{post_id}/comments",
            web::post().to(comments::create_comment),
        )
        .route("/users/me", web::get().to(users::get_me))
        .route(
            "/users/by-login/{login}",
            web::get().to(users::get_user_by_login),
        )
        .route("/users/{user_id}/posts", web::get().to(posts::get_users_posts))
        .route("/images", web::post().to(images::create_image))
        .route("/images/{image_id}", web::get().to(images::get_image));
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ServiceError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = match self {
            ServiceError::Store { .. } => {
                tracing::error!(error = %self, "request failed");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": error_msg,
            "status": status.as_u16(),
        }))
    }
}
