/// Post handlers - HTTP endpoints for post and rating operations
use super::AppState;
use crate::domain::{Category, EnrichedPost, NewPost, PostFilter, Sex};
use crate::error::ServiceError;
use crate::middleware::UserId;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(rename = "photoID")]
    #[validate(length(min = 1))]
    pub image_id: String,
    pub category: Category,
    pub sex: Sex,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub brand: String,
    #[serde(default)]
    #[validate(length(max = 4096))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub link: String,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost {
            image_id: req.image_id,
            category: req.category,
            sex: req.sex,
            brand: req.brand,
            description: req.description,
            link: req.link,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[serde(rename = "postID")]
    pub id: Uuid,
    #[serde(rename = "creatorID")]
    pub user_id: Uuid,
    #[serde(rename = "creatorName")]
    pub user_name: String,
    #[serde(rename = "createDate")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "photoID")]
    pub image_id: String,
    pub category: Category,
    pub sex: Sex,
    pub brand: String,
    pub description: String,
    pub link: String,
    pub like_cnt: i64,
    pub dislike_cnt: i64,
    pub is_liked: bool,
    pub is_disliked: bool,
}

impl From<EnrichedPost> for PostResponse {
    fn from(p: EnrichedPost) -> Self {
        Self {
            id: p.post.id,
            user_id: p.post.user_id,
            user_name: p.author_name,
            created_at: p.post.created_at,
            image_id: p.post.image_id,
            category: p.post.category,
            sex: p.post.sex,
            brand: p.post.brand,
            description: p.post.description,
            link: p.post.link,
            like_cnt: p.like_count,
            dislike_cnt: p.dislike_count,
            is_liked: p.is_liked,
            is_disliked: p.is_disliked,
        }
    }
}

fn to_responses(posts: Vec<EnrichedPost>) -> Vec<PostResponse> {
    posts.into_iter().map(PostResponse::from).collect()
}

/// Create a new post
pub async fn create_post(
    state: web::Data<AppState>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, ServiceError> {
    let req = req.into_inner();
    req.validate()
        .map_err(|e| ServiceError::BadRequest(e.to_string()))?;

    let post = state.posts.create_post(user_id.0, req.into()).await?;
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// Get a post by ID
pub async fn get_post(
    state: web::Data<AppState>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let post = state.posts.get_post(user_id.0, *post_id).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// List posts, optionally filtered by `category` and/or `sex`
pub async fn get_posts_with_params(
    state: web::Data<AppState>,
    user_id: UserId,
    query: web::Query<PostFilter>,
) -> Result<HttpResponse, ServiceError> {
    let posts = state
        .posts
        .get_posts_with_params(user_id.0, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(to_responses(posts)))
}

/// Get posts for a user
pub async fn get_users_posts(
    state: web::Data<AppState>,
    user_id: UserId,
    owner_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let posts = state.posts.get_users_posts(user_id.0, *owner_id).await?;
    Ok(HttpResponse::Ok().json(to_responses(posts)))
}

/// Delete a post (author only)
pub async fn delete_post(
    state: web::Data<AppState>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    state.posts.delete_post(user_id.0, *post_id).await?;
    Ok(HttpResponse::Ok().finish())
}

pub async fn like_post(
    state: web::Data<AppState>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    state.ratings.like(user_id.0, *post_id).await?;
    Ok(HttpResponse::Ok().finish())
}

pub async fn dislike_post(
    state: web::Data<AppState>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    state.ratings.dislike(user_id.0, *post_id).await?;
    Ok(HttpResponse::Ok().finish())
}

pub async fn unrate_post(
    state: web::Data<AppState>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    state.ratings.unrate(user_id.0, *post_id).await?;
    Ok(HttpResponse::Ok().finish())
}
