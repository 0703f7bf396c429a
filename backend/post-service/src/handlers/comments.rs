/// Comment handlers
use super::AppState;
use crate::domain::EnrichedComment;
use crate::error::ServiceError;
use crate::middleware::UserId;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 4096))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    #[serde(rename = "commentID")]
    pub id: Uuid,
    #[serde(rename = "creatorID")]
    pub user_id: Uuid,
    #[serde(rename = "creatorName")]
    pub user_name: String,
    #[serde(rename = "postID")]
    pub post_id: Uuid,
    #[serde(rename = "createDate")]
    pub created_at: DateTime<Utc>,
    pub message: String,
}

impl From<EnrichedComment> for CommentResponse {
    fn from(c: EnrichedComment) -> Self {
        Self {
            id: c.comment.id,
            user_id: c.comment.user_id,
            user_name: c.author_name,
            post_id: c.comment.post_id,
            created_at: c.comment.created_at,
            message: c.comment.body,
        }
    }
}

pub async fn get_post_comments(
    state: web::Data<AppState>,
    _user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let comments = state.comments.get_post_comments(*post_id).await?;
    let body: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

pub async fn create_comment(
    state: web::Data<AppState>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, ServiceError> {
    req.validate()
        .map_err(|e| ServiceError::BadRequest(e.to_string()))?;

    let comment = state
        .comments
        .create_comment(user_id.0, *post_id, &req.message)
        .await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}
