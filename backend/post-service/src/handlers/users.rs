use super::AppState;
use crate::error::ServiceError;
use crate::middleware::UserId;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "userID")]
    pub id: Uuid,
    pub login: String,
}

/// Profile of the authenticated caller
pub async fn get_me(
    state: web::Data<AppState>,
    user_id: UserId,
) -> Result<HttpResponse, ServiceError> {
    let user = state.users.get_user(user_id.0).await?;
    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id,
        login: user.login,
    }))
}

/// Public profile of another user, looked up by login
pub async fn get_user_by_login(
    state: web::Data<AppState>,
    _user_id: UserId,
    login: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let user = state.users.get_user_by_login(&login).await?;
    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id,
        login: user.login,
    }))
}
