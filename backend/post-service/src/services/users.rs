use crate::domain::UserProfile;
use crate::error::{ServiceResult, StoreContext};
use crate::repository::UserStore;
use std::sync::Arc;
use uuid::Uuid;

/// Profile lookups. Credentials never leave this layer.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn get_user(&self, user_id: Uuid) -> ServiceResult<UserProfile> {
        let user = self
            .users
            .get_by_id(user_id)
            .await
            .or_not_found("users", "get_by_id", || format!("user {}", user_id))?;

        Ok(user.into())
    }

    pub async fn get_user_by_login(&self, login: &str) -> ServiceResult<UserProfile> {
        let user = self
            .users
            .get_by_login(login)
            .await
            .or_not_found("users", "get_by_login", || format!("user {}", login))?;

        Ok(user.into())
    }
}
