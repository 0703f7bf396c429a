use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Clothing category of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[sqlx(rename = "shoes")]
    Shoes,
    #[sqlx(rename = "outerwear")]
    Outerwear,
    #[sqlx(rename = "underwear")]
    Underwear,
    #[sqlx(rename = "accessories")]
    Accessories,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shoes => "shoes",
            Self::Outerwear => "outerwear",
            Self::Underwear => "underwear",
            Self::Accessories => "accessories",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shoes" => Ok(Self::Shoes),
            "outerwear" => Ok(Self::Outerwear),
            "underwear" => Ok(Self::Underwear),
            "accessories" => Ok(Self::Accessories),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target audience of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar")]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[sqlx(rename = "male")]
    Male,
    #[sqlx(rename = "female")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(format!("unknown sex: {}", other)),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity. The credential hash stays inside the store layer.
#[derive(Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub password_hash: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Public projection of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub login: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
        }
    }
}

/// Post entity as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub image_id: String,
    pub category: Category,
    pub sex: Sex,
    pub brand: String,
    pub description: String,
    pub link: String,
}

/// Fields supplied by the author when publishing a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub image_id: String,
    pub category: Category,
    pub sex: Sex,
    pub brand: String,
    pub description: String,
    pub link: String,
}

/// Post as seen by a particular viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedPost {
    #[serde(flatten)]
    pub post: Post,
    pub author_name: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub is_liked: bool,
    pub is_disliked: bool,
}

/// Filter for post listings. `None` means the field is not filtered on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PostFilter {
    pub category: Option<Category>,
    pub sex: Option<Sex>,
}

/// A user's opinion on a post. Absence of a rating means "unrated".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Like,
    Dislike,
}

impl Rating {
    /// Storage encoding: `true` for a like.
    pub fn is_like(self) -> bool {
        matches!(self, Rating::Like)
    }

    pub fn from_is_like(is_like: bool) -> Self {
        if is_like {
            Rating::Like
        } else {
            Rating::Dislike
        }
    }
}

/// Aggregate like/dislike counters for a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingCounts {
    pub like_count: i64,
    pub dislike_count: i64,
}

/// Comment entity - append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub body: String,
}

/// Comment with its author's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_name: String,
}
