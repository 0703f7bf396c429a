//! In-memory store fakes for service tests
//!
//! One `MemoryStore` implements every store trait over a shared state, so a
//! test can seed users/posts/ratings directly and then inspect the exact
//! sequence of writes the services issued.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use post_service::domain::{
    Category, Comment, NewPost, Post, PostFilter, Rating, RatingCounts, Sex, User,
};
use post_service::error::{StoreError, StoreResult};
use post_service::repository::{CommentStore, ImageStore, PostStore, RatingStore, UserStore};
use post_service::services::{CommentService, Enricher, PostService, RatingService, UserService};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Interleaving injected between a rating read and the following write
#[derive(Debug, Clone, Copy)]
pub enum RatingRace {
    /// Another writer inserts this rating right before our `create`.
    InsertBeforeCreate(Rating),
    /// Another writer removes the rating right before our `update`.
    DeleteBeforeUpdate,
    /// Another writer inserts this rating before our `create`, then unrates
    /// it again right before our fallback `update`.
    InsertBeforeCreateThenDelete(Rating),
    /// Our `create` conflicts with a row that a concurrent unrate removes
    /// before we can re-read it.
    ConflictThenVanish,
}

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    posts: Vec<Post>,
    ratings: HashMap<(Uuid, Uuid), Rating>,
    comments: Vec<Comment>,
    images: HashMap<String, Vec<u8>>,
    writes: Vec<&'static str>,
    failing: HashSet<&'static str>,
    rating_race: Option<RatingRace>,
    clock: i64,
}

impl State {
    fn check(&self, op: &'static str) -> StoreResult<()> {
        if self.failing.contains(op) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn tick(&mut self) -> chrono::DateTime<Utc> {
        self.clock += 1;
        Utc::now() + Duration::seconds(self.clock)
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, login: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().users.insert(
            id,
            User {
                id,
                login: login.to_string(),
                password_hash: "hash".to_string(),
            },
        );
        id
    }

    pub fn remove_user(&self, id: Uuid) {
        self.state.lock().unwrap().users.remove(&id);
    }

    pub fn add_image(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.state
            .lock()
            .unwrap()
            .images
            .insert(id.clone(), vec![0x89, b'P', b'N', b'G']);
        id
    }

    /// Seed a post without going through the service.
    pub fn add_post(&self, owner: Uuid, category: Category, sex: Sex) -> Post {
        let mut state = self.state.lock().unwrap();
        let post = Post {
            id: Uuid::new_v4(),
            user_id: owner,
            created_at: state.tick(),
            image_id: Uuid::new_v4().to_string(),
            category,
            sex,
            brand: "acme".to_string(),
            description: String::new(),
            link: String::new(),
        };
        state.posts.push(post.clone());
        post
    }

    pub fn set_rating(&self, user: Uuid, post: Uuid, rating: Rating) {
        self.state
            .lock()
            .unwrap()
            .ratings
            .insert((user, post), rating);
    }

    pub fn rating(&self, user: Uuid, post: Uuid) -> Option<Rating> {
        self.state.lock().unwrap().ratings.get(&(user, post)).copied()
    }

    pub fn rating_rows(&self, post: Uuid) -> usize {
        self.state
            .lock()
            .unwrap()
            .ratings
            .keys()
            .filter(|(_, p)| *p == post)
            .count()
    }

    pub fn has_post(&self, id: Uuid) -> bool {
        self.state.lock().unwrap().posts.iter().any(|p| p.id == id)
    }

    /// Every store write, in call order, as `"<store>.<operation>"`.
    pub fn writes(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.state.lock().unwrap().writes.clear();
    }

    /// Make `op` (e.g. `"ratings.counts"`) fail with a database error.
    pub fn fail(&self, op: &'static str) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn race(&self, race: RatingRace) {
        self.state.lock().unwrap().rating_race = Some(race);
    }

    pub fn enricher(&self) -> Enricher {
        Enricher::new(Arc::new(self.clone()), Arc::new(self.clone()))
    }

    pub fn post_service(&self) -> PostService {
        PostService::new(
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            self.enricher(),
        )
    }

    pub fn rating_service(&self) -> RatingService {
        RatingService::new(Arc::new(self.clone()))
    }

    pub fn comment_service(&self) -> CommentService {
        CommentService::new(
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            self.enricher(),
        )
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(Arc::new(self.clone()))
    }
}

/// `None` fields are not filtered on, mirroring the SQL in `PgPostStore`.
pub fn matches_filter(filter: &PostFilter, post: &Post) -> bool {
    filter.category.map_or(true, |c| c == post.category)
        && filter.sex.map_or(true, |s| s == post.sex)
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    posts
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<User> {
        let state = self.state.lock().unwrap();
        state.check("users.get_by_id")?;
        state.users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_by_login(&self, login: &str) -> StoreResult<User> {
        let state = self.state.lock().unwrap();
        state.check("users.get_by_login")?;
        state
            .users
            .values()
            .find(|u| u.login == login)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn get(&self, id: Uuid) -> StoreResult<Post> {
        let state = self.state.lock().unwrap();
        state.check("posts.get")?;
        state
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Post>> {
        let state = self.state.lock().unwrap();
        state.check("posts.list_by_owner")?;
        Ok(newest_first(
            state
                .posts
                .iter()
                .filter(|p| p.user_id == owner_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_filter(&self, filter: &PostFilter) -> StoreResult<Vec<Post>> {
        let state = self.state.lock().unwrap();
        state.check("posts.list_by_filter")?;
        Ok(newest_first(
            state
                .posts
                .iter()
                .filter(|p| matches_filter(filter, p))
                .cloned()
                .collect(),
        ))
    }

    async fn create(&self, author_id: Uuid, post: &NewPost) -> StoreResult<Post> {
        let mut state = self.state.lock().unwrap();
        state.check("posts.create")?;
        let created = Post {
            id: Uuid::new_v4(),
            user_id: author_id,
            created_at: state.tick(),
            image_id: post.image_id.clone(),
            category: post.category,
            sex: post.sex,
            brand: post.brand.clone(),
            description: post.description.clone(),
            link: post.link.clone(),
        };
        state.posts.push(created.clone());
        state.writes.push("posts.create");
        Ok(created)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check("posts.delete")?;
        state.posts.retain(|p| p.id != id);
        state.writes.push("posts.delete");
        Ok(())
    }
}

#[async_trait]
impl RatingStore for MemoryStore {
    async fn get(&self, user_id: Uuid, post_id: Uuid) -> StoreResult<Rating> {
        let state = self.state.lock().unwrap();
        state.check("ratings.get")?;
        state
            .ratings
            .get(&(user_id, post_id))
            .copied()
            .ok_or(StoreError::NotFound)
    }

    async fn counts(&self, post_id: Uuid) -> StoreResult<RatingCounts> {
        let state = self.state.lock().unwrap();
        state.check("ratings.counts")?;
        let mut counts = RatingCounts::default();
        for ((_, p), rating) in state.ratings.iter() {
            if *p != post_id {
                continue;
            }
            match rating {
                Rating::Like => counts.like_count += 1,
                Rating::Dislike => counts.dislike_count += 1,
            }
        }
        Ok(counts)
    }

    async fn create(&self, user_id: Uuid, post_id: Uuid, rating: Rating) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check("ratings.create")?;
        match state.rating_race {
            Some(RatingRace::InsertBeforeCreate(other)) => {
                state.rating_race = None;
                state.ratings.insert((user_id, post_id), other);
            }
            Some(RatingRace::InsertBeforeCreateThenDelete(other)) => {
                state.rating_race = Some(RatingRace::DeleteBeforeUpdate);
                state.ratings.insert((user_id, post_id), other);
            }
            Some(RatingRace::ConflictThenVanish) => {
                state.rating_race = None;
                state.writes.push("ratings.create");
                return Err(StoreError::Conflict);
            }
            _ => {}
        }
        state.writes.push("ratings.create");
        if !state.posts.iter().any(|p| p.id == post_id) || !state.users.contains_key(&user_id) {
            return Err(StoreError::NotFound);
        }
        if state.ratings.contains_key(&(user_id, post_id)) {
            return Err(StoreError::Conflict);
        }
        state.ratings.insert((user_id, post_id), rating);
        Ok(())
    }

    async fn update(&self, user_id: Uuid, post_id: Uuid, rating: Rating) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check("ratings.update")?;
        if let Some(RatingRace::DeleteBeforeUpdate) = state.rating_race {
            state.rating_race = None;
            state.ratings.remove(&(user_id, post_id));
        }
        state.writes.push("ratings.update");
        match state.ratings.get_mut(&(user_id, post_id)) {
            Some(current) => {
                *current = rating;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, user_id: Uuid, post_id: Uuid) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check("ratings.delete")?;
        state.ratings.remove(&(user_id, post_id));
        state.writes.push("ratings.delete");
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn list_by_post(&self, post_id: Uuid) -> StoreResult<Vec<Comment>> {
        let state = self.state.lock().unwrap();
        state.check("comments.list_by_post")?;
        let mut comments: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(comments)
    }

    async fn create(&self, author_id: Uuid, post_id: Uuid, body: &str) -> StoreResult<Comment> {
        let mut state = self.state.lock().unwrap();
        state.check("comments.create")?;
        if !state.posts.iter().any(|p| p.id == post_id) || !state.users.contains_key(&author_id) {
            return Err(StoreError::NotFound);
        }
        let comment = Comment {
            id: Uuid::new_v4(),
            user_id: author_id,
            post_id,
            created_at: state.tick(),
            body: body.to_string(),
        };
        state.comments.push(comment.clone());
        state.writes.push("comments.create");
        Ok(comment)
    }
}

#[async_trait]
impl ImageStore for MemoryStore {
    async fn exists(&self, image_id: &str) -> StoreResult<bool> {
        let state = self.state.lock().unwrap();
        state.check("images.exists")?;
        Ok(state.images.contains_key(image_id))
    }

    async fn save(&self, bytes: &[u8]) -> StoreResult<String> {
        let mut state = self.state.lock().unwrap();
        state.check("images.save")?;
        let id = Uuid::new_v4().to_string();
        state.images.insert(id.clone(), bytes.to_vec());
        state.writes.push("images.save");
        Ok(id)
    }

    async fn open(&self, image_id: &str) -> StoreResult<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state.check("images.open")?;
        state
            .images
            .get(image_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

pub fn new_post(image_id: &str, category: Category, sex: Sex) -> NewPost {
    NewPost {
        image_id: image_id.to_string(),
        category,
        sex,
        brand: "acme".to_string(),
        description: "a coat".to_string(),
        link: "https://example.com/coat".to_string(),
    }
}
