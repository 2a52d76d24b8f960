//! In-process adapters used when no database is configured.
//!
//! Accounts and posts live in `tokio::sync::RwLock`-guarded maps and vanish
//! on restart. Reference data is seeded from the bundled
//! `fixtures/reference_data.json`, the same records the SQL migrations seed.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::ports::{
    FestivalRepository, PostPersistenceError, PostRepository, ReferenceDataError,
    StateRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Festival, FestivalFilter, Post, PostId, StateProfile, User, UserAccount, UserId, Username,
};

const BUNDLED_REFERENCE_DATA: &str = include_str!("../../../fixtures/reference_data.json");

/// Account store keyed by id; username lookups scan the values.
#[derive(Default)]
pub struct MemoryUserRepository {
    accounts: RwLock<HashMap<UserId, UserAccount>>,
}

impl MemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.accounts.write().await;
        let username = account.user().username();
        if accounts
            .values()
            .any(|existing| existing.user().username() == username)
        {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        accounts.insert(account.user().id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.user().username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(id).map(|account| account.user().clone()))
    }
}

/// Post store keyed by id.
#[derive(Default)]
pub struct MemoryPostRepository {
    posts: RwLock<HashMap<PostId, Post>>,
}

impl MemoryPostRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError> {
        self.posts.write().await.insert(post.id(), post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostPersistenceError> {
        Ok(self.posts.read().await.get(id).cloned())
    }

    async fn list_recent(&self) -> Result<Vec<Post>, PostPersistenceError> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by_key(|post| std::cmp::Reverse(post.created_at()));
        Ok(posts)
    }

    async fn update(&self, post: &Post) -> Result<bool, PostPersistenceError> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&post.id()) {
            Some(stored) => {
                *stored = post.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &PostId) -> Result<bool, PostPersistenceError> {
        Ok(self.posts.write().await.remove(id).is_some())
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceDataSet {
    festivals: Vec<Festival>,
    states: Vec<StateProfile>,
}

/// Read-only festival and state records.
#[derive(Debug, Clone, Default)]
pub struct MemoryReferenceData {
    festivals: Vec<Festival>,
    states: Vec<StateProfile>,
}

impl MemoryReferenceData {
    /// Records from explicit lists.
    pub fn new(festivals: Vec<Festival>, states: Vec<StateProfile>) -> Self {
        Self { festivals, states }
    }

    /// Records bundled with the binary.
    ///
    /// # Errors
    ///
    /// Returns the decoding error when the bundled JSON is malformed.
    pub fn bundled() -> Result<Self, serde_json::Error> {
        let set: ReferenceDataSet = serde_json::from_str(BUNDLED_REFERENCE_DATA)?;
        Ok(Self::new(set.festivals, set.states))
    }
}

#[async_trait]
impl FestivalRepository for MemoryReferenceData {
    async fn find(&self, filter: &FestivalFilter) -> Result<Vec<Festival>, ReferenceDataError> {
        Ok(self
            .festivals
            .iter()
            .filter(|festival| filter.matches(festival))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StateRepository for MemoryReferenceData {
    async fn find_by_state_id(
        &self,
        state_id: &str,
    ) -> Result<Option<StateProfile>, ReferenceDataError> {
        Ok(self
            .states
            .iter()
            .find(|state| state.state_id == state_id)
            .cloned())
    }
}
