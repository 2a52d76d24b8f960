//! Driving port for reading posts and running the ownership gate.

use async_trait::async_trait;

use crate::domain::{AuthoredPost, Error, PostAccess, PostId, UserId};

/// Message for lookups of posts that do not exist.
pub const POST_NOT_FOUND: &str = "Post not found";

/// Post read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostQuery: Send + Sync {
    /// Every post with its author, newest first.
    async fn list_posts(&self) -> Result<Vec<AuthoredPost>, Error>;

    /// One post with its author; `NotFound` when absent.
    async fn get_post(&self, id: &PostId) -> Result<AuthoredPost, Error>;

    /// Load a post and decide whether `user` may change it.
    ///
    /// `NotFound` when absent; otherwise the loaded post travels inside
    /// [`PostAccess::Owner`] so the caller never loads it twice.
    async fn claim_post(&self, id: &PostId, user: &UserId) -> Result<PostAccess, Error>;
}
