//! Driving port for post mutations.
//!
//! Updates and deletes take an [`OwnedPost`], so callers must pass the
//! ownership gate in [`super::PostQuery::claim_post`] before mutating.

use async_trait::async_trait;

use crate::domain::{Error, OwnedPost, Post, PostDraft, UserId};

/// Post lifecycle commands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Publish a new post authored by `author`.
    async fn create(&self, author: &UserId, draft: PostDraft) -> Result<Post, Error>;

    /// Replace the title and content of an owned post.
    async fn update(&self, post: OwnedPost, draft: PostDraft) -> Result<Post, Error>;

    /// Remove an owned post.
    async fn delete(&self, post: OwnedPost) -> Result<(), Error>;
}
