//! Port abstraction for blog post persistence.

use async_trait::async_trait;

use crate::domain::{Post, PostId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Storage for blog posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post.
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostPersistenceError>;

    /// List every post, newest first by creation time.
    async fn list_recent(&self) -> Result<Vec<Post>, PostPersistenceError>;

    /// Overwrite the title and content of an existing post.
    ///
    /// Returns `false` when no post with that identifier exists.
    async fn update(&self, post: &Post) -> Result<bool, PostPersistenceError>;

    /// Delete a post. Returns `false` when it was already gone.
    async fn delete(&self, id: &PostId) -> Result<bool, PostPersistenceError>;
}
