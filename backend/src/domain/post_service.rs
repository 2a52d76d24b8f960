//! Blog post domain service.
//!
//! Implements [`PostQuery`] and [`PostCommand`]. Mutations only accept an
//! [`OwnedPost`], which [`PostQuery::claim_post`] hands out after a single
//! load, so the ownership check and the mutation share one read.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    POST_NOT_FOUND, PostCommand, PostPersistenceError, PostQuery, PostRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthoredPost, Error, OwnedPost, Post, PostAccess, PostDraft, PostId, User, UserId,
};

/// Message for sessions whose account has gone away.
pub const UNKNOWN_AUTHOR: &str = "Please log in again";

/// Post service implementing the blog driving ports.
#[derive(Clone)]
pub struct PostService<P, U> {
    posts: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, U> PostService<P, U> {
    /// Create a new service.
    pub fn new(posts: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            users,
            clock,
        }
    }
}

fn map_post_error(error: PostPersistenceError) -> Error {
    match error {
        PostPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostPersistenceError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
    }
}

fn map_author_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("author lookup failed: {other}")),
    }
}

impl<P, U> PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn load(&self, id: &PostId) -> Result<Post, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND))
    }

    async fn author_of(&self, post: &Post) -> Result<Option<User>, Error> {
        let author = self
            .users
            .find_by_id(post.author())
            .await
            .map_err(map_author_error)?;
        if author.is_none() {
            tracing::warn!(post_id = %post.id(), author = %post.author(), "post author is missing");
        }
        Ok(author)
    }
}

#[async_trait]
impl<P, U> PostQuery for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn list_posts(&self) -> Result<Vec<AuthoredPost>, Error> {
        let posts = self.posts.list_recent().await.map_err(map_post_error)?;
        let mut authors: HashMap<UserId, Option<User>> = HashMap::new();
        let mut listed = Vec::with_capacity(posts.len());
        for post in posts {
            let author = match authors.get(post.author()) {
                Some(cached) => cached.clone(),
                None => {
                    let resolved = self.author_of(&post).await?;
                    authors.insert(post.author().clone(), resolved.clone());
                    resolved
                }
            };
            listed.push(AuthoredPost { post, author });
        }
        Ok(listed)
    }

    async fn get_post(&self, id: &PostId) -> Result<AuthoredPost, Error> {
        let post = self.load(id).await?;
        let author = self.author_of(&post).await?;
        Ok(AuthoredPost { post, author })
    }

    async fn claim_post(&self, id: &PostId, user: &UserId) -> Result<PostAccess, Error> {
        let access = self.load(id).await?.claim(user);
        if matches!(access, PostAccess::NotOwner) {
            tracing::info!(post_id = %id, user_id = %user, "ownership check refused");
        }
        Ok(access)
    }
}

#[async_trait]
impl<P, U> PostCommand for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn create(&self, author: &UserId, draft: PostDraft) -> Result<Post, Error> {
        if self
            .users
            .find_by_id(author)
            .await
            .map_err(map_author_error)?
            .is_none()
        {
            tracing::warn!(user_id = %author, "post refused: session user no longer exists");
            return Err(Error::unauthorized(UNKNOWN_AUTHOR));
        }
        let post = Post::new(PostId::random(), draft, author.clone(), self.clock.utc());
        self.posts.insert(&post).await.map_err(map_post_error)?;
        tracing::info!(post_id = %post.id(), user_id = %author, "post created");
        Ok(post)
    }

    async fn update(&self, post: OwnedPost, draft: PostDraft) -> Result<Post, Error> {
        let revised = post.revise(draft).into_post();
        let found = self.posts.update(&revised).await.map_err(map_post_error)?;
        if !found {
            return Err(Error::not_found(POST_NOT_FOUND));
        }
        tracing::info!(post_id = %revised.id(), "post updated");
        Ok(revised)
    }

    async fn delete(&self, post: OwnedPost) -> Result<(), Error> {
        let id = post.post().id();
        let found = self.posts.delete(&id).await.map_err(map_post_error)?;
        if !found {
            return Err(Error::not_found(POST_NOT_FOUND));
        }
        tracing::info!(post_id = %id, "post deleted");
        Ok(())
    }
}
