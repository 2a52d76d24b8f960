//! Account domain service.
//!
//! Implements registration, login and user lookup on top of a
//! [`UserRepository`]. Argon2 work runs on the blocking pool so request
//! workers stay responsive while a hash is computed.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;
use zeroize::Zeroizing;

use crate::domain::ports::{AccountCommand, UserPersistenceError, UserRepository, UsersQuery};
use crate::domain::{
    Error, LoginCredentials, PasswordHash, Registration, User, UserAccount, UserId, Username,
};

/// Message for every rejected login, whichever part was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Message for registrations that pick an existing username.
pub const USERNAME_TAKEN: &str = "Username already exists";

/// Account service implementing [`AccountCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create a new service over the given repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => Error::invalid_request(USERNAME_TAKEN),
    }
}

fn map_join_error(error: task::JoinError) -> Error {
    Error::internal(format!("password hashing task failed: {error}"))
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    async fn hash_password(password: &str) -> Result<PasswordHash, Error> {
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || PasswordHash::hash(password.as_str()))
            .await
            .map_err(map_join_error)?
            .map_err(|err| Error::internal(err.to_string()))
    }

    async fn verify_password(hash: PasswordHash, password: &str) -> Result<bool, Error> {
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || hash.verify(password.as_str()))
            .await
            .map_err(map_join_error)
    }
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let username = registration.username();
        if self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(Error::invalid_request(USERNAME_TAKEN));
        }

        let hash = Self::hash_password(registration.password()).await?;
        let user = User::new(UserId::random(), username.clone());
        // A concurrent registration can still win the race; the repository
        // reports that as a duplicate, which maps to the same message.
        self.users
            .insert(&UserAccount::new(user.clone(), hash))
            .await
            .map_err(map_user_error)?;

        tracing::info!(user_id = %user.id(), "account registered");
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let account = match Username::new(credentials.username()) {
            Ok(username) => self
                .users
                .find_by_username(&username)
                .await
                .map_err(map_user_error)?,
            Err(_) => None,
        };
        let Some(account) = account else {
            // Unknown usernames pay for a verify too.
            Self::verify_password(PasswordHash::decoy(), credentials.password()).await?;
            tracing::debug!("login rejected: unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let hash = account.password_hash().clone();
        if !Self::verify_password(hash, credentials.password()).await? {
            tracing::debug!(user_id = %account.user().id(), "login rejected: wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.into_user())
    }
}

#[async_trait]
impl<U> UsersQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
