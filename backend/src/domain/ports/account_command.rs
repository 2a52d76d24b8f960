//! Driving port for registration and login.
//!
//! Inbound adapters call this port with already-validated forms; the
//! implementation owns uniqueness checks, hashing and credential comparison.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

/// Account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account and return the new user.
    ///
    /// Fails with `InvalidRequest("Username already exists")` when taken.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Check credentials and return the matching user.
    ///
    /// Unknown usernames and wrong passwords fail with the same
    /// `Unauthorized("Invalid username or password")` error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
