//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use std::sync::Arc;

use crate::domain::ports::{
    MockAccountCommand, MockCalendarQuery, MockPostCommand, MockPostQuery, MockUsersQuery,
};
use crate::inbound::http::state::HttpState;

/// Handler state whose ports all reject unexpected calls.
///
/// Tests replace the fields they exercise with configured mocks.
pub fn test_state() -> HttpState {
    HttpState {
        accounts: Arc::new(MockAccountCommand::new()),
        users: Arc::new(MockUsersQuery::new()),
        posts: Arc::new(MockPostCommand::new()),
        posts_query: Arc::new(MockPostQuery::new()),
        calendar: Arc::new(MockCalendarQuery::new()),
    }
}

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Pull the session cookie out of a test response.
pub trait SessionCookieExt {
    /// The `session` cookie set by the response.
    ///
    /// # Panics
    /// Panics when the response did not set the cookie.
    fn session_cookie(&self) -> Cookie<'static>;
}

impl<B> SessionCookieExt for ServiceResponse<B> {
    fn session_cookie(&self) -> Cookie<'static> {
        self.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(Cookie::into_owned)
            .expect("session cookie set")
    }
}
