//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, CalendarQuery, PostCommand, PostQuery, UsersQuery};

/// Dependency bundle for HTTP handlers.
///
/// Each field is a driving port; the server wires domain services behind
/// them, tests may substitute mocks.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login.
    pub accounts: Arc<dyn AccountCommand>,
    /// Resolves the visitor behind a session.
    pub users: Arc<dyn UsersQuery>,
    /// Post mutations.
    pub posts: Arc<dyn PostCommand>,
    /// Post reads and the ownership gate.
    pub posts_query: Arc<dyn PostQuery>,
    /// Festival calendars and state pages.
    pub calendar: Arc<dyn CalendarQuery>,
}
