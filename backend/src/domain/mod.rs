//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence layers, and the services that implement the driving ports.
//! Types validate on construction; Rustdoc on each type records its
//! invariants and serialisation contract.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure payload.
//! - [`User`], [`UserAccount`] and [`PasswordHash`]: accounts.
//! - [`Post`], [`PostDraft`] and [`OwnedPost`]: blog posts and the
//!   ownership capability.
//! - [`Festival`], [`FestivalMonthGroup`] and [`StateProfile`]: reference
//!   data for calendar and state pages.
//! - [`AccountService`], [`PostService`] and [`CalendarService`].

pub mod account_service;
pub mod auth;
pub mod calendar_service;
pub mod error;
pub mod festival;
pub mod password;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod state_profile;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, INVALID_CREDENTIALS, USERNAME_TAKEN};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN_LEN, Registration, RegistrationError,
};
pub use self::calendar_service::{CalendarService, DEFAULT_CALENDAR_YEAR};
pub use self::error::{
    Error, ErrorCode, INVALID_ID_MESSAGE, TRACE_ID_HEADER, VALIDATION_PREFIX,
};
pub use self::festival::{
    Festival, FestivalFilter, FestivalMonthGroup, Month, PAN_INDIA_REGION, UnknownMonth,
    group_by_month,
};
pub use self::password::{PasswordHash, PasswordHashError};
pub use self::post::{
    AuthoredPost, CONTENT_MAX, OwnedPost, Post, PostAccess, PostDraft, PostDraftError, PostId,
    TITLE_MAX,
};
pub use self::post_service::{PostService, UNKNOWN_AUTHOR};
pub use self::state_profile::{MAHARASHTRA, StateProfile, SupportedState};
pub use self::trace_id::TraceId;
pub use self::user::{USERNAME_MAX, User, UserAccount, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use heritage::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Post not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
