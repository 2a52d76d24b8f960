//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories) are implemented by the outbound adapters;
//! driving ports (commands and queries) are implemented by the domain
//! services and consumed by the HTTP layer.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod calendar_query;
mod post_command;
mod post_query;
mod post_repository;
mod reference_data_repository;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use calendar_query::MockCalendarQuery;
pub use calendar_query::{CalendarQuery, STATE_NOT_FOUND};
#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_command::PostCommand;
#[cfg(test)]
pub use post_query::MockPostQuery;
pub use post_query::{POST_NOT_FOUND, PostQuery};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostPersistenceError, PostRepository};
#[cfg(test)]
pub use reference_data_repository::{MockFestivalRepository, MockStateRepository};
pub use reference_data_repository::{FestivalRepository, ReferenceDataError, StateRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
