//! Builders wiring repositories and services into [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{FestivalRepository, PostRepository, StateRepository, UserRepository};
use crate::domain::{AccountService, CalendarService, PostService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{MemoryPostRepository, MemoryReferenceData, MemoryUserRepository};
use crate::outbound::persistence::{
    DieselPostRepository, DieselReferenceDataRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Wire the domain services over one set of repositories.
///
/// The account service backs both account ports and the post service both
/// post ports, so each pair shares one instance.
pub(crate) fn wire_services<U, P, R>(
    users: Arc<U>,
    posts: Arc<P>,
    reference: Arc<R>,
    clock: Arc<dyn Clock>,
    calendar_year: i32,
) -> HttpState
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
    R: FestivalRepository + StateRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(users.clone()));
    let post_service = Arc::new(PostService::new(posts, users, clock));
    let calendar = Arc::new(CalendarService::new(
        reference.clone(),
        reference,
        calendar_year,
    ));
    HttpState {
        accounts: accounts.clone(),
        users: accounts,
        posts: post_service.clone(),
        posts_query: post_service,
        calendar,
    }
}

/// In-memory wiring seeded with the bundled reference data.
///
/// # Errors
///
/// Returns an I/O error when the bundled reference data does not decode.
pub fn build_memory_state(calendar_year: i32) -> std::io::Result<HttpState> {
    let reference = MemoryReferenceData::bundled().map_err(|error| {
        std::io::Error::other(format!("bundled reference data is invalid: {error}"))
    })?;
    Ok(wire_services(
        Arc::new(MemoryUserRepository::new()),
        Arc::new(MemoryPostRepository::new()),
        Arc::new(reference),
        Arc::new(DefaultClock),
        calendar_year,
    ))
}

/// Build the HTTP state, using Diesel repositories when a pool is configured
/// and in-memory stores otherwise.
///
/// # Errors
///
/// Propagates failures from [`build_memory_state`].
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.db_pool {
        Some(pool) => {
            tracing::info!(calendar_year = config.calendar_year, "using PostgreSQL stores");
            Ok(wire_services(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselPostRepository::new(pool.clone())),
                Arc::new(DieselReferenceDataRepository::new(pool.clone())),
                Arc::new(DefaultClock),
                config.calendar_year,
            ))
        }
        None => {
            tracing::warn!(
                calendar_year = config.calendar_year,
                "no database configured; accounts and posts are kept in memory"
            );
            build_memory_state(config.calendar_year)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{AccountCommand, CalendarQuery, UsersQuery};
    use crate::domain::{LoginCredentials, MAHARASHTRA, Registration};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn memory_state_shares_accounts_between_ports() {
        let state = build_memory_state(2025).expect("memory state");
        let registration =
            Registration::try_from_parts(Some("alice"), Some("secret1"), Some("secret1"))
                .expect("registration");
        let user = state
            .accounts
            .register(&registration)
            .await
            .expect("register");

        let found = state.users.find_user(user.id()).await.expect("lookup");
        assert_eq!(found.as_ref().map(|u| u.username().as_ref()), Some("alice"));

        let credentials =
            LoginCredentials::try_from_parts(Some("alice"), Some("secret1")).expect("creds");
        state.accounts.login(&credentials).await.expect("login");
    }

    #[rstest]
    #[tokio::test]
    async fn memory_state_serves_the_configured_year() {
        let current = build_memory_state(2025).expect("memory state");
        let groups = current.calendar.festival_calendar().await.expect("calendar");
        assert!(!groups.is_empty());

        let future = build_memory_state(2031).expect("memory state");
        let groups = future.calendar.festival_calendar().await.expect("calendar");
        assert!(groups.is_empty());

        let profile = current
            .calendar
            .state_profile(&MAHARASHTRA)
            .await
            .expect("profile");
        assert_eq!(profile.state_id, MAHARASHTRA.state_id);
    }
}
