//! Driving port for festival calendars and state pages.

use async_trait::async_trait;

use crate::domain::{Error, FestivalMonthGroup, StateProfile, SupportedState};

/// Message for supported states whose reference record is missing.
pub const STATE_NOT_FOUND: &str = "State data not found";

/// Reference data use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarQuery: Send + Sync {
    /// Nationwide festival calendar for the configured year.
    async fn festival_calendar(&self) -> Result<Vec<FestivalMonthGroup>, Error>;

    /// Calendar for one state: its own festivals plus nationwide ones,
    /// ordered by date within each month.
    async fn state_calendar(
        &self,
        state: &SupportedState,
    ) -> Result<Vec<FestivalMonthGroup>, Error>;

    /// Descriptive profile for a state page.
    async fn state_profile(&self, state: &SupportedState) -> Result<StateProfile, Error>;
}
