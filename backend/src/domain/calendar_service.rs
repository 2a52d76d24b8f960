//! Festival calendar and state page service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CalendarQuery, FestivalRepository, ReferenceDataError, STATE_NOT_FOUND, StateRepository,
};
use crate::domain::{
    Error, FestivalFilter, FestivalMonthGroup, StateProfile, SupportedState, group_by_month,
};

/// Calendar year used when configuration does not name one.
pub const DEFAULT_CALENDAR_YEAR: i32 = 2025;

/// Reference data service implementing [`CalendarQuery`].
#[derive(Clone)]
pub struct CalendarService<F, S> {
    festivals: Arc<F>,
    states: Arc<S>,
    year: i32,
}

impl<F, S> CalendarService<F, S> {
    /// Create a service serving calendars for `year`.
    pub fn new(festivals: Arc<F>, states: Arc<S>, year: i32) -> Self {
        Self {
            festivals,
            states,
            year,
        }
    }
}

fn map_reference_error(error: ReferenceDataError) -> Error {
    match error {
        ReferenceDataError::Connection { message } => {
            Error::service_unavailable(format!("reference data unavailable: {message}"))
        }
        ReferenceDataError::Query { message } => {
            Error::internal(format!("reference data error: {message}"))
        }
    }
}

#[async_trait]
impl<F, S> CalendarQuery for CalendarService<F, S>
where
    F: FestivalRepository,
    S: StateRepository,
{
    async fn festival_calendar(&self) -> Result<Vec<FestivalMonthGroup>, Error> {
        let festivals = self
            .festivals
            .find(&FestivalFilter::year(self.year))
            .await
            .map_err(map_reference_error)?;
        Ok(group_by_month(festivals))
    }

    async fn state_calendar(
        &self,
        state: &SupportedState,
    ) -> Result<Vec<FestivalMonthGroup>, Error> {
        let mut festivals = self
            .festivals
            .find(&FestivalFilter::regional(self.year, state.region))
            .await
            .map_err(map_reference_error)?;
        festivals.sort_by_key(|festival| (festival.month, festival.date));
        Ok(group_by_month(festivals))
    }

    async fn state_profile(&self, state: &SupportedState) -> Result<StateProfile, Error> {
        self.states
            .find_by_state_id(state.state_id)
            .await
            .map_err(map_reference_error)?
            .ok_or_else(|| {
                tracing::warn!(state_id = state.state_id, "supported state has no profile");
                Error::not_found(STATE_NOT_FOUND)
            })
    }
}
