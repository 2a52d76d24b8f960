//! PostgreSQL-backed festival and state reference data.
//!
//! Festival months are stored as English names. Rows whose month does not
//! parse are logged and skipped so one bad record cannot empty a calendar.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FestivalRepository, ReferenceDataError, StateRepository};
use crate::domain::{Festival, FestivalFilter, Month, StateProfile};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{FestivalRow, StateRow};
use super::pool::{DbPool, PoolError};
use super::schema::{festivals, states};

/// Diesel-backed implementation of [`FestivalRepository`] and
/// [`StateRepository`].
#[derive(Clone)]
pub struct DieselReferenceDataRepository {
    pool: DbPool,
}

impl DieselReferenceDataRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReferenceDataError {
    map_basic_pool_error(error, |message| ReferenceDataError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> ReferenceDataError {
    map_basic_diesel_error(
        error,
        |message| ReferenceDataError::query(message),
        |message| ReferenceDataError::connection(message),
    )
}

fn row_to_festival(row: FestivalRow) -> Option<Festival> {
    match row.month.parse::<Month>() {
        Ok(month) => Some(Festival {
            name: row.name,
            month,
            date: row.date,
            region: row.region,
            year: row.year,
        }),
        Err(error) => {
            tracing::warn!(festival = %row.name, %error, "skipping festival with unknown month");
            None
        }
    }
}

fn row_to_profile(row: StateRow) -> StateProfile {
    StateProfile {
        state_id: row.state_id,
        name: row.name,
        capital: row.capital,
        summary: row.summary,
        highlights: row.highlights,
    }
}

#[async_trait]
impl FestivalRepository for DieselReferenceDataRepository {
    async fn find(&self, filter: &FestivalFilter) -> Result<Vec<Festival>, ReferenceDataError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = festivals::table
            .filter(festivals::year.eq(filter.year))
            .order(festivals::id.asc())
            .select(FestivalRow::as_select())
            .into_boxed();
        if let Some(regions) = &filter.regions {
            query = query.filter(festivals::region.eq_any(regions));
        }
        let rows: Vec<FestivalRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().filter_map(row_to_festival).collect())
    }
}

#[async_trait]
impl StateRepository for DieselReferenceDataRepository {
    async fn find_by_state_id(
        &self,
        state_id: &str,
    ) -> Result<Option<StateProfile>, ReferenceDataError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<StateRow> = states::table
            .filter(states::state_id.eq(state_id))
            .select(StateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn row(month: &str) -> FestivalRow {
        FestivalRow {
            name: "Gudi Padwa".to_owned(),
            month: month.to_owned(),
            date: NaiveDate::from_ymd_opt(2025, 3, 30).expect("valid date"),
            region: "Maharashtra".to_owned(),
            year: 2025,
        }
    }

    #[rstest]
    fn known_months_map_to_festivals() {
        let festival = row_to_festival(row("March")).expect("festival");
        assert_eq!(festival.month, Month::March);
        assert_eq!(festival.region, "Maharashtra");
    }

    #[rstest]
    #[case("march")]
    #[case("Mar")]
    #[case("")]
    fn unknown_months_are_skipped(#[case] month: &str) {
        assert!(row_to_festival(row(month)).is_none());
    }
}
