//! Ports for read-only festival and state reference data.

use async_trait::async_trait;

use crate::domain::{Festival, FestivalFilter, StateProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading reference data.
    pub enum ReferenceDataError {
        /// Repository connection could not be established.
        Connection { message: String } => "reference data connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "reference data query failed: {message}",
    }
}

/// Festival calendar source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FestivalRepository: Send + Sync {
    /// Festivals matching `filter`, in storage order.
    async fn find(&self, filter: &FestivalFilter) -> Result<Vec<Festival>, ReferenceDataError>;
}

/// State profile source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Look up a state by its reference key (e.g. `INMH`).
    async fn find_by_state_id(
        &self,
        state_id: &str,
    ) -> Result<Option<StateProfile>, ReferenceDataError>;
}
