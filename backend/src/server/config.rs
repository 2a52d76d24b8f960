//! Application settings and the HTTP server configuration object.

use std::ffi::OsString;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_CALENDAR_YEAR;
use crate::inbound::http::session_config::SessionSettings;
use crate::outbound::persistence::{DEFAULT_MAX_CONNECTIONS, DbPool};

/// Listen address used when `HERITAGE_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while loading [`AppSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Layered configuration could not be merged.
    #[error("failed to load settings: {message}")]
    Load { message: String },
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address `{value}`: {message}")]
    BindAddr { value: String, message: String },
}

/// Process settings loaded from CLI flags, config files and `HERITAGE_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HERITAGE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the server keeps state in memory.
    pub database_url: Option<String>,
    /// Year served by the festival calendars.
    pub calendar_year: Option<i32>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Load settings for the `heritage` binary without CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a source is malformed.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from("heritage")]).map_err(|error| SettingsError::Load {
            message: error.to_string(),
        })
    }

    /// Parsed listen address, falling back to [`DEFAULT_BIND_ADDR`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|error: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: error.to_string(),
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Calendar year, falling back to [`DEFAULT_CALENDAR_YEAR`].
    pub fn calendar_year(&self) -> i32 {
        self.calendar_year.unwrap_or(DEFAULT_CALENDAR_YEAR)
    }

    /// Pool size, falling back to [`DEFAULT_MAX_CONNECTIONS`].
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) calendar_year: i32,
}

impl ServerConfig {
    /// Configuration with in-memory stores and the default calendar year.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            calendar_year: DEFAULT_CALENDAR_YEAR,
        }
    }

    /// Attach a database connection pool; repositories become Diesel-backed.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Serve festival calendars for `year`.
    #[must_use]
    pub fn with_calendar_year(mut self, year: i32) -> Self {
        self.calendar_year = year;
        self
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
