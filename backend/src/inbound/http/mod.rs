//! HTTP inbound adapter exposing the site's pages and forms.

pub mod accounts;
pub mod error;
pub mod forms;
pub mod health;
pub mod pages;
pub mod posts;
pub mod session;
pub mod session_config;
pub mod state;
pub mod states;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::ApiResult;
