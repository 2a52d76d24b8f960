//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing, method override and the authentication gate.

pub mod auth_gate;
pub mod method_override;
pub mod trace;

pub use auth_gate::AuthGate;
pub use method_override::MethodOverride;
pub use trace::Trace;
