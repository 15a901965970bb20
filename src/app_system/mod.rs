//! System orchestration, startup, and shutdown logic.

pub mod error;
pub mod storefront_system;
pub mod telemetry;

pub use storefront_system::*;
pub use telemetry::*;
