//! Stub authentication: fixed demo accounts and a persisted session.

mod accounts;
pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
