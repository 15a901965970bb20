//! Catalog store: the product entity wired into the resource actor.

pub mod entity;
pub mod error;
mod ids;

pub use error::*;
pub use ids::*;
