//! Read-side views over a catalog snapshot: the query pipeline, dashboard
//! figures and the demo seed used when nothing is stored yet.

pub mod query;
pub mod seed;
pub mod stats;

pub use query::*;
pub use stats::*;
