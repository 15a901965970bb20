//! Scroll-driven presentation state: viewport visibility of page regions and
//! the parallax helpers that animate them.

pub mod geometry;
pub mod motion;
pub mod tracker;

pub use geometry::*;
pub use motion::*;
pub use tracker::*;
