//! Plane geometry for the collision core
//!
//! Everything here is a `Copy` value type rebuilt on every query:
//! - No shared mutable state
//! - Epsilon-tolerant comparisons (see `crate::consts`)
//! - Absence is `None`, never a sentinel point

pub mod line;
pub mod point;
pub mod rectangle;
pub mod velocity;

pub use line::Line;
pub use point::Point;
pub use rectangle::Rectangle;
pub use velocity::Velocity;
