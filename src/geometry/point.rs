//! 2D points with tolerant equality

use std::fmt;
use std::ops::RangeInclusive;

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::POINT_EPSILON;

/// A location in screen space (x right, y down)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        self.as_vec().distance(other.as_vec())
    }

    /// Both coordinates are neither NaN nor infinite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.as_vec().is_finite()
    }

    #[inline]
    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Random point with integer coordinates inside the given inclusive ranges
    pub fn random_in<R: Rng + ?Sized>(
        x_range: RangeInclusive<i32>,
        y_range: RangeInclusive<i32>,
        rng: &mut R,
    ) -> Self {
        let x = rng.random_range(x_range);
        let y = rng.random_range(y_range);
        Self::new(f64::from(x), f64::from(y))
    }
}

/// Coordinates within `POINT_EPSILON` of each other compare equal.
/// Not transitive, which is fine for the small deltas the engine produces.
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= POINT_EPSILON && (self.y - other.y).abs() <= POINT_EPSILON
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.as_vec()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
