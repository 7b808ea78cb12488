//! Per-tick displacement vectors

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Point;

/// Displacement applied to a body every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

impl Velocity {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Build from a heading and a speed.
    ///
    /// Angles are in degrees, 0 points up the screen and they grow clockwise,
    /// so 90 moves right and 180 moves down.
    pub fn from_angle_and_speed(angle_deg: f64, speed: f64) -> Self {
        let rad = angle_deg.to_radians();
        Self::new(rad.sin() * speed, -rad.cos() * speed)
    }

    /// Magnitude of the displacement
    #[inline]
    pub fn speed(&self) -> f64 {
        self.as_vec().length()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.as_vec().is_finite()
    }

    #[inline]
    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.dx, self.dy)
    }

    /// Negate the horizontal component
    pub fn flip_x(&mut self) {
        self.dx = -self.dx;
    }

    /// Negate the vertical component
    pub fn flip_y(&mut self) {
        self.dy = -self.dy;
    }

    /// Reverse direction on both axes
    pub fn u_turn(&mut self) {
        self.flip_x();
        self.flip_y();
    }

    /// The point reached by moving `p` one tick
    #[inline]
    pub fn apply_to_point(&self, p: Point) -> Point {
        Point::from(p.as_vec() + self.as_vec())
    }

    /// Random heading at the given speed
    pub fn random_with_speed<R: Rng + ?Sized>(speed: f64, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..360.0);
        Self::from_angle_and_speed(angle, speed)
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}
