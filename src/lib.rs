//! Brick Collide - collision core of a brick-breaking game
//!
//! Core modules:
//! - `geometry`: Points, segments, rectangles and velocities with epsilon-tolerant math
//! - `sim`: Collidables, the collision registry, ball stepping and game state
//! - `settings`: Data-driven play-area and level configuration

pub mod geometry;
pub mod settings;
pub mod sim;

pub use geometry::{Line, Point, Rectangle, Velocity};
pub use settings::{BottomEdge, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Tolerance for point equality
    pub const POINT_EPSILON: f64 = 1e-5;
    /// Tolerance for range, slope and axis-parallel checks.
    /// Looser than `POINT_EPSILON`: intersection arithmetic compounds round-off.
    pub const LINE_EPSILON: f64 = 1e-4;

    /// Simulation rate of the original frame loop
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Number of equal zones on the paddle's top edge
    pub const PADDLE_ZONES: usize = 5;
    /// Outgoing angle per paddle zone (degrees, 0 = up, clockwise).
    /// `None` is the middle zone: a plain vertical bounce.
    pub const PADDLE_ZONE_ANGLES: [Option<f64>; PADDLE_ZONES] =
        [Some(300.0), Some(330.0), None, Some(30.0), Some(60.0)];

    /// Gap between the paddle and the bottom of the screen
    pub const PADDLE_BOTTOM_MARGIN: f64 = 20.0;
    /// How far below the screen the death block sits
    pub const DEATH_BLOCK_DROP: f64 = 10.0;

    /// Points for destroying a block
    pub const BLOCK_HIT_SCORE: i64 = 5;
    /// Bonus for clearing every block
    pub const LEVEL_CLEAR_BONUS: i64 = 100;
}
