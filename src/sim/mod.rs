//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (registration and spawn order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod block;
pub mod collision;
pub mod color;
pub mod listeners;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::{Ball, StepOutcome, WorldBounds};
pub use block::Block;
pub use collision::{
    Collidable, CollidableId, CollisionError, CollisionInfo, CollisionRegistry, RegistryHandle,
};
pub use color::Color;
pub use listeners::{
    BallRemover, BlockRemover, Counter, HitListener, HitNotifier, ScoreTrackingListener,
};
pub use paddle::Paddle;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, run, tick};
