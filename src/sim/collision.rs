//! Collidables and the closest-collision query
//!
//! The registry holds every shape a ball can strike and answers one question:
//! along this trajectory, what is hit first? It never mutates balls; balls
//! only look at the returned `CollisionInfo`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ball::Ball;
use super::color::Color;
use crate::geometry::{Line, Point, Rectangle, Velocity};

/// Stable identity of a registered collidable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollidableId(pub u32);

impl fmt::Display for CollidableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// API misuse surfaced by the collision core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollisionError {
    #[error("hit on {id} called with non-finite point {point:?} or velocity {velocity:?}")]
    InvalidHitArguments {
        id: CollidableId,
        point: Point,
        velocity: Velocity,
    },
    #[error("hit on {id} called with {point}, which is not on its boundary")]
    PointOffBoundary { id: CollidableId, point: Point },
    #[error("ball {ball} stepped without a collision registry")]
    Detached { ball: u32 },
}

/// Anything a ball can bounce off
pub trait Collidable {
    fn id(&self) -> CollidableId;

    /// Current bounding shape
    fn collision_rectangle(&self) -> Rectangle;

    fn color(&self) -> Color;

    /// Striking this removes the ball from play
    fn is_death_surface(&self) -> bool {
        false
    }

    /// Velocity after `hitter` strikes `collision_point` with `current_velocity`.
    ///
    /// `collision_point` must lie on the boundary of `collision_rectangle()`.
    fn hit(
        &self,
        hitter: &mut Ball,
        collision_point: Point,
        current_velocity: Velocity,
    ) -> Result<Velocity, CollisionError>;
}

/// Reject NaN/infinite hit arguments before any reflection math
pub(crate) fn check_hit_arguments(
    id: CollidableId,
    point: Point,
    velocity: Velocity,
) -> Result<(), CollisionError> {
    if point.is_finite() && velocity.is_finite() {
        Ok(())
    } else {
        Err(CollisionError::InvalidHitArguments {
            id,
            point,
            velocity,
        })
    }
}

/// Where a trajectory first meets a collidable.
///
/// Borrows the registry entry; clone the `Rc` to keep it past the borrow.
#[derive(Clone, Copy)]
pub struct CollisionInfo<'a> {
    collision_point: Point,
    collidable: &'a Rc<dyn Collidable>,
}

impl<'a> CollisionInfo<'a> {
    pub fn collision_point(&self) -> Point {
        self.collision_point
    }

    pub fn collidable(&self) -> &'a Rc<dyn Collidable> {
        self.collidable
    }
}

impl fmt::Debug for CollisionInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionInfo")
            .field("collision_point", &self.collision_point)
            .field("collidable", &self.collidable.id())
            .finish()
    }
}

impl PartialEq for CollisionInfo<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.collision_point == other.collision_point && Rc::ptr_eq(self.collidable, other.collidable)
    }
}

/// Shared handle: balls and listeners reach the registry through this
pub type RegistryHandle = Rc<RefCell<CollisionRegistry>>;

/// The live set of collidables, in registration order
#[derive(Default)]
pub struct CollisionRegistry {
    collidables: Vec<Rc<dyn Collidable>>,
}

impl CollisionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_handle(self) -> RegistryHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn register(&mut self, collidable: Rc<dyn Collidable>) {
        self.collidables.push(collidable);
    }

    /// Remove by id. Unknown ids are ignored.
    pub fn deregister(&mut self, id: CollidableId) {
        self.collidables.retain(|c| c.id() != id);
    }

    pub fn contains(&self, id: CollidableId) -> bool {
        self.collidables.iter().any(|c| c.id() == id)
    }

    pub fn get(&self, id: CollidableId) -> Option<&Rc<dyn Collidable>> {
        self.collidables.iter().find(|c| c.id() == id)
    }

    pub fn len(&self) -> usize {
        self.collidables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collidables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn Collidable>> {
        self.collidables.iter()
    }

    /// The collision nearest to `trajectory.start()`, if any.
    ///
    /// Equidistant hits on different collidables resolve to the one registered
    /// first. That order is not part of the contract; callers must not rely on it.
    pub fn closest_collision(&self, trajectory: &Line) -> Option<CollisionInfo<'_>> {
        let origin = trajectory.start();
        let mut closest: Option<(CollisionInfo<'_>, f64)> = None;

        for collidable in &self.collidables {
            let rect = collidable.collision_rectangle();
            let Some(point) = trajectory.closest_intersection_to_start(&rect) else {
                continue;
            };
            let dist = origin.distance(point);
            if closest.as_ref().is_none_or(|(_, best)| dist < *best) {
                closest = Some((
                    CollisionInfo {
                        collision_point: point,
                        collidable,
                    },
                    dist,
                ));
            }
        }

        closest.map(|(info, _)| info)
    }
}

impl fmt::Debug for CollisionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.collidables.iter().map(|c| c.id()))
            .finish()
    }
}
