//! The moving body and its per-tick step
//!
//! Each tick the ball casts its velocity as a trajectory, asks the registry
//! what it strikes first, and either moves freely or snaps to the collision
//! point with the velocity the struck object hands back.

use std::rc::Rc;

use super::collision::{Collidable, CollidableId, CollisionError, RegistryHandle};
use super::color::Color;
use super::listeners::{HitListener, HitNotifier, remove_listener};
use crate::geometry::{Line, Point, Rectangle, Velocity};
use crate::settings::BottomEdge;

/// Play area the ball is kept inside after every step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Region inside the walls
    pub interior: Rectangle,
    pub bottom: BottomEdge,
}

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Moved,
    Collided { point: Point, target: CollidableId },
}

pub struct Ball {
    id: u32,
    center: Point,
    radius: f64,
    color: Color,
    velocity: Velocity,
    registry: Option<RegistryHandle>,
    hit_listeners: Vec<Rc<dyn HitListener>>,
    removed: bool,
}

impl Ball {
    /// # Panics
    /// Panics if `radius` is not strictly positive.
    pub fn new(id: u32, center: Point, radius: f64, color: Color, velocity: Velocity) -> Self {
        assert!(radius > 0.0, "invalid ball radius: {radius}");
        Self {
            id,
            center,
            radius,
            color,
            velocity,
            registry: None,
            hit_listeners: Vec::new(),
            removed: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    /// Attach the registry this ball collides against
    pub fn set_registry(&mut self, registry: RegistryHandle) {
        self.registry = Some(registry);
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Take the ball out of play. It keeps its state but drops its listeners.
    pub fn remove_from_game(&mut self) {
        self.removed = true;
        self.hit_listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.hit_listeners.len()
    }

    fn notify_exit(&mut self, surface: &dyn Collidable) {
        let listeners = self.hit_listeners.clone();
        for listener in &listeners {
            listener.hit_event(surface, self);
        }
    }

    /// Advance one tick.
    ///
    /// The registry borrow ends before `hit` runs, so listeners reacting to
    /// the hit may deregister collidables. A failed `hit` leaves the ball and
    /// its listeners untouched.
    pub fn move_one_step(&mut self, bounds: &WorldBounds) -> Result<StepOutcome, CollisionError> {
        let registry = self
            .registry
            .clone()
            .ok_or(CollisionError::Detached { ball: self.id })?;

        let incoming = self.velocity;
        let trajectory = Line::new(self.center, incoming.apply_to_point(self.center));

        let collision = {
            let registry = registry.borrow();
            registry
                .closest_collision(&trajectory)
                .map(|info| (info.collision_point(), Rc::clone(info.collidable())))
        };

        let outcome = match collision {
            None => {
                self.center = trajectory.end();
                StepOutcome::Moved
            }
            Some((point, target)) => {
                log::debug!("Ball {} struck {} at {}", self.id, target.id(), point);
                let outgoing = target.hit(self, point, incoming)?;
                if target.is_death_surface() {
                    self.notify_exit(target.as_ref());
                }
                self.center = self.move_to_collision(point, incoming);
                self.velocity = outgoing;
                StepOutcome::Collided {
                    point,
                    target: target.id(),
                }
            }
        };

        self.check_boundary_collision(bounds);
        Ok(outcome)
    }

    /// Center position touching `point`, backed off by the radius on each
    /// axis the ball was travelling along
    fn move_to_collision(&self, point: Point, incoming: Velocity) -> Point {
        let back_off = |component: f64| {
            if component > 0.0 {
                -self.radius
            } else if component < 0.0 {
                self.radius
            } else {
                0.0
            }
        };
        Point::new(point.x + back_off(incoming.dx), point.y + back_off(incoming.dy))
    }

    /// Keep the ball inside the play area, turning the velocity inward
    fn check_boundary_collision(&mut self, bounds: &WorldBounds) {
        let area = bounds.interior;
        let left = area.upper_left().x + self.radius;
        let right = area.upper_right().x - self.radius;
        let top = area.upper_left().y + self.radius;
        let bottom = area.lower_left().y - self.radius;

        if self.center.y < top {
            self.center.y = top;
            self.velocity.dy = self.velocity.dy.abs();
        }
        if self.center.x < left {
            self.center.x = left;
            self.velocity.dx = self.velocity.dx.abs();
        }
        if self.center.x > right {
            self.center.x = right;
            self.velocity.dx = -self.velocity.dx.abs();
        }
        if bounds.bottom == BottomEdge::Reflect && self.center.y > bottom {
            self.center.y = bottom;
            self.velocity.dy = -self.velocity.dy.abs();
        }
    }
}

impl HitNotifier for Ball {
    fn add_hit_listener(&mut self, listener: Rc<dyn HitListener>) {
        self.hit_listeners.push(listener);
    }

    fn remove_hit_listener(&mut self, listener: &Rc<dyn HitListener>) {
        remove_listener(&mut self.hit_listeners, listener);
    }
}
