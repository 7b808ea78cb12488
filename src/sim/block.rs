//! Rectangular blocks: bricks, walls and the death floor

use std::rc::Rc;

use super::ball::Ball;
use super::collision::{Collidable, CollidableId, CollisionError, check_hit_arguments};
use super::color::Color;
use super::listeners::{HitListener, HitNotifier, remove_listener};
use crate::geometry::{Point, Rectangle, Velocity};

/// A static rectangle that reflects balls and reports hits
pub struct Block {
    id: CollidableId,
    rectangle: Rectangle,
    color: Color,
    death: bool,
    hit_listeners: Vec<Rc<dyn HitListener>>,
}

impl Block {
    pub fn new(id: CollidableId, rectangle: Rectangle, color: Color) -> Self {
        Self {
            id,
            rectangle,
            color,
            death: false,
            hit_listeners: Vec::new(),
        }
    }

    /// Mark as a death surface (balls striking it leave play)
    pub fn with_death(mut self, death: bool) -> Self {
        self.death = death;
        self
    }

    pub fn rectangle(&self) -> Rectangle {
        self.rectangle
    }

    pub fn is_death_block(&self) -> bool {
        self.death
    }

    pub fn listener_count(&self) -> usize {
        self.hit_listeners.len()
    }

    fn ball_color_match(&self, ball: &Ball) -> bool {
        self.color == ball.color()
    }

    fn notify_hit(&self, hitter: &mut Ball) {
        let listeners = self.hit_listeners.clone();
        for listener in &listeners {
            listener.hit_event(self, hitter);
        }
    }
}

impl Collidable for Block {
    fn id(&self) -> CollidableId {
        self.id
    }

    fn collision_rectangle(&self) -> Rectangle {
        self.rectangle
    }

    fn color(&self) -> Color {
        self.color
    }

    fn is_death_surface(&self) -> bool {
        self.death
    }

    /// Top/bottom edge flips dy, left/right edge flips dx, a corner flips both.
    /// Balls of a different colour trigger the block's listeners.
    fn hit(
        &self,
        hitter: &mut Ball,
        collision_point: Point,
        current_velocity: Velocity,
    ) -> Result<Velocity, CollisionError> {
        check_hit_arguments(self.id, collision_point, current_velocity)?;

        let rect = self.rectangle;
        let horizontal_edge =
            rect.top_line().contains(collision_point) || rect.bottom_line().contains(collision_point);
        let vertical_edge =
            rect.left_line().contains(collision_point) || rect.right_line().contains(collision_point);

        if !horizontal_edge && !vertical_edge {
            return Err(CollisionError::PointOffBoundary {
                id: self.id,
                point: collision_point,
            });
        }

        let mut velocity = current_velocity;
        if horizontal_edge {
            velocity.flip_y();
        }
        if vertical_edge {
            velocity.flip_x();
        }

        if !self.ball_color_match(hitter) {
            self.notify_hit(hitter);
        }

        Ok(velocity)
    }
}

impl HitNotifier for Block {
    fn add_hit_listener(&mut self, listener: Rc<dyn HitListener>) {
        self.hit_listeners.push(listener);
    }

    fn remove_hit_listener(&mut self, listener: &Rc<dyn HitListener>) {
        remove_listener(&mut self.hit_listeners, listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::listeners::Counter;
    use crate::sim::listeners::ScoreTrackingListener;

    fn unit_block() -> Block {
        Block::new(
            CollidableId(1),
            Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0),
            Color::GRAY,
        )
    }

    fn ball(color: Color) -> Ball {
        Ball::new(1, Point::new(5.0, 5.0), 2.0, color, Velocity::new(0.0, 3.0))
    }

    #[test]
    fn test_bottom_edge_flips_dy() {
        let block = unit_block();
        let v = block
            .hit(&mut ball(Color::ORANGE), Point::new(5.0, 10.0), Velocity::new(1.0, 3.0))
            .unwrap();
        assert_eq!(v, Velocity::new(1.0, -3.0));
    }

    #[test]
    fn test_side_edge_flips_dx() {
        let block = unit_block();
        let v = block
            .hit(&mut ball(Color::ORANGE), Point::new(0.0, 4.0), Velocity::new(2.0, -1.0))
            .unwrap();
        assert_eq!(v, Velocity::new(-2.0, -1.0));
    }

    #[test]
    fn test_corner_flips_both() {
        let block = unit_block();
        let v = block
            .hit(&mut ball(Color::ORANGE), Point::new(10.0, 10.0), Velocity::new(-2.0, -2.0))
            .unwrap();
        assert_eq!(v, Velocity::new(2.0, 2.0));
    }

    #[test]
    fn test_off_boundary_is_an_error() {
        let block = unit_block();
        let err = block
            .hit(&mut ball(Color::ORANGE), Point::new(5.0, 5.0), Velocity::new(0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, CollisionError::PointOffBoundary { .. }));
    }

    #[test]
    fn test_non_finite_arguments_are_an_error() {
        let block = unit_block();
        let err = block
            .hit(&mut ball(Color::ORANGE), Point::new(f64::NAN, 10.0), Velocity::new(0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, CollisionError::InvalidHitArguments { .. }));

        let err = block
            .hit(
                &mut ball(Color::ORANGE),
                Point::new(5.0, 10.0),
                Velocity::new(f64::INFINITY, 1.0),
            )
            .unwrap_err();
        assert!(matches!(err, CollisionError::InvalidHitArguments { .. }));
    }

    #[test]
    fn test_listeners_fire_only_on_colour_mismatch() {
        let score = Counter::default();
        let mut block = unit_block();
        block.add_hit_listener(Rc::new(ScoreTrackingListener::new(score.clone())));

        let mut same = ball(Color::GRAY);
        block
            .hit(&mut same, Point::new(5.0, 10.0), Velocity::new(0.0, 3.0))
            .unwrap();
        assert_eq!(score.value(), 0);

        let mut other = ball(Color::ORANGE);
        block
            .hit(&mut other, Point::new(5.0, 10.0), Velocity::new(0.0, 3.0))
            .unwrap();
        assert_eq!(score.value(), crate::consts::BLOCK_HIT_SCORE);
    }

    #[test]
    fn test_remove_hit_listener() {
        let score = Counter::default();
        let listener: Rc<dyn HitListener> = Rc::new(ScoreTrackingListener::new(score.clone()));
        let mut block = unit_block();
        block.add_hit_listener(listener.clone());
        assert_eq!(block.listener_count(), 1);

        block.remove_hit_listener(&listener);
        block.remove_hit_listener(&listener);
        assert_eq!(block.listener_count(), 0);

        block
            .hit(&mut ball(Color::ORANGE), Point::new(5.0, 10.0), Velocity::new(0.0, 3.0))
            .unwrap();
        assert_eq!(score.value(), 0);
    }
}
