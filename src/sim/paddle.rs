//! The player's paddle
//!
//! The top edge is split into five zones. Outer zones send the ball off at a
//! fixed angle, the middle zone is a plain bounce, so the player can aim.

use std::cell::Cell;

use super::ball::Ball;
use super::collision::{Collidable, CollidableId, CollisionError, check_hit_arguments};
use super::color::Color;
use crate::consts::{PADDLE_ZONE_ANGLES, PADDLE_ZONES};
use crate::geometry::{Point, Rectangle, Velocity};

/// A horizontally moving collidable.
///
/// The shape sits in a `Cell` so the paddle can move while shared with the
/// registry.
pub struct Paddle {
    id: CollidableId,
    shape: Cell<Rectangle>,
    color: Color,
    /// Horizontal distance per move
    step: f64,
    /// Play-area x extent the paddle moves within
    min_x: f64,
    max_x: f64,
}

impl Paddle {
    pub fn new(
        id: CollidableId,
        shape: Rectangle,
        color: Color,
        step: f64,
        min_x: f64,
        max_x: f64,
    ) -> Self {
        Self {
            id,
            shape: Cell::new(shape),
            color,
            step,
            min_x,
            max_x,
        }
    }

    pub fn shape(&self) -> Rectangle {
        self.shape.get()
    }

    fn set_x(&self, x: f64) {
        let shape = self.shape.get();
        let upper_left = Point::new(x, shape.upper_left().y);
        self.shape.set(shape.with_upper_left(upper_left));
    }

    /// Step left; from the left edge wrap around to the right edge
    pub fn move_left(&self) {
        let shape = self.shape.get();
        let x = shape.upper_left().x;
        if x > self.min_x {
            self.set_x((x - self.step).max(self.min_x));
        } else {
            self.set_x(self.max_x - shape.width());
        }
    }

    /// Step right; from the right edge wrap around to the left edge
    pub fn move_right(&self) {
        let shape = self.shape.get();
        let x = shape.upper_left().x;
        if x + shape.width() < self.max_x {
            self.set_x((x + self.step).min(self.max_x - shape.width()));
        } else {
            self.set_x(self.min_x);
        }
    }

    /// Step toward centring on `target_x`, without wrapping
    pub fn track(&self, target_x: f64) {
        let shape = self.shape.get();
        let center = shape.center().x;
        let delta = (target_x - center).clamp(-self.step, self.step);
        let x = (shape.upper_left().x + delta).clamp(self.min_x, self.max_x - shape.width());
        self.set_x(x);
    }
}

impl Collidable for Paddle {
    fn id(&self) -> CollidableId {
        self.id
    }

    fn collision_rectangle(&self) -> Rectangle {
        self.shape.get()
    }

    fn color(&self) -> Color {
        self.color
    }

    fn hit(
        &self,
        _hitter: &mut Ball,
        collision_point: Point,
        current_velocity: Velocity,
    ) -> Result<Velocity, CollisionError> {
        check_hit_arguments(self.id, collision_point, current_velocity)?;

        let shape = self.shape.get();
        let top = shape.top_line();
        if top.contains(collision_point) && current_velocity.dy > 0.0 {
            let speed = current_velocity.speed();
            let zones = top.divide(PADDLE_ZONES);
            let angle = zones
                .iter()
                .zip(PADDLE_ZONE_ANGLES)
                .find(|(zone, _)| zone.contains(collision_point))
                .and_then(|(_, angle)| angle);
            return Ok(match angle {
                Some(angle) => Velocity::from_angle_and_speed(angle, speed),
                None => Velocity::new(current_velocity.dx, -current_velocity.dy),
            });
        }

        let horizontal_edge =
            top.contains(collision_point) || shape.bottom_line().contains(collision_point);
        let vertical_edge = shape.left_line().contains(collision_point)
            || shape.right_line().contains(collision_point);

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
        Ok(velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Paddle from x = 100 to 150 at y = 500, zones 10 wide
    fn paddle() -> Paddle {
        Paddle::new(
            CollidableId(1),
            Rectangle::new(Point::new(100.0, 500.0), 50.0, 10.0),
            Color::ORANGE,
            8.0,
            10.0,
            790.0,
        )
    }

    fn ball() -> Ball {
        Ball::new(1, Point::new(0.0, 0.0), 3.0, Color::GRAY, Velocity::new(0.0, 4.0))
    }

    fn hit_top(x: f64, velocity: Velocity) -> Velocity {
        paddle()
            .hit(&mut ball(), Point::new(x, 500.0), velocity)
            .unwrap()
    }

    #[test]
    fn test_middle_zone_bounces_straight() {
        let v = hit_top(125.0, Velocity::new(1.0, 4.0));
        assert_eq!(v, Velocity::new(1.0, -4.0));
    }

    #[test]
    fn test_outer_zones_fan_out() {
        let incoming = Velocity::new(0.0, 5.0);
        let steep_left = hit_top(102.0, incoming);
        let shallow_left = hit_top(115.0, incoming);
        let shallow_right = hit_top(135.0, incoming);
        let steep_right = hit_top(148.0, incoming);

        for v in [steep_left, shallow_left, shallow_right, steep_right] {
            assert!(v.dy < 0.0, "ball must leave upward: {v:?}");
            assert!((v.speed() - 5.0).abs() < 1e-9);
        }
        assert!(steep_left.dx < shallow_left.dx && shallow_left.dx < 0.0);
        assert!(steep_right.dx > shallow_right.dx && shallow_right.dx > 0.0);
        assert!((steep_left.dx + steep_right.dx).abs() < 1e-9);
        assert!((shallow_left.dx + shallow_right.dx).abs() < 1e-9);
    }

    #[test]
    fn test_side_edges_invert_dx() {
        let v = paddle()
            .hit(&mut ball(), Point::new(100.0, 505.0), Velocity::new(3.0, 1.0))
            .unwrap();
        assert_eq!(v, Velocity::new(-3.0, 1.0));

        let v = paddle()
            .hit(&mut ball(), Point::new(150.0, 505.0), Velocity::new(-3.0, 1.0))
            .unwrap();
        assert_eq!(v, Velocity::new(3.0, 1.0));
    }

    #[test]
    fn test_top_and_bottom_from_below_flip_dy() {
        let v = hit_top(125.0, Velocity::new(1.0, -4.0));
        assert_eq!(v, Velocity::new(1.0, 4.0));

        let v = paddle()
            .hit(&mut ball(), Point::new(125.0, 510.0), Velocity::new(-2.0, -5.0))
            .unwrap();
        assert_eq!(v, Velocity::new(-2.0, 5.0));
    }

    #[test]
    fn test_bottom_corner_flips_both() {
        let v = paddle()
            .hit(&mut ball(), Point::new(150.0, 510.0), Velocity::new(-3.0, -3.0))
            .unwrap();
        assert_eq!(v, Velocity::new(3.0, 3.0));
    }

    #[test]
    fn test_errors() {
        let err = paddle()
            .hit(&mut ball(), Point::new(125.0, 300.0), Velocity::new(0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, CollisionError::PointOffBoundary { .. }));

        let err = paddle()
            .hit(&mut ball(), Point::new(125.0, 500.0), Velocity::new(f64::NAN, 1.0))
            .unwrap_err();
        assert!(matches!(err, CollisionError::InvalidHitArguments { .. }));
    }

    #[test]
    fn test_movement_wraps() {
        let p = paddle();
        p.move_left();
        assert_eq!(p.shape().upper_left().x, 92.0);

        let p = Paddle::new(
            CollidableId(1),
            Rectangle::new(Point::new(10.0, 500.0), 50.0, 10.0),
            Color::ORANGE,
            8.0,
            10.0,
            790.0,
        );
        p.move_left();
        assert_eq!(p.shape().upper_left().x, 740.0);
        p.move_right();
        assert_eq!(p.shape().upper_left().x, 10.0);
        p.move_right();
        assert_eq!(p.shape().upper_left().x, 18.0);
    }

    #[test]
    fn test_track_clamps_to_step_and_area() {
        let p = paddle();
        p.track(400.0);
        assert_eq!(p.shape().upper_left().x, 108.0);
        p.track(126.0 + 8.0);
        assert_eq!(p.shape().upper_left().x, 109.0);

        let p = paddle();
        for _ in 0..200 {
            p.track(0.0);
        }
        assert_eq!(p.shape().upper_left().x, 10.0);
    }
}
