//! Finite line segments and their intersections
//!
//! The hard part of the collision core. Segments are kept in two forms:
//! slope/intercept for the axis-parallel branches and the implicit form
//! `a·x + b·y = c` (a = Δy, b = −Δx) for the general determinant solve.
//!
//! Collinear overlapping segments intersect but have no single intersection
//! point, so `intersects` and `intersection_point` are not inverses of each
//! other; overlap has its own predicate, `is_overlapping_segment`.

use serde::{Deserialize, Serialize};

use super::{Point, Rectangle};
use crate::consts::LINE_EPSILON;

/// A directed segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    start: Point,
    end: Point,
}

impl Line {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub const fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn middle(&self) -> Point {
        Point::from((self.start.as_vec() + self.end.as_vec()) * 0.5)
    }

    pub fn min_x(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    pub fn max_x(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    pub fn min_y(&self) -> f64 {
        self.start.y.min(self.end.y)
    }

    pub fn max_y(&self) -> f64 {
        self.start.y.max(self.end.y)
    }

    /// Start and end coincide
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Parallel to the y axis (within `LINE_EPSILON`)
    pub fn is_vertical(&self) -> bool {
        (self.start.x - self.end.x).abs() < LINE_EPSILON
    }

    /// Parallel to the x axis (within `LINE_EPSILON`)
    pub fn is_horizontal(&self) -> bool {
        (self.start.y - self.end.y).abs() < LINE_EPSILON
    }

    fn is_axis_parallel(&self) -> bool {
        self.is_vertical() || self.is_horizontal()
    }

    /// Slope of the infinite line, `None` when vertical
    pub fn slope(&self) -> Option<f64> {
        if self.is_vertical() {
            None
        } else {
            Some((self.end.y - self.start.y) / (self.end.x - self.start.x))
        }
    }

    /// Where the infinite line crosses x = 0, `None` when vertical
    pub fn y_intercept(&self) -> Option<f64> {
        self.slope().map(|m| self.start.y - m * self.start.x)
    }

    /// Point lies inside the segment's bounding box (with `LINE_EPSILON` slack)
    pub fn in_range(&self, point: Point) -> bool {
        point.x >= self.min_x() - LINE_EPSILON
            && point.x <= self.max_x() + LINE_EPSILON
            && point.y >= self.min_y() - LINE_EPSILON
            && point.y <= self.max_y() + LINE_EPSILON
    }

    /// Point lies on the finite segment
    pub fn contains(&self, point: Point) -> bool {
        if self.is_vertical() {
            return (point.x - self.start.x).abs() <= LINE_EPSILON
                && point.y >= self.min_y() - LINE_EPSILON
                && point.y <= self.max_y() + LINE_EPSILON;
        }
        if self.is_horizontal() {
            return (point.y - self.start.y).abs() <= LINE_EPSILON
                && point.x >= self.min_x() - LINE_EPSILON
                && point.x <= self.max_x() + LINE_EPSILON;
        }
        match (self.slope(), self.y_intercept()) {
            (Some(m), Some(b)) => {
                (point.y - (m * point.x + b)).abs() <= LINE_EPSILON && self.in_range(point)
            }
            _ => false,
        }
    }

    /// Segments touch or cross, including collinear overlap
    pub fn intersects(&self, other: &Line) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.intersection_point(other).is_some() || self.is_overlapping_segment(other)
    }

    /// The single point where the segments meet.
    ///
    /// `None` when they miss, when either is degenerate, and when they are
    /// collinear and overlap (no unique point). A shared endpoint is returned
    /// as is, even for collinear segments.
    pub fn intersection_point(&self, other: &Line) -> Option<Point> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }
        if let Some(shared) = self.shared_endpoint(other) {
            return Some(shared);
        }
        if self.is_axis_parallel() {
            return self.axis_parallel_intersection(other);
        }
        if other.is_axis_parallel() {
            return other.axis_parallel_intersection(self);
        }
        self.general_intersection(other)
    }

    /// Both segments lie on one infinite line and share at least one point
    pub fn is_overlapping_segment(&self, other: &Line) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        if !(self.is_collinear_with(other) && other.is_collinear_with(self)) {
            return false;
        }
        self.in_range(other.start)
            || self.in_range(other.end)
            || other.in_range(self.start)
            || other.in_range(self.end)
    }

    /// Nearest point (to `start`) where this segment crosses the rectangle's edges.
    ///
    /// Ties keep the first edge in `Rectangle::edges` order.
    pub fn closest_intersection_to_start(&self, rect: &Rectangle) -> Option<Point> {
        let mut closest: Option<(Point, f64)> = None;
        for point in rect.intersection_points(self) {
            let dist = point.distance(self.start);
            if closest.is_none_or(|(_, best)| dist < best) {
                closest = Some((point, dist));
            }
        }
        closest.map(|(point, _)| point)
    }

    /// Split into `parts` consecutive segments of equal length
    pub fn divide(&self, parts: usize) -> Vec<Line> {
        if parts == 0 {
            return Vec::new();
        }
        let start = self.start.as_vec();
        let step = (self.end.as_vec() - start) / parts as f64;
        (0..parts)
            .map(|i| {
                let a = start + step * i as f64;
                let b = if i + 1 == parts {
                    self.end.as_vec()
                } else {
                    start + step * (i + 1) as f64
                };
                Line::new(Point::from(a), Point::from(b))
            })
            .collect()
    }

    fn shared_endpoint(&self, other: &Line) -> Option<Point> {
        [
            (self.start, other.start),
            (self.start, other.end),
            (self.end, other.end),
            (self.end, other.start),
        ]
        .into_iter()
        .find(|(a, b)| a == b)
        .map(|(a, _)| a)
    }

    /// Perpendicular distance from `other`'s endpoints to this infinite line
    fn is_collinear_with(&self, other: &Line) -> bool {
        let dir = self.end.as_vec() - self.start.as_vec();
        let len = dir.length();
        [other.start, other.end].into_iter().all(|p| {
            let offset = p.as_vec() - self.start.as_vec();
            (dir.perp_dot(offset) / len).abs() <= LINE_EPSILON
        })
    }

    /// `self` is vertical or horizontal; `other` is anything
    fn axis_parallel_intersection(&self, other: &Line) -> Option<Point> {
        let candidate = if self.is_vertical() {
            // Two verticals never cross at a unique point: either different x,
            // or collinear (shared endpoints were handled by the caller).
            if other.is_vertical() {
                return None;
            }
            let x = self.start.x;
            let y = if other.is_horizontal() {
                other.start.y
            } else {
                let (m, b) = other.slope().zip(other.y_intercept())?;
                m * x + b
            };
            Point::new(x, y)
        } else {
            if other.is_horizontal() {
                return None;
            }
            let y = self.start.y;
            let x = if other.is_vertical() {
                other.start.x
            } else {
                let (m, b) = other.slope().zip(other.y_intercept())?;
                (y - b) / m
            };
            Point::new(x, y)
        };

        (self.in_range(candidate) && other.in_range(candidate)).then_some(candidate)
    }

    /// Neither segment is axis-parallel: solve the 2×2 system
    fn general_intersection(&self, other: &Line) -> Option<Point> {
        let (a1, b1, c1) = self.implicit();
        let (a2, b2, c2) = other.implicit();

        let det = a1 * b2 - a2 * b1;
        if det == 0.0 {
            return None;
        }
        if let (Some(m1), Some(m2)) = (self.slope(), other.slope()) {
            if (m1 - m2).abs() <= LINE_EPSILON {
                return None;
            }
        }

        let x = (b2 * c1 - b1 * c2) / det;
        let y = (a1 * c2 - a2 * c1) / det;
        let candidate = Point::new(x, y);

        (self.in_range(candidate) && other.in_range(candidate)).then_some(candidate)
    }

    fn implicit(&self) -> (f64, f64, f64) {
        let a = self.end.y - self.start.y;
        let b = self.start.x - self.end.x;
        let c = a * self.start.x + b * self.start.y;
        (a, b, c)
    }
}
