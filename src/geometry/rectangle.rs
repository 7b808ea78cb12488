//! Axis-aligned rectangles for blocks, walls and the paddle
//!
//! A rectangle is defined by its upper-left corner (smallest x and y in
//! screen space), a width and a height. Its four edges are exposed as `Line`s:
//! - top: upper-left → upper-right
//! - bottom: lower-left → lower-right
//! - left: upper-left → lower-left
//! - right: upper-right → lower-right

use serde::{Deserialize, Serialize};

use super::{Line, Point};

/// An axis-aligned box in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    upper_left: Point,
    width: f64,
    height: f64,
}

impl Rectangle {
    /// # Panics
    /// Panics if `width` or `height` is negative or NaN.
    pub fn new(upper_left: Point, width: f64, height: f64) -> Self {
        assert!(
            width >= 0.0 && height >= 0.0,
            "invalid rectangle: width {width}, height {height}"
        );
        Self {
            upper_left,
            width,
            height,
        }
    }

    #[inline]
    pub fn upper_left(&self) -> Point {
        self.upper_left
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Same size, moved to a new corner
    pub fn with_upper_left(&self, upper_left: Point) -> Self {
        Self {
            upper_left,
            ..*self
        }
    }

    pub fn upper_right(&self) -> Point {
        Point::new(self.upper_left.x + self.width, self.upper_left.y)
    }

    pub fn lower_left(&self) -> Point {
        Point::new(self.upper_left.x, self.upper_left.y + self.height)
    }

    pub fn lower_right(&self) -> Point {
        Point::new(
            self.upper_left.x + self.width,
            self.upper_left.y + self.height,
        )
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.upper_left.x + self.width / 2.0,
            self.upper_left.y + self.height / 2.0,
        )
    }

    pub fn top_line(&self) -> Line {
        Line::new(self.upper_left, self.upper_right())
    }

    pub fn bottom_line(&self) -> Line {
        Line::new(self.lower_left(), self.lower_right())
    }

    pub fn left_line(&self) -> Line {
        Line::new(self.upper_left, self.lower_left())
    }

    pub fn right_line(&self) -> Line {
        Line::new(self.upper_right(), self.lower_right())
    }

    /// The four edges: top, bottom, left, right
    pub fn edges(&self) -> [Line; 4] {
        [
            self.top_line(),
            self.bottom_line(),
            self.left_line(),
            self.right_line(),
        ]
    }

    /// Every point where `line` meets an edge, in `edges()` order.
    ///
    /// A line through a corner reports that corner once per edge; picking the
    /// nearest one is the caller's job.
    pub fn intersection_points(&self, line: &Line) -> Vec<Point> {
        self.edges()
            .iter()
            .filter_map(|edge| line.intersection_point(edge))
            .collect()
    }

    /// Point lies inside or on the boundary
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.upper_left.x
            && point.x <= self.upper_left.x + self.width
            && point.y >= self.upper_left.y
            && point.y <= self.upper_left.y + self.height
    }
}
