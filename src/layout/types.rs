use std::collections::BTreeMap;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::theme::Color;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` and `angle` (radians) from `self`, rounded to the grid.
    pub fn polar_offset(self, radius: i32, angle: f64) -> Self {
        let r = radius as f64;
        Self {
            x: self.x + (r * angle.cos()).round() as i32,
            y: self.y + (r * angle.sin()).round() as i32,
        }
    }

    /// Angle of `to` as seen from `self`, in radians.
    pub fn angle_to(self, to: Point) -> f64 {
        ((to.y - self.y) as f64).atan2((to.x - self.x) as f64)
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: i32) -> Self {
        Self::new(side, side)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn half(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

/// Get/set access to a 2-D position; all the transform needs from a node.
pub trait Positioned {
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);
}

/// Axis-aligned extents of a set of points (inclusive).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn of<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds { min: first, max: first };
        for p in iter {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    pub fn padded(&self, dx: i32, dy: i32) -> Self {
        Bounds {
            min: Point::new(self.min.x - dx, self.min.y - dy),
            max: Point::new(self.max.x + dx, self.max.y + dy),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.max.x - self.min.x, self.max.y - self.min.y)
    }

    pub fn center(&self) -> Point {
        let size = self.size();
        Point::new(self.min.x + size.width / 2, self.min.y + size.height / 2)
    }
}

#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub index: usize,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub color: Color,
    pub children: Vec<String>,
    pub child_positions: Vec<Point>,
}

impl NodeLayout {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// A read-only snapshot of a finished layout, keyed by node name.
#[derive(Debug, Clone)]
pub struct Layout {
    pub shape: crate::config::LayoutShape,
    pub nodes: BTreeMap<String, NodeLayout>,
    pub center: Point,
    pub width: i32,
    pub height: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_center_uses_integer_halves() {
        let bounds = Bounds::of([Point::new(-3, 0), Point::new(4, 10)]).unwrap();
        assert_eq!(bounds.size(), Size::new(7, 10));
        assert_eq!(bounds.center(), Point::new(0, 5));
        assert_eq!(bounds.padded(1, 2).size(), Size::new(9, 14));
    }

    #[test]
    fn empty_bounds_is_none() {
        assert!(Bounds::of(std::iter::empty()).is_none());
    }

    #[test]
    fn polar_offset_rounds() {
        let p = Point::ORIGIN.polar_offset(100, std::f64::consts::FRAC_PI_2);
        assert_eq!(p, Point::new(0, 100));
        assert_eq!(Point::ORIGIN.angle_to(Point::new(0, 5)), std::f64::consts::FRAC_PI_2);
    }
}
