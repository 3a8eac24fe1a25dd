//! Core 2D types for frame geometry
//!
//! All coordinates are millimeters in the upright frame space: the bottom
//! bracket is the origin, +X points toward the front wheel and +Y points up.

use serde::Serialize;

/// A 2D point in the frame coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The frame origin (bottom bracket center)
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Walk `distance` from this point along the direction `angle` (radians,
    /// counter-clockwise from +X).
    pub fn polar_offset(&self, distance: f64, angle: f64) -> Point {
        Point {
            x: self.x + distance * angle.cos(),
            y: self.y + distance * angle.sin(),
        }
    }

    /// Point a fraction `t` of the way from `self` toward `other`
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle (radians) of the segment from `self` to `other`
    pub fn angle_to(&self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Midpoint of the segment from `self` to `other`
    pub fn midpoint(&self, other: Point) -> Point {
        self.lerp(other, 0.5)
    }

    /// True when both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
