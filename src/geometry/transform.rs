//! Rigid rotation used to level the frame after solving.
//!
//! ## Normalization
//!
//! The solver places every point in a frame-local system anchored at the
//! bottom bracket. That system is not necessarily level with the ground, so
//! once all points exist a single rotation about the bottom bracket is
//! applied to the whole point set, turning the rear-hub → front-hub contact
//! line horizontal.
//!
//! ## Rotation Convention
//!
//! Upright mathematical convention: Y points up, positive angles rotate
//! counter-clockwise, angles are in radians.

use super::types::Point;

/// A 2D rotation about a pivot point.
#[derive(Debug, Clone, Copy)]
pub struct RotationTransform {
    /// Rotation angle in radians (counter-clockwise positive)
    pub angle: f64,
    /// Pivot of the rotation
    pub center: Point,
}

impl RotationTransform {
    pub fn new(angle: f64, center: Point) -> Self {
        Self { angle, center }
    }

    /// Rotation that turns the segment `from` → `to` horizontal.
    pub fn leveling(from: Point, to: Point, center: Point) -> Self {
        Self::new(-from.angle_to(to), center)
    }

    /// Rotate a point about the center.
    ///
    /// ```text
    /// x' = cx + (x - cx) * cos(θ) - (y - cy) * sin(θ)
    /// y' = cy + (x - cx) * sin(θ) + (y - cy) * cos(θ)
    /// ```
    ///
    /// The formula is applied even for tiny angles so that every point of a
    /// layout goes through the same arithmetic.
    pub fn transform_point(&self, point: Point) -> Point {
        let cos_a = self.angle.cos();
        let sin_a = self.angle.sin();

        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;

        Point {
            x: self.center.x + dx * cos_a - dy * sin_a,
            y: self.center.y + dx * sin_a + dy * cos_a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_quarter_turn_about_origin() {
        let t = RotationTransform::new(FRAC_PI_2, Point::origin());
        let p = t.transform_point(Point::new(10.0, 0.0));
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.y, 10.0));
    }

    #[test]
    fn test_rotation_about_pivot() {
        let t = RotationTransform::new(FRAC_PI_2, Point::new(5.0, 5.0));
        let p = t.transform_point(Point::new(10.0, 5.0));
        assert!(approx_eq(p.x, 5.0));
        assert!(approx_eq(p.y, 10.0));
    }

    #[test]
    fn test_pivot_is_fixed() {
        let pivot = Point::new(-3.0, 7.0);
        let t = RotationTransform::new(0.7, pivot);
        assert_eq!(t.transform_point(pivot), pivot);
    }

    #[test]
    fn test_leveling_makes_segment_horizontal() {
        let a = Point::new(-400.0, 80.0);
        let b = Point::new(600.0, 95.0);
        let t = RotationTransform::leveling(a, b, Point::origin());
        let (ra, rb) = (t.transform_point(a), t.transform_point(b));
        assert!(approx_eq(ra.y, rb.y));
        assert!(approx_eq(ra.distance_to(rb), a.distance_to(b)));
    }
}
