//! Frame geometry solver
//!
//! Derives every structural point of a frame from its [`Geometry`], then
//! computes the scalar measurements riders compare (wheelbase, trail, ...).
//!
//! ## Algorithm
//!
//! 1. Points are placed in a frame-local system with the bottom bracket at
//!    the origin and the head tube top at `(reach, stack)`.
//! 2. Head tube, fork, chain stay, seat tube and cockpit are walked from
//!    there using plain trigonometry.
//! 3. The whole point set is rotated about the bottom bracket so the
//!    rear-hub → front-hub line is horizontal (see [`RotationTransform`]).
//! 4. Measurements are taken from the rotated points, except trail which is
//!    a closed-form function of head angle, rake and wheel radius.
//!
//! The solver is total: nonsensical input yields nonsensical (possibly
//! non-finite) numbers, never a panic or an error.

use serde::Serialize;

use crate::log::{debug, warn};

use super::config::{FrontHubModel, SolverConfig};
use super::transform::RotationTransform;
use super::types::Point;
use super::Geometry;

/// Fraction of the head tube, measured up from its bottom, where the down
/// tube is drawn to join so the outline clears the front tire.
const HEAD_TUBE_JOIN_FRACTION: f64 = 0.15;

/// Named structural points of a solved frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FramePoints {
    /// Bottom bracket center
    pub base: Point,
    pub head_tube_top: Point,
    pub head_tube_bottom: Point,
    /// Where the down tube meets the head tube in the drawing
    pub head_tube_join: Point,
    pub front_hub: Point,
    pub rear_hub: Point,
    pub seat_tube_top: Point,
    /// Seat tube line intersected with the horizontal through the head tube top
    pub effective_top_tube_left: Point,
    pub saddle: Point,
    pub steer_top: Point,
    pub stem_end: Point,
}

impl FramePoints {
    /// Apply `f` to every point, returning the transformed set
    pub fn map(&self, f: impl Fn(Point) -> Point) -> FramePoints {
        FramePoints {
            base: f(self.base),
            head_tube_top: f(self.head_tube_top),
            head_tube_bottom: f(self.head_tube_bottom),
            head_tube_join: f(self.head_tube_join),
            front_hub: f(self.front_hub),
            rear_hub: f(self.rear_hub),
            seat_tube_top: f(self.seat_tube_top),
            effective_top_tube_left: f(self.effective_top_tube_left),
            saddle: f(self.saddle),
            steer_top: f(self.steer_top),
            stem_end: f(self.stem_end),
        }
    }

    /// All points with their names, in a fixed order
    pub fn named(&self) -> [(&'static str, Point); 11] {
        [
            ("base", self.base),
            ("head_tube_top", self.head_tube_top),
            ("head_tube_bottom", self.head_tube_bottom),
            ("head_tube_join", self.head_tube_join),
            ("front_hub", self.front_hub),
            ("rear_hub", self.rear_hub),
            ("seat_tube_top", self.seat_tube_top),
            ("effective_top_tube_left", self.effective_top_tube_left),
            ("saddle", self.saddle),
            ("steer_top", self.steer_top),
            ("stem_end", self.stem_end),
        ]
    }
}

/// Scalar measurements derived from a solved frame (millimeters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameMeasurements {
    pub wheel_base: f64,
    pub trail: f64,
    pub front_center: f64,
    pub rear_center: f64,
    pub effective_top_tube: f64,
    /// Approximation: height of the midpoint between head tube top and seat
    /// tube top above the ground, not the true minimum clearance.
    pub standover: f64,
    /// Y coordinate of the ground in the leveled frame space
    pub ground_level_y: f64,
}

impl FrameMeasurements {
    /// All measurements with their names, in a fixed order
    pub fn named(&self) -> [(&'static str, f64); 7] {
        [
            ("wheel_base", self.wheel_base),
            ("trail", self.trail),
            ("front_center", self.front_center),
            ("rear_center", self.rear_center),
            ("effective_top_tube", self.effective_top_tube),
            ("standover", self.standover),
            ("ground_level_y", self.ground_level_y),
        ]
    }
}

/// Result of solving a geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedLayout {
    pub points: FramePoints,
    pub measurements: FrameMeasurements,
}

/// Solve a geometry with the default configuration
pub fn solve(geometry: &Geometry) -> DerivedLayout {
    solve_with_config(geometry, &SolverConfig::default())
}

/// Solve a geometry with a custom configuration
pub fn solve_with_config(geometry: &Geometry, config: &SolverConfig) -> DerivedLayout {
    let local = frame_local_points(geometry, config);

    let leveling = RotationTransform::leveling(local.rear_hub, local.front_hub, local.base);
    debug!(tilt_rad = leveling.angle, "leveling wheel contact line");
    let points = local.map(|p| leveling.transform_point(p));

    if let Some((name, _)) = points.named().into_iter().find(|(_, p)| !p.is_finite()) {
        warn!(point = name, "geometry produced a non-finite point");
    }

    let measurements = measure(geometry, &points);
    if measurements.named().iter().any(|(_, v)| !v.is_finite()) {
        warn!(?measurements, "geometry produced non-finite measurements");
    }

    DerivedLayout {
        points,
        measurements,
    }
}

/// Place every point in the frame-local (not yet leveled) system
fn frame_local_points(g: &Geometry, config: &SolverConfig) -> FramePoints {
    let base = Point::origin();
    let head_tube_top = Point::new(g.reach, g.stack);

    // Head tube axis pointing down and forward
    let head_tube_down = (-g.head_tube_angle).to_radians();
    let head_tube_bottom = head_tube_top.polar_offset(g.head_tube_length, head_tube_down);
    let head_tube_join = head_tube_bottom.lerp(head_tube_top, HEAD_TUBE_JOIN_FRACTION);

    let rear_hub = Point::new(-rear_hub_offset(g), g.bb_drop);

    // Rake is perpendicular to the steering axis, pointing forward
    let rake_dir = (90.0 - g.head_tube_angle).to_radians();
    let raked = Point::origin().polar_offset(g.fork_rake, rake_dir);
    let axis_travel = match config.front_hub {
        FrontHubModel::LevelHubs => {
            (head_tube_bottom.y + raked.y - rear_hub.y) / g.head_tube_angle.to_radians().sin()
        }
        FrontHubModel::ForkLength => g.fork_length,
    };
    let along_axis = head_tube_bottom.polar_offset(axis_travel, head_tube_down);
    let front_hub = Point::new(along_axis.x + raked.x, along_axis.y + raked.y);

    let seat_tube_dir = (180.0 - g.seat_tube_angle).to_radians();
    let seat_tube_top = base.polar_offset(g.seat_tube_length, seat_tube_dir);
    let ett_param = head_tube_top.y / seat_tube_dir.sin();
    let effective_top_tube_left = Point::new(
        base.x + ett_param * seat_tube_dir.cos(),
        head_tube_top.y,
    );
    let saddle = seat_tube_top.polar_offset(g.seat_post_length, seat_tube_dir);

    let steer_up = (180.0 - g.head_tube_angle).to_radians();
    let steer_top = head_tube_top.polar_offset(g.spacers, steer_up);
    let stem_dir = (90.0 - g.head_tube_angle + g.stem_angle).to_radians();
    let stem_end = steer_top.polar_offset(g.stem_length, stem_dir);

    FramePoints {
        base,
        head_tube_top,
        head_tube_bottom,
        head_tube_join,
        front_hub,
        rear_hub,
        seat_tube_top,
        effective_top_tube_left,
        saddle,
        steer_top,
        stem_end,
    }
}

/// Horizontal distance from bottom bracket to rear hub.
///
/// Clamped to zero when the chain stay is shorter than the BB drop.
fn rear_hub_offset(g: &Geometry) -> f64 {
    let squared = g.chain_stay * g.chain_stay - g.bb_drop * g.bb_drop;
    if squared < 0.0 {
        warn!(
            chain_stay = g.chain_stay,
            bb_drop = g.bb_drop,
            "chain stay shorter than BB drop, clamping rear hub offset to 0"
        );
    }
    squared.max(0.0).sqrt()
}

/// Take measurements from leveled points
fn measure(g: &Geometry, p: &FramePoints) -> FrameMeasurements {
    let head_angle = g.head_tube_angle.to_radians();
    let ground_level_y = p.rear_hub.y - g.wheel_radius;
    let top_tube_mid_y = (p.head_tube_top.y + p.seat_tube_top.y) / 2.0;

    FrameMeasurements {
        wheel_base: p.front_hub.distance_to(p.rear_hub),
        trail: (g.wheel_radius * head_angle.cos() - g.fork_rake) / head_angle.sin(),
        front_center: p.front_hub.distance_to(p.base),
        rear_center: p.rear_hub.distance_to(p.base),
        effective_top_tube: p.head_tube_top.distance_to(p.effective_top_tube_left),
        standover: top_tube_mid_y - ground_level_y,
        ground_level_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DEFAULT_GEOMETRY;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_base_stays_at_origin() {
        let layout = solve(&DEFAULT_GEOMETRY);
        assert_eq!(layout.points.base, Point::origin());
    }

    #[test]
    fn test_level_hubs_need_no_rotation() {
        let local = frame_local_points(&DEFAULT_GEOMETRY, &SolverConfig::default());
        assert!(approx_eq(local.front_hub.y, local.rear_hub.y));
        assert!(approx_eq(local.rear_hub.y, DEFAULT_GEOMETRY.bb_drop));
    }

    #[test]
    fn test_level_hubs_travel_close_to_fork_length() {
        // For a real frame the level-hub construction lands within a couple
        // of centimeters of the literal fork length.
        let local = frame_local_points(&DEFAULT_GEOMETRY, &SolverConfig::default());
        let axis = local.head_tube_bottom.distance_to(local.front_hub);
        let literal = frame_local_points(
            &DEFAULT_GEOMETRY,
            &SolverConfig::new().with_front_hub(FrontHubModel::ForkLength),
        );
        let literal_axis = literal.head_tube_bottom.distance_to(literal.front_hub);
        assert!((axis - literal_axis).abs() < 20.0);
    }

    #[test]
    fn test_head_tube_join_fraction() {
        let p = solve(&DEFAULT_GEOMETRY).points;
        let from_bottom = p.head_tube_bottom.distance_to(p.head_tube_join);
        assert!(approx_eq(
            from_bottom,
            DEFAULT_GEOMETRY.head_tube_length * HEAD_TUBE_JOIN_FRACTION
        ));
    }

    #[test]
    fn test_local_points_before_leveling() {
        let local = frame_local_points(&DEFAULT_GEOMETRY, &SolverConfig::default());
        assert_eq!(local.head_tube_top, Point::new(374.0, 575.0));
        assert!(approx_eq(local.rear_hub.x, -412.310562561766));
        assert!(approx_eq(local.seat_tube_top.x, -140.333354460394));
        assert!(approx_eq(local.seat_tube_top.y, 479.902645987594));
        assert!(approx_eq(local.effective_top_tube_left.x, -168.141766854964));
        assert!(approx_eq(local.effective_top_tube_left.y, 575.0));
    }

    #[test]
    fn test_rear_hub_clamped() {
        let g = Geometry {
            chain_stay: 50.0,
            bb_drop: 80.0,
            ..DEFAULT_GEOMETRY
        };
        assert_eq!(rear_hub_offset(&g), 0.0);
    }

    #[test]
    fn test_cockpit_points() {
        let p = solve(&DEFAULT_GEOMETRY).points;
        assert!(approx_eq(p.steer_top.distance_to(p.head_tube_top), 20.0));
        assert!(approx_eq(p.stem_end.distance_to(p.steer_top), 100.0));
        assert!(approx_eq(p.saddle.distance_to(p.seat_tube_top), 180.0));
        // Spacers stack up and back along the steering axis
        assert!(p.steer_top.y > p.head_tube_top.y);
        assert!(p.steer_top.x < p.head_tube_top.x);
    }

    #[test]
    fn test_measurements_named_order() {
        let m = solve(&DEFAULT_GEOMETRY).measurements;
        let names: Vec<_> = m.named().iter().map(|(n, _)| *n).collect();
        assert_eq!(names[0], "wheel_base");
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_named_points_match_fields() {
        let p = solve(&DEFAULT_GEOMETRY).points;
        let named = p.named();
        assert_eq!(named[0], ("base", p.base));
        assert_eq!(named[5], ("rear_hub", p.rear_hub));
        assert_eq!(named[10], ("stem_end", p.stem_end));
        assert!(named.iter().all(|(_, point)| point.is_finite()));
    }

    #[test]
    fn test_nan_input_yields_non_finite_points() {
        let g = Geometry {
            stack: f64::NAN,
            ..DEFAULT_GEOMETRY
        };
        let p = solve(&g).points;
        assert!(p.named().iter().any(|(_, point)| !point.is_finite()));
        assert!(!p.head_tube_top.is_finite());
    }

    #[test]
    fn test_degenerate_angles_do_not_panic() {
        let g = Geometry {
            head_tube_angle: 0.0,
            seat_tube_angle: 180.0,
            ..DEFAULT_GEOMETRY
        };
        let layout = solve(&g);
        assert!(!layout.measurements.trail.is_finite());
    }
}
