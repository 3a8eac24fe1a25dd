//! Dimension annotations: offset dimension lines and angle arcs.
//!
//! Everything here works in upright frame coordinates (Y up). The SVG
//! builder flips Y when it emits markup.

use std::f64::consts::PI;

use crate::geometry::{DerivedLayout, Geometry, Point};

/// Offset lines shorter than this are not drawn
const MIN_DIMENSION_LENGTH: f64 = 1.0;

/// Extra radius between an angle arc and its label
const ARC_LABEL_GAP: f64 = 40.0;

/// How a dimension's construction line is displaced from the measured points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OffsetMode {
    /// Horizontal construction line at `y = start.y + offset`
    Horizontal,
    /// Vertical construction line at `x = start.x + offset`
    Vertical,
    /// Construction line parallel to the segment, displaced along its
    /// clockwise normal
    Aligned,
}

/// How extension lines are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionStyle {
    /// Directly-input measurement: solid, faded
    Primary,
    /// Derived measurement: dashed
    Derived,
}

/// A measured distance between two points, annotated with a label
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionLine {
    pub start: Point,
    pub end: Point,
    pub label: &'static str,
    pub offset: f64,
    pub mode: OffsetMode,
    pub extension: ExtensionStyle,
}

/// The drawable pieces of a dimension line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionConstruction {
    /// Arrow start (construction line end next to `start`)
    pub from: Point,
    /// Arrow end (construction line end next to `end`)
    pub to: Point,
    /// Label anchor: midpoint of the arrow
    pub label_at: Point,
}

impl DimensionLine {
    pub fn new(
        start: Point,
        end: Point,
        label: &'static str,
        offset: f64,
        mode: OffsetMode,
        extension: ExtensionStyle,
    ) -> Self {
        Self {
            start,
            end,
            label,
            offset,
            mode,
            extension,
        }
    }

    /// Compute the construction line, or `None` when it is degenerate
    pub fn construction(&self) -> Option<DimensionConstruction> {
        let (from, to) = match self.mode {
            OffsetMode::Horizontal => horizontal_offset_line(self.start, self.end, self.offset),
            OffsetMode::Vertical => vertical_offset_line(self.start, self.end, self.offset),
            OffsetMode::Aligned => aligned_offset_line(self.start, self.end, self.offset)?,
        };

        let length = from.distance_to(to);
        if !(length >= MIN_DIMENSION_LENGTH) {
            return None;
        }

        Some(DimensionConstruction {
            from,
            to,
            label_at: from.midpoint(to),
        })
    }
}

fn horizontal_offset_line(start: Point, end: Point, offset: f64) -> (Point, Point) {
    let y = start.y + offset;
    (Point::new(start.x, y), Point::new(end.x, y))
}

fn vertical_offset_line(start: Point, end: Point, offset: f64) -> (Point, Point) {
    let x = start.x + offset;
    (Point::new(x, start.y), Point::new(x, end.y))
}

fn aligned_offset_line(start: Point, end: Point, offset: f64) -> Option<(Point, Point)> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len = dx.hypot(dy);
    if !(len >= MIN_DIMENSION_LENGTH) {
        return None;
    }
    let (nx, ny) = (dy / len, -dx / len);
    Some((
        Point::new(start.x + offset * nx, start.y + offset * ny),
        Point::new(end.x + offset * nx, end.y + offset * ny),
    ))
}

/// An angle between the horizontal and a tube, drawn as an arc at a pivot
#[derive(Debug, Clone, PartialEq)]
pub struct AngleArc {
    pub pivot: Point,
    pub radius: f64,
    /// Radians, counter-clockwise from +X
    pub start_angle: f64,
    pub end_angle: f64,
    pub label: &'static str,
}

/// The drawable pieces of an angle arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcConstruction {
    pub from: Point,
    pub to: Point,
    pub large_arc: bool,
    /// True when the arc runs clockwise as seen on screen
    pub clockwise: bool,
    pub label_at: Point,
    /// Horizontal guide through the pivot
    pub guide: (Point, Point),
}

impl AngleArc {
    pub fn construction(&self) -> ArcConstruction {
        let sweep = self.end_angle - self.start_angle;
        let mid_angle = (self.start_angle + self.end_angle) / 2.0;

        ArcConstruction {
            from: self.pivot.polar_offset(self.radius, self.start_angle),
            to: self.pivot.polar_offset(self.radius, self.end_angle),
            large_arc: sweep.abs() > PI,
            clockwise: sweep < 0.0,
            label_at: self.pivot.polar_offset(self.radius + ARC_LABEL_GAP, mid_angle),
            guide: (
                Point::new(self.pivot.x - self.radius, self.pivot.y),
                Point::new(self.pivot.x + self.radius, self.pivot.y),
            ),
        }
    }
}

/// Guide from the stack line to the head tube top, drawn behind the reach
/// dimension
pub fn reach_guide(layout: &DerivedLayout) -> (Point, Point) {
    let p = &layout.points;
    (Point::new(p.base.x, p.head_tube_top.y), p.head_tube_top)
}

/// The standard set of frame dimensions
pub fn frame_dimensions(layout: &DerivedLayout) -> Vec<DimensionLine> {
    use ExtensionStyle::{Derived, Primary};
    use OffsetMode::{Aligned, Horizontal, Vertical};

    let p = &layout.points;
    let stack_level = Point::new(p.base.x, p.head_tube_top.y);
    let hub_level_base = Point::new(p.base.x, p.rear_hub.y);
    let hub_level_front = Point::new(p.front_hub.x, p.rear_hub.y);

    vec![
        DimensionLine::new(p.base, stack_level, "stack", 0.0, Vertical, Primary),
        DimensionLine::new(stack_level, p.head_tube_top, "reach", 100.0, Horizontal, Primary),
        DimensionLine::new(p.base, hub_level_base, "BB drop", -210.0, Vertical, Derived),
        DimensionLine::new(
            Point::new(p.effective_top_tube_left.x, p.head_tube_top.y),
            p.head_tube_top,
            "toptube length",
            140.0,
            Horizontal,
            Derived,
        ),
        DimensionLine::new(p.base, p.seat_tube_top, "seattube length", -60.0, Aligned, Primary),
        DimensionLine::new(
            p.head_tube_bottom,
            p.head_tube_top,
            "head tube length",
            60.0,
            Aligned,
            Primary,
        ),
        DimensionLine::new(p.rear_hub, hub_level_front, "wheelbase", -150.0, Horizontal, Primary),
        DimensionLine::new(p.rear_hub, hub_level_base, "rear center", -100.0, Horizontal, Primary),
        DimensionLine::new(hub_level_base, hub_level_front, "front center", -100.0, Horizontal, Primary),
    ]
}

/// Seat tube and head tube angle arcs
pub fn frame_angle_arcs(geometry: &Geometry, layout: &DerivedLayout) -> Vec<AngleArc> {
    let p = &layout.points;
    vec![
        AngleArc {
            pivot: p.base,
            radius: 100.0,
            start_angle: PI,
            end_angle: PI - geometry.seat_tube_angle.to_radians(),
            label: "seat tube angle",
        },
        AngleArc {
            pivot: Point::new(p.front_hub.x, p.rear_hub.y),
            radius: 120.0,
            start_angle: PI,
            end_angle: PI - geometry.head_tube_angle.to_radians(),
            label: "head tube angle",
        },
    ]
}
