//! SVG path data built from upright frame coordinates.
//!
//! Segments store points with Y up; the Y flip happens only in
//! [`PathData::to_svg_d`].

use crate::geometry::Point;

use super::svg::fmt_num;

/// A segment in a path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
    /// Straight line by a relative offset (upright axes)
    LineBy { dx: f64, dy: f64 },
    /// Circular arc to point
    ArcTo {
        end: Point,
        radius: f64,
        large_arc: bool,
        /// Clockwise as seen on screen
        clockwise: bool,
    },
}

/// Ordered list of segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub segments: Vec<PathSegment>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Point) -> Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn line_by(mut self, dx: f64, dy: f64) -> Self {
        self.segments.push(PathSegment::LineBy { dx, dy });
        self
    }

    pub fn arc_to(mut self, end: Point, radius: f64, large_arc: bool, clockwise: bool) -> Self {
        self.segments.push(PathSegment::ArcTo {
            end,
            radius,
            large_arc,
            clockwise,
        });
        self
    }

    /// Polyline through `points`
    pub fn polyline(points: &[Point]) -> Self {
        let mut iter = points.iter();
        let Some(first) = iter.next() else {
            return Self::new();
        };
        iter.fold(Self::new().move_to(*first), |path, p| path.line_to(*p))
    }

    /// Convert to SVG path `d` attribute string (screen space, Y down)
    pub fn to_svg_d(&self) -> String {
        self.segments
            .iter()
            .map(|seg| match seg {
                PathSegment::MoveTo(p) => format!("M{},{}", fmt_num(p.x), fmt_num(-p.y)),
                PathSegment::LineTo(p) => format!("L{},{}", fmt_num(p.x), fmt_num(-p.y)),
                PathSegment::LineBy { dx, dy } => format!("l{},{}", fmt_num(*dx), fmt_num(-dy)),
                PathSegment::ArcTo {
                    end,
                    radius,
                    large_arc,
                    clockwise,
                } => format!(
                    "A{r},{r} 0 {},{} {},{}",
                    u8::from(*large_arc),
                    u8::from(*clockwise),
                    fmt_num(end.x),
                    fmt_num(-end.y),
                    r = fmt_num(*radius),
                ),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
