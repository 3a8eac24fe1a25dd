//! SVG generation from solved frame layouts

use crate::geometry::{DerivedLayout, Geometry, Point};
use crate::log::debug;

use super::config::{RenderOptions, SvgConfig, ViewBox, CAMERA};
use super::dimension::{
    frame_angle_arcs, frame_dimensions, reach_guide, AngleArc, DimensionLine, ExtensionStyle,
};
use super::path::PathData;
use super::style::{RoleStyles, StyleRole};

const ARROW_ID: &str = "bg-arrow";
const ARROW_REV_ID: &str = "bg-arrow-rev";

/// Half-length of the ground reference line
const GROUND_HALF_WIDTH: f64 = 3000.0;
/// Rim circle sits this far inside the tire circle
const RIM_INSET: f64 = 15.0;
const HUB_RADIUS: f64 = 6.0;
const BB_RADIUS: f64 = 10.0;
/// Saddle extends this far behind / ahead of the saddle point
const SADDLE_BACK: f64 = 40.0;
const SADDLE_FRONT: f64 = 80.0;
const SADDLE_STROKE: f64 = 12.0;
/// Handlebar drop outline relative to the stem end: forward, down, back
const BAR_REACH: f64 = 70.0;
const BAR_DROP: f64 = 70.0;
const BAR_RETURN: f64 = 40.0;
/// Dimension labels sit this far above the arrow (screen units)
const LABEL_LIFT: f64 = 5.0;

/// Which geometry a layer draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Reference geometry drawn underneath in the ghost style
    Reference,
    /// The geometry being inspected
    Primary,
}

impl LayerKind {
    fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Reference => "reference",
            LayerKind::Primary => "primary",
        }
    }
}

/// One solved geometry plus how to draw it
pub struct Layer<'a> {
    pub kind: LayerKind,
    pub geometry: &'a Geometry,
    pub layout: DerivedLayout,
    pub style: &'a dyn RoleStyles,
    pub options: RenderOptions,
}

/// Build SVG elements incrementally.
///
/// All drawing methods take upright frame coordinates; Y is negated only
/// when a coordinate is written out.
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add CSS rules, skipping exact duplicates
    pub fn add_css(&mut self, css: &str) {
        if !self.styles.iter().any(|s| s == css) {
            self.styles.push(css.to_string());
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn push(&mut self, element: String) {
        let line = format!("{}{}", self.indent_str(), element);
        self.elements.push(line);
    }

    /// Add the arrowhead markers for dimension lines.
    ///
    /// `fill="context-stroke"` makes each arrowhead take the color of the
    /// line it terminates, so the markers carry no style of their own.
    pub fn add_arrow_markers(&mut self) {
        self.defs.push(format!(
            r#"<marker id="{ARROW_ID}" markerWidth="10" markerHeight="10" refX="9" refY="3" orient="auto" markerUnits="strokeWidth"><path d="M0,0 L0,6 L9,3 z" fill="context-stroke"/></marker>"#
        ));
        self.defs.push(format!(
            r#"<marker id="{ARROW_REV_ID}" markerWidth="10" markerHeight="10" refX="1" refY="3" orient="auto" markerUnits="strokeWidth"><path d="M9,0 L9,6 L0,3 z" fill="context-stroke"/></marker>"#
        ));
    }

    /// Add a line element
    pub fn add_line(&mut self, from: Point, to: Point, class: &str, attrs: &str) {
        self.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" class="{}"{}/>"#,
            fmt_num(from.x),
            fmt_num(-from.y),
            fmt_num(to.x),
            fmt_num(-to.y),
            class,
            attrs
        ));
    }

    /// Add a circle element
    pub fn add_circle(&mut self, center: Point, r: f64, class: &str) {
        self.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" class="{}"/>"#,
            fmt_num(center.x),
            fmt_num(-center.y),
            fmt_num(r),
            class
        ));
    }

    /// Add a path element
    pub fn add_path(&mut self, path: &PathData, class: &str, attrs: &str) {
        self.push(format!(
            r#"<path d="{}" class="{}"{}/>"#,
            path.to_svg_d(),
            class,
            attrs
        ));
    }

    /// Add a centered text element
    pub fn add_text(&mut self, text: &str, at: Point, class: &str, attrs: &str) {
        self.push(format!(
            r#"<text x="{}" y="{}" class="{}" text-anchor="middle"{}>{}</text>"#,
            fmt_num(at.x),
            fmt_num(-at.y),
            class,
            attrs,
            escape_xml(text)
        ));
    }

    /// Open a group element
    pub fn start_group(&mut self, attrs: &str) {
        self.push(format!("<g{}>", attrs));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.push("</g>".to_string());
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: ViewBox) -> String {
        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            fmt_num(viewbox.x),
            fmt_num(viewbox.y),
            fmt_num(viewbox.width),
            fmt_num(viewbox.height)
        ));
        svg.push_str(nl);

        let (outer, inner) = if self.config.pretty_print {
            ("  ", "    ")
        } else {
            ("", "")
        };

        if !self.styles.is_empty() {
            svg.push_str(&format!("{}<style>{}", outer, nl));
            let lines = self.styles.iter().flat_map(|style| style.lines());
            for line in lines.filter(|line| !line.trim().is_empty()) {
                svg.push_str(&format!("{}{}{}", inner, line.trim(), nl));
            }
            svg.push_str(&format!("{}</style>{}", outer, nl));
        }

        if !self.defs.is_empty() {
            svg.push_str(&format!("{}<defs>{}", outer, nl));
            for def in &self.defs {
                svg.push_str(&format!("{}{}{}", inner, def, nl));
            }
            svg.push_str(&format!("{}</defs>{}", outer, nl));
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render layers, back to front, into one SVG document
pub fn render_svg(layers: &[Layer<'_>], config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    if config.embed_css {
        for layer in layers {
            if let Some(css) = layer.style.css() {
                builder.add_css(css);
            }
        }
    }
    builder.add_arrow_markers();

    for layer in layers {
        debug!(
            layer = layer.kind.as_str(),
            wheel_base = layer.layout.measurements.wheel_base,
            "rendering layer"
        );
        render_layer(layer, &mut builder);
    }

    builder.build(CAMERA)
}

/// Draw one geometry, back to front
fn render_layer(layer: &Layer<'_>, builder: &mut SvgBuilder) {
    let style = layer.style;
    let p = &layer.layout.points;
    let m = &layer.layout.measurements;
    let wheel_radius = layer.geometry.wheel_radius;

    builder.start_group(&format!(r#" data-layer="{}""#, layer.kind.as_str()));

    builder.add_line(
        Point::new(-GROUND_HALF_WIDTH, m.ground_level_y),
        Point::new(GROUND_HALF_WIDTH, m.ground_level_y),
        style.class_for(StyleRole::DimLine),
        r#" opacity="0.3""#,
    );

    render_wheel(builder, style, p.rear_hub, wheel_radius);
    render_wheel(builder, style, p.front_hub, wheel_radius);

    let component = style.class_for(StyleRole::Component);
    builder.add_line(p.seat_tube_top, p.saddle, component, "");
    let saddle = PathData::polyline(&[
        Point::new(p.saddle.x - SADDLE_BACK, p.saddle.y),
        Point::new(p.saddle.x + SADDLE_FRONT, p.saddle.y),
    ]);
    builder.add_path(
        &saddle,
        component,
        &format!(r#" stroke-width="{}""#, fmt_num(SADDLE_STROKE)),
    );

    builder.add_line(p.head_tube_top, p.steer_top, component, "");
    builder.add_line(p.steer_top, p.stem_end, component, "");
    let bar = PathData::new()
        .move_to(p.stem_end)
        .line_by(BAR_REACH, 0.0)
        .line_by(0.0, -BAR_DROP)
        .line_by(-BAR_RETURN, 0.0);
    builder.add_path(&bar, style.class_for(StyleRole::Bar), "");

    let frame = PathData::polyline(&[
        p.base,
        p.seat_tube_top,
        p.head_tube_top,
        p.head_tube_bottom,
        p.head_tube_join,
        p.base,
        p.rear_hub,
        p.seat_tube_top,
    ]);
    builder.add_path(&frame, style.class_for(StyleRole::FrameFill), "");

    let fork = PathData::polyline(&[p.head_tube_bottom, p.front_hub]);
    builder.add_path(&fork, style.class_for(StyleRole::ForkFill), "");

    builder.add_circle(p.base, BB_RADIUS, style.class_for(StyleRole::Joint));

    if layer.options.show_dimensions {
        render_dimensions(layer, builder);
    }

    builder.end_group();
}

fn render_wheel(builder: &mut SvgBuilder, style: &dyn RoleStyles, hub: Point, radius: f64) {
    builder.add_circle(hub, radius, style.class_for(StyleRole::Tire));
    builder.add_circle(hub, radius - RIM_INSET, style.class_for(StyleRole::Rim));
    builder.add_circle(hub, HUB_RADIUS, style.class_for(StyleRole::Joint));
}

fn render_dimensions(layer: &Layer<'_>, builder: &mut SvgBuilder) {
    let style = layer.style;
    builder.start_group(r#" class="dimensions""#);

    let (guide_from, guide_to) = reach_guide(&layer.layout);
    builder.add_line(
        guide_from,
        guide_to,
        style.class_for(StyleRole::DimLine),
        r#" stroke-dasharray="4,4" opacity="0.6""#,
    );

    for dim in frame_dimensions(&layer.layout) {
        render_dimension(builder, style, &dim);
    }
    for arc in frame_angle_arcs(layer.geometry, &layer.layout) {
        render_angle_arc(builder, style, &arc);
    }

    builder.end_group();
}

/// Extension lines, double-headed arrow and label for one dimension
fn render_dimension(builder: &mut SvgBuilder, style: &dyn RoleStyles, dim: &DimensionLine) {
    let Some(c) = dim.construction() else {
        debug!(label = dim.label, "skipping degenerate dimension");
        return;
    };
    let dim_line = style.class_for(StyleRole::DimLine);
    let ext_attrs = match dim.extension {
        ExtensionStyle::Derived => r#" stroke-dasharray="4,4" opacity="0.6""#,
        ExtensionStyle::Primary => r#" opacity="0.5""#,
    };

    builder.add_line(dim.start, c.from, dim_line, ext_attrs);
    builder.add_line(dim.end, c.to, dim_line, ext_attrs);
    builder.add_line(
        c.from,
        c.to,
        dim_line,
        &format!(r#" marker-start="url(#{ARROW_REV_ID})" marker-end="url(#{ARROW_ID})""#),
    );
    builder.add_text(
        dim.label,
        Point::new(c.label_at.x, c.label_at.y + LABEL_LIFT),
        style.class_for(StyleRole::Text),
        "",
    );
}

/// Dashed horizontal guide, arc with arrowhead, and radial label
fn render_angle_arc(builder: &mut SvgBuilder, style: &dyn RoleStyles, arc: &AngleArc) {
    let c = arc.construction();
    let dim_line = style.class_for(StyleRole::DimLine);

    builder.add_line(
        c.guide.0,
        c.guide.1,
        dim_line,
        r#" opacity="0.3" stroke-dasharray="4,4""#,
    );
    let path = PathData::new()
        .move_to(c.from)
        .arc_to(c.to, arc.radius, c.large_arc, c.clockwise);
    builder.add_path(
        &path,
        dim_line,
        &format!(r#" fill="none" marker-end="url(#{ARROW_ID})""#),
    );
    builder.add_text(
        arc.label,
        c.label_at,
        style.class_for(StyleRole::Text),
        r#" dominant-baseline="middle""#,
    );
}

/// Format a coordinate: two decimals, trailing zeros trimmed, no negative zero
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{solve, DEFAULT_GEOMETRY};
    use crate::renderer::dimension::OffsetMode;
    use crate::renderer::style::DiagramStyle;
    use pretty_assertions::assert_eq;

    fn compact() -> SvgConfig {
        SvgConfig::new()
            .with_standalone(false)
            .with_pretty_print(false)
            .with_embed_css(false)
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(-42.5), "-42.5");
        assert_eq!(fmt_num(1.23456), "1.23");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(f64::NAN), "NaN");
    }

    #[test]
    fn test_style_rules_indented_like_defs() {
        let mut builder = SvgBuilder::new(SvgConfig::new().with_standalone(false));
        builder.add_css(".a { fill: red; }\n\n  .b { fill: blue; }\n");
        builder.add_arrow_markers();
        let svg = builder.build(CAMERA);
        assert!(svg.contains("  <style>\n    .a { fill: red; }\n    .b { fill: blue; }\n  </style>\n"));
        assert!(svg.contains("  <defs>\n    <marker id=\"bg-arrow\""));
    }

    #[test]
    fn test_compact_css_stays_on_one_line() {
        let mut builder = SvgBuilder::new(compact());
        builder.add_css(".a { fill: red; }\n.b { fill: blue; }");
        let svg = builder.build(CAMERA);
        assert!(!svg.contains('\n'));
        assert!(svg.contains("<style>.a { fill: red; }.b { fill: blue; }</style>"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
    }

    #[test]
    fn test_line_flips_y() {
        let mut builder = SvgBuilder::new(compact());
        builder.add_line(Point::new(0.0, 10.0), Point::new(5.0, -20.0), "c", "");
        let svg = builder.build(CAMERA);
        assert!(svg.contains(r#"<line x1="0" y1="-10" x2="5" y2="20" class="c"/>"#));
    }

    #[test]
    fn test_dimension_markup() {
        let mut builder = SvgBuilder::new(compact());
        let dim = DimensionLine::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            "reach",
            50.0,
            OffsetMode::Horizontal,
            ExtensionStyle::Derived,
        );
        render_dimension(&mut builder, &DiagramStyle::primary(), &dim);
        let svg = builder.build(CAMERA);
        // Compact output with no CSS or markers: the body follows the <svg> tag
        let (_, body) = svg.split_once('>').expect("svg open tag");
        insta::assert_snapshot!(body, @r##"<line x1="0" y1="0" x2="0" y2="-50" class="bg-dim-line" stroke-dasharray="4,4" opacity="0.6"/><line x1="100" y1="0" x2="100" y2="-50" class="bg-dim-line" stroke-dasharray="4,4" opacity="0.6"/><line x1="0" y1="-50" x2="100" y2="-50" class="bg-dim-line" marker-start="url(#bg-arrow-rev)" marker-end="url(#bg-arrow)"/><text x="50" y="-55" class="bg-text" text-anchor="middle">reach</text></svg>"##);
    }

    #[test]
    fn test_degenerate_dimension_emits_nothing() {
        let mut builder = SvgBuilder::new(compact());
        let dim = DimensionLine::new(
            Point::new(3.0, 3.0),
            Point::new(3.0, 3.0),
            "zero",
            20.0,
            OffsetMode::Aligned,
            ExtensionStyle::Primary,
        );
        render_dimension(&mut builder, &DiagramStyle::primary(), &dim);
        assert!(builder.elements.is_empty());
    }

    #[test]
    fn test_layer_draw_order() {
        let layout = solve(&DEFAULT_GEOMETRY);
        let style = DiagramStyle::primary();
        let layer = Layer {
            kind: LayerKind::Primary,
            geometry: &DEFAULT_GEOMETRY,
            layout,
            style: &style,
            options: RenderOptions {
                show_dimensions: false,
            },
        };
        let svg = render_svg(&[layer], &compact());

        let order = [
            "bg-dim-line",
            "bg-tire",
            "bg-rim",
            "bg-component",
            "bg-bar",
            "bg-frame-fill",
            "bg-fork-fill",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|class| svg.find(&format!(r#"class="{}""#, class)).expect(class))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
        // BB joint is the last element drawn
        let last_joint = svg.rfind(r#"r="10" class="bg-joint""#).expect("bb joint");
        assert!(last_joint > positions[6]);
        assert!(!svg.contains("dimensions"));
    }

    #[test]
    fn test_frame_path_vertex_order() {
        let layout = solve(&DEFAULT_GEOMETRY);
        let style = DiagramStyle::primary();
        let svg = render_svg(
            &[Layer {
                kind: LayerKind::Primary,
                geometry: &DEFAULT_GEOMETRY,
                layout,
                style: &style,
                options: RenderOptions::default(),
            }],
            &compact(),
        );
        let p = &layout.points;
        let expected = PathData::polyline(&[
            p.base,
            p.seat_tube_top,
            p.head_tube_top,
            p.head_tube_bottom,
            p.head_tube_join,
            p.base,
            p.rear_hub,
            p.seat_tube_top,
        ])
        .to_svg_d();
        assert!(svg.contains(&format!(r#"<path d="{}" class="bg-frame-fill"/>"#, expected)));
        assert!(expected.starts_with("M0,0 L-140.33,-479.9 L374,-575"));
    }
}
