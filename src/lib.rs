//! Bike Geometry - parametric bicycle frame geometry engine
//!
//! Given a handful of frame measurements (stack, reach, tube angles and
//! lengths, fork rake, wheel radius, cockpit setup) this library derives
//! every other structural point of the frame and renders an annotated,
//! to-scale SVG drawing, optionally over a second "reference" frame.
//!
//! # Example
//!
//! ```rust
//! use bike_geometry::{render, solve, DiagramStyle, RenderOptions, DEFAULT_GEOMETRY};
//!
//! let layout = solve(&DEFAULT_GEOMETRY);
//! assert!(layout.measurements.wheel_base > 1000.0);
//!
//! let svg = render(&DEFAULT_GEOMETRY, &DiagramStyle::primary(), RenderOptions::default(), None);
//! assert!(svg.contains("<svg"));
//! ```

pub mod error;
pub mod geometry;
pub mod log;
pub mod renderer;

pub use error::LoadError;
pub use geometry::{
    solve, solve_with_config, DerivedLayout, FrameMeasurements, FramePoints, FrontHubModel,
    Geometry, Point, SolverConfig, DEFAULT_GEOMETRY,
};
pub use renderer::{
    render_svg, DiagramStyle, Layer, LayerKind, RenderOptions, RoleStyles, StyleRole, SvgConfig,
};

/// Configuration for the complete solve + render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Solver configuration, applied to both geometries
    pub solver: SolverConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Style of the primary geometry
    pub style: DiagramStyle,
    /// Style of the reference geometry
    pub ghost_style: DiagramStyle,
    /// Draw dimensions on the primary geometry
    pub show_dimensions: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            svg: SvgConfig::default(),
            style: DiagramStyle::primary(),
            ghost_style: DiagramStyle::ghost(),
            show_dimensions: true,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the solver configuration
    pub fn with_solver(mut self, config: SolverConfig) -> Self {
        self.solver = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the primary style
    pub fn with_style(mut self, style: DiagramStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the reference (ghost) style
    pub fn with_ghost_style(mut self, style: DiagramStyle) -> Self {
        self.ghost_style = style;
        self
    }

    /// Enable or disable dimension annotations
    pub fn with_dimensions(mut self, show: bool) -> Self {
        self.show_dimensions = show;
        self
    }
}

/// Render a geometry with the given style, optionally over a reference
/// geometry drawn in the built-in ghost style.
///
/// Uses the default solver and SVG configuration.
pub fn render(
    geometry: &Geometry,
    style: &dyn RoleStyles,
    options: RenderOptions,
    reference: Option<&Geometry>,
) -> String {
    let ghost = DiagramStyle::ghost();
    let solver = SolverConfig::default();
    let layers = build_layers(geometry, style, options, reference, &ghost, &solver);
    render_svg(&layers, &SvgConfig::default())
}

/// Render a geometry, optionally over a reference geometry, with custom
/// configuration
///
/// # Example
///
/// ```rust
/// use bike_geometry::{render_with_config, RenderConfig, SvgConfig, DEFAULT_GEOMETRY};
///
/// let reference = DEFAULT_GEOMETRY.with_stack_reach(550.0, 390.0);
/// let config = RenderConfig::new().with_svg(SvgConfig::default().with_standalone(false));
///
/// let svg = render_with_config(&DEFAULT_GEOMETRY, Some(&reference), &config);
/// assert!(svg.contains(r#"data-layer="reference""#));
/// assert!(svg.contains(r#"data-layer="primary""#));
/// ```
pub fn render_with_config(
    geometry: &Geometry,
    reference: Option<&Geometry>,
    config: &RenderConfig,
) -> String {
    let options = RenderOptions {
        show_dimensions: config.show_dimensions,
    };
    let layers = build_layers(
        geometry,
        &config.style,
        options,
        reference,
        &config.ghost_style,
        &config.solver,
    );
    render_svg(&layers, &config.svg)
}

/// Solve each geometry once and stack the layers back to front. The
/// reference layer never carries dimensions.
fn build_layers<'a>(
    geometry: &'a Geometry,
    style: &'a dyn RoleStyles,
    options: RenderOptions,
    reference: Option<&'a Geometry>,
    ghost_style: &'a dyn RoleStyles,
    solver: &SolverConfig,
) -> Vec<Layer<'a>> {
    let mut layers = Vec::with_capacity(2);

    if let Some(reference) = reference {
        layers.push(Layer {
            kind: LayerKind::Reference,
            geometry: reference,
            layout: solve_with_config(reference, solver),
            style: ghost_style,
            options: RenderOptions {
                show_dimensions: false,
            },
        });
    }

    layers.push(Layer {
        kind: LayerKind::Primary,
        geometry,
        layout: solve_with_config(geometry, solver),
        style,
        options,
    });

    layers
}
