//! SVG renderer for solved frame layouts
//!
//! Takes one or two solved geometries and produces an annotated, to-scale
//! technical drawing with CSS classes for styling.

pub mod config;
pub mod dimension;
pub mod path;
pub mod style;
pub mod svg;

pub use config::{RenderOptions, SvgConfig, ViewBox, CAMERA};
pub use style::{DiagramStyle, RoleStyles, StyleRole};
pub use svg::{render_svg, Layer, LayerKind};
