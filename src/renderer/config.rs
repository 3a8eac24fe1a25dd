//! Configuration for SVG rendering

/// A viewBox rectangle in screen space (Y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fixed camera window. Sized so a road frame with both wheels and all
/// dimension annotations fits with the bottom bracket near the center.
pub const CAMERA: ViewBox = ViewBox {
    x: -850.0,
    y: -1050.0,
    width: 1900.0,
    height: 1400.0,
};

/// Per-drawing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw dimension lines and angle arcs
    pub show_dimensions: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_dimensions: true,
        }
    }
}

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with newlines and indentation
    pub pretty_print: bool,

    /// Whether to embed the styles' CSS in a `<style>` element
    pub embed_css: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            embed_css: true,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set whether to embed style CSS
    pub fn with_embed_css(mut self, embed: bool) -> Self {
        self.embed_css = embed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgConfig::default();
        assert!(config.standalone);
        assert!(config.pretty_print);
        assert!(config.embed_css);
        assert!(RenderOptions::default().show_dimensions);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SvgConfig::new()
            .with_standalone(false)
            .with_pretty_print(false)
            .with_embed_css(false);

        assert!(!config.standalone);
        assert!(!config.pretty_print);
        assert!(!config.embed_css);
    }

    #[test]
    fn test_camera_contains_origin() {
        assert!(CAMERA.x < 0.0 && CAMERA.x + CAMERA.width > 0.0);
        assert!(CAMERA.y < 0.0 && CAMERA.y + CAMERA.height > 0.0);
    }
}
