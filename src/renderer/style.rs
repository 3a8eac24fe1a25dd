//! Drawing-role styles
//!
//! The renderer never hardcodes colors or stroke widths. Every drawn element
//! is tagged with a semantic [`StyleRole`], and a style value maps each role
//! to an opaque CSS class name. The same layout can therefore be drawn in
//! the primary look or the muted "ghost" look used for reference overlays.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{read_file, LoadError};

/// Semantic drawing roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleRole {
    /// Seatpost, steerer, stem and saddle strokes
    Component,
    /// Ground line, dimension and extension lines, angle arcs
    DimLine,
    /// Bottom bracket marker and hub dots
    Joint,
    Tire,
    Rim,
    FrameFill,
    ForkFill,
    /// Handlebar drop
    Bar,
    /// Dimension labels
    Text,
}

impl StyleRole {
    pub const ALL: [StyleRole; 9] = [
        StyleRole::Component,
        StyleRole::DimLine,
        StyleRole::Joint,
        StyleRole::Tire,
        StyleRole::Rim,
        StyleRole::FrameFill,
        StyleRole::ForkFill,
        StyleRole::Bar,
        StyleRole::Text,
    ];

    /// Look up a role by its snake_case name (as used in style files)
    pub fn from_name(name: &str) -> Option<StyleRole> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.css_name().replace('-', "_") == name)
    }

    /// Kebab-case role name used to build default class names
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleRole::Component => "component",
            StyleRole::DimLine => "dim-line",
            StyleRole::Joint => "joint",
            StyleRole::Tire => "tire",
            StyleRole::Rim => "rim",
            StyleRole::FrameFill => "frame-fill",
            StyleRole::ForkFill => "fork-fill",
            StyleRole::Bar => "bar",
            StyleRole::Text => "text",
        }
    }
}

/// Anything that can supply a class name for every drawing role
pub trait RoleStyles {
    /// Class name for a role
    fn class_for(&self, role: StyleRole) -> &str;

    /// CSS rules backing the class names, if any
    fn css(&self) -> Option<&str> {
        None
    }
}

/// A concrete role → class mapping with optional CSS
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramStyle {
    /// Optional name for the style
    pub name: Option<String>,
    /// Role → class name; always holds every role
    pub roles: BTreeMap<StyleRole, String>,
    /// CSS rules for the classes
    pub css: Option<String>,
}

/// TOML structure for deserializing styles
#[derive(Deserialize)]
struct TomlStyle {
    name: Option<String>,
    css: Option<String>,
    #[serde(default)]
    roles: BTreeMap<String, String>,
}

const PRIMARY_PREFIX: &str = "bg-";
const GHOST_PREFIX: &str = "bg-ghost-";

const PRIMARY_CSS: &str = "\
.bg-component { fill: none; stroke: #333333; stroke-width: 8; stroke-linecap: round; }
.bg-dim-line { fill: none; stroke: #555555; stroke-width: 2; }
.bg-joint { fill: #ffffff; stroke: #333333; stroke-width: 3; }
.bg-tire { fill: none; stroke: #222222; stroke-width: 24; }
.bg-rim { fill: none; stroke: #999999; stroke-width: 4; }
.bg-frame-fill { fill: #2196f3; fill-opacity: 0.15; stroke: #1565c0; stroke-width: 14; stroke-linejoin: round; }
.bg-fork-fill { fill: none; stroke: #1565c0; stroke-width: 12; stroke-linecap: round; }
.bg-bar { fill: none; stroke: #333333; stroke-width: 8; stroke-linecap: round; stroke-linejoin: round; }
.bg-text { fill: #333333; font-family: sans-serif; font-size: 22px; }";

const GHOST_CSS: &str = "\
.bg-ghost-component { fill: none; stroke: #bbbbbb; stroke-width: 8; stroke-linecap: round; }
.bg-ghost-dim-line { fill: none; stroke: #cccccc; stroke-width: 2; }
.bg-ghost-joint { fill: #ffffff; stroke: #bbbbbb; stroke-width: 3; }
.bg-ghost-tire { fill: none; stroke: #dddddd; stroke-width: 24; }
.bg-ghost-rim { fill: none; stroke: #e0e0e0; stroke-width: 4; }
.bg-ghost-frame-fill { fill: #ff9800; fill-opacity: 0.1; stroke: #ffb74d; stroke-width: 14; stroke-linejoin: round; stroke-opacity: 0.6; }
.bg-ghost-fork-fill { fill: none; stroke: #ffb74d; stroke-width: 12; stroke-linecap: round; stroke-opacity: 0.6; }
.bg-ghost-bar { fill: none; stroke: #bbbbbb; stroke-width: 8; stroke-linecap: round; stroke-linejoin: round; }
.bg-ghost-text { fill: #aaaaaa; font-family: sans-serif; font-size: 22px; }";

fn prefixed_roles(prefix: &str) -> BTreeMap<StyleRole, String> {
    StyleRole::ALL
        .iter()
        .map(|role| (*role, format!("{}{}", prefix, role.css_name())))
        .collect()
}

impl DiagramStyle {
    /// The default foreground style
    pub fn primary() -> Self {
        Self {
            name: Some("primary".to_string()),
            roles: prefixed_roles(PRIMARY_PREFIX),
            css: Some(PRIMARY_CSS.to_string()),
        }
    }

    /// The muted style used for reference overlays
    pub fn ghost() -> Self {
        Self {
            name: Some("ghost".to_string()),
            roles: prefixed_roles(GHOST_PREFIX),
            css: Some(GHOST_CSS.to_string()),
        }
    }

    /// Load a style from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a style from a TOML string.
    ///
    /// Roles missing from the `[roles]` table fall back to the primary
    /// class names, and the primary CSS is then carried ahead of the file's
    /// own rules.
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        let parsed: TomlStyle = toml::from_str(content)?;

        let mut roles = prefixed_roles(PRIMARY_PREFIX);
        let mut overridden = 0;
        for (name, class) in parsed.roles {
            let role = StyleRole::from_name(&name).ok_or(LoadError::UnknownRole { name })?;
            roles.insert(role, class);
            overridden += 1;
        }

        // Fallback classes need their rules in the document too
        let css = if overridden < StyleRole::ALL.len() {
            match parsed.css {
                Some(own) => Some(format!("{}\n{}", PRIMARY_CSS, own.trim_end())),
                None => Some(PRIMARY_CSS.to_string()),
            }
        } else {
            parsed.css
        };

        Ok(DiagramStyle {
            name: parsed.name,
            roles,
            css,
        })
    }
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self::primary()
    }
}

impl RoleStyles for DiagramStyle {
    fn class_for(&self, role: StyleRole) -> &str {
        self.roles
            .get(&role)
            .map(|s| s.as_str())
            .unwrap_or_else(|| role.css_name())
    }

    fn css(&self) -> Option<&str> {
        self.css.as_deref()
    }
}
