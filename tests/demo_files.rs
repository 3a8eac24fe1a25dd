//! Renders every geometry in `demos/` and checks the loaders against files
//! on disk.

use std::fs;
use std::path::Path;

use bike_geometry::{
    render_with_config, solve, DiagramStyle, Geometry, LoadError, RenderConfig, StyleRole,
    RoleStyles, DEFAULT_GEOMETRY,
};

const DEMOS: &str = "demos";

fn demo_geometries() -> Vec<(String, Geometry)> {
    let dir = Path::new(DEMOS);
    assert!(dir.exists(), "demos directory not found at {:?}", dir);

    let mut out = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read demos directory") {
        let path = entry.expect("Failed to read entry").path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if name.ends_with(".toml") && !name.ends_with(".style.toml") {
            let geometry = Geometry::from_file(&path)
                .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e));
            out.push((name.to_string(), geometry));
        }
    }
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

#[test]
fn test_all_demos_render() {
    let demos = demo_geometries();
    assert!(demos.len() >= 3, "expected demo geometries, found {}", demos.len());

    let config = RenderConfig::default();
    for (name, geometry) in &demos {
        let layout = solve(geometry);
        assert!(
            layout.measurements.wheel_base.is_finite(),
            "{}: non-finite wheel base",
            name
        );
        let svg = render_with_config(geometry, Some(&DEFAULT_GEOMETRY), &config);
        assert!(svg.contains("<svg"), "{}: missing <svg>", name);
        assert!(svg.ends_with("</svg>"), "{}: missing </svg>", name);
        assert!(!svg.contains("NaN"), "{}: NaN in output", name);
    }
}

#[test]
fn test_endurance_demo_is_default_geometry() {
    let g = Geometry::from_file(Path::new("demos/endurance.toml")).expect("Should load");
    assert_eq!(g, DEFAULT_GEOMETRY);
}

#[test]
fn test_catalog_row_uses_camel_case() {
    let g = Geometry::from_file(Path::new("demos/catalog-row.toml")).expect("Should load");
    assert_eq!(g.head_tube_angle, 72.0);
    assert_eq!(g.chain_stay, 415.0);
    assert_eq!(g.fork_rake, DEFAULT_GEOMETRY.fork_rake);
}

#[test]
fn test_blueprint_style_loads() {
    let style =
        DiagramStyle::from_file(Path::new("demos/blueprint.style.toml")).expect("Should load");
    assert_eq!(style.name.as_deref(), Some("blueprint"));
    assert_eq!(style.class_for(StyleRole::FrameFill), "bp-frame");
    assert_eq!(style.class_for(StyleRole::Tire), "bg-tire");
    assert!(style.css().is_some_and(|css| css.contains(".bp-frame {")));
}

#[test]
fn test_missing_file_reports_path() {
    let err = Geometry::from_file(Path::new("demos/does-not-exist.toml")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("does-not-exist.toml"));
}
