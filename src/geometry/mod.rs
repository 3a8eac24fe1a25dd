//! Frame geometry: input parameters and the solver that derives every
//! structural point from them.

pub mod config;
pub mod solver;
pub mod transform;
pub mod types;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{read_file, LoadError};

pub use config::{FrontHubModel, SolverConfig};
pub use solver::{solve, solve_with_config, DerivedLayout, FrameMeasurements, FramePoints};
pub use transform::RotationTransform;
pub use types::Point;

/// Wheel radius (mm) of a 700c wheel with a typical road tire
pub const WHEEL_RADIUS: f64 = 344.0;

/// Frame measurements that define a bike.
///
/// Angles are degrees measured from horizontal, lengths are millimeters.
/// Fields missing from a TOML document fall back to [`DEFAULT_GEOMETRY`];
/// camelCase keys are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub stack: f64,
    pub reach: f64,
    #[serde(alias = "headTubeAngle")]
    pub head_tube_angle: f64,
    #[serde(alias = "seatTubeAngle")]
    pub seat_tube_angle: f64,
    #[serde(alias = "bbDrop")]
    pub bb_drop: f64,
    #[serde(alias = "chainStay")]
    pub chain_stay: f64,
    #[serde(alias = "headTubeLength")]
    pub head_tube_length: f64,
    #[serde(alias = "seatTubeLength")]
    pub seat_tube_length: f64,
    #[serde(alias = "forkLength")]
    pub fork_length: f64,
    #[serde(alias = "forkRake")]
    pub fork_rake: f64,
    #[serde(alias = "stemLength")]
    pub stem_length: f64,
    #[serde(alias = "stemAngle")]
    pub stem_angle: f64,
    pub spacers: f64,
    #[serde(alias = "seatPostLength")]
    pub seat_post_length: f64,
    #[serde(alias = "wheelRadius")]
    pub wheel_radius: f64,
}

/// Reference geometry: a mid-size endurance road frame
pub const DEFAULT_GEOMETRY: Geometry = Geometry {
    stack: 575.0,
    reach: 374.0,
    head_tube_angle: 71.3,
    seat_tube_angle: 73.7,
    bb_drop: 80.0,
    chain_stay: 420.0,
    head_tube_length: 160.0,
    seat_tube_length: 500.0,
    fork_length: 371.0,
    fork_rake: 53.0,
    stem_length: 100.0,
    stem_angle: -7.0,
    spacers: 20.0,
    seat_post_length: 180.0,
    wheel_radius: WHEEL_RADIUS,
};

impl Default for Geometry {
    fn default() -> Self {
        DEFAULT_GEOMETRY
    }
}

impl Geometry {
    /// Load a geometry from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a geometry from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay catalog stack/reach values on this geometry.
    ///
    /// Catalog rows typically carry only stack and reach; every other
    /// measurement comes from the base geometry.
    pub fn with_stack_reach(mut self, stack: f64, reach: f64) -> Self {
        self.stack = stack;
        self.reach = reach;
        self
    }
}
