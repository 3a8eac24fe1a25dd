//! Configuration for the geometry solver

/// How the front hub is located from the bottom of the head tube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontHubModel {
    /// Travel down the steering axis exactly as far as needed for the hub
    /// (after rake) to sit at the rear-hub height. `fork_length` is unused.
    #[default]
    LevelHubs,
    /// Travel the literal fork length down the steering axis, then add rake.
    /// The hubs are leveled afterwards by orientation normalization.
    ForkLength,
}

/// Configuration options for the solver
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    pub front_hub: FrontHubModel,
}

impl SolverConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the front hub model
    pub fn with_front_hub(mut self, model: FrontHubModel) -> Self {
        self.front_hub = model;
        self
    }
}
