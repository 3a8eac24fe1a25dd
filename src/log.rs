//! Logging macros used across the crate.
//!
//! Output only appears when the host installs a `tracing` subscriber
//! (the CLI does, filtered by `RUST_LOG`).

pub use tracing::{debug, warn};
