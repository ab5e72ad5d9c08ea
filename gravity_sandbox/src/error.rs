//! Error types for loading a simulation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a configuration file cannot produce a runnable world
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("body {index} ({name:?}): body mass must be nonzero")]
    ZeroMass { index: usize, name: String },

    #[error("body {index} ({name:?}): {field} must be finite")]
    NonFinite {
        index: usize,
        name: String,
        field: &'static str,
    },

    #[error("fixed timestep must be a positive number of seconds, got {0}")]
    InvalidTimestep(f64),
}
