//! Error type shared by the simulation, configuration and export layers.

use thiserror::Error;

pub type Result<T, E = SimError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("body {index} has invalid mass {mass} (must be finite and > 0)")]
    InvalidMass { index: usize, mass: f64 },

    #[error("region width {width} is degenerate (must be finite and > 0)")]
    DegenerateRegion { width: f64 },

    #[error("theta {theta} is invalid (must be >= 0)")]
    InvalidTheta { theta: f64 },

    #[error("time step {dt} is invalid (must be finite and >= 0)")]
    InvalidTimeStep { dt: f64 },

    #[error("scenario has no bodies")]
    EmptyScenario,

    #[error("body {index}: expected a 2-component {field}, got {len} components")]
    BadVector {
        index: usize,
        field: &'static str,
        len: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
