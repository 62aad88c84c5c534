//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – force evaluation options (Barnes–Hut or direct, θ, threads)
//! - [`ParametersConfig`] – step count, step size, region and output settings
//! - [`BodyConfig`]       – explicit initial state for individual bodies
//! - [`GalaxyConfig`]     – generated galaxies (stars around a black hole)
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A two-galaxy collision matching these types:
//!
//! ```yaml
//! engine:
//!   barnes_hut: true        # false -> direct n^2 summation
//!   theta: 0.5              # opening threshold, default 0.5
//!   parallel: true          # evaluate forces on the rayon pool, default true
//!
//! parameters:
//!   steps: 2000             # number of steps
//!   dt: 2.0e14              # simulated seconds per step
//!   width: 1.0e23           # side of the simulation square, origin at (0, 0)
//!   seed: 42                # galaxy generator seed, default 0
//!   frequency: 100          # keep every 100th snapshot as a frame
//!   scaling_factor: 1.0e11  # display radius multiplier
//!
//! galaxies:
//!   - stars: 500
//!     radius: 4.0e21
//!     center: [7.0e22, 2.0e22]
//!     push: [-1.0e3, 1.0e3]
//!   - stars: 500
//!     radius: 4.0e21
//!     center: [2.0e22, 7.0e22]
//!     push: [1.0e3, -1.0e3]
//! ```
//!
//! Explicit `bodies` and generated `galaxies` may be mixed; explicit bodies
//! come first in slot order.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::simulation::error::Result;

/// Force evaluation options
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub barnes_hut: bool, // `true` - quadtree approximation, `false` - direct N^2 summation
    pub theta: Option<f64>, // width / distance at or below which a node is used as one mass
    pub parallel: Option<bool>, // fan force evaluation out over threads
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub steps: usize, // number of steps
    pub dt: f64, // time step size
    pub width: f64, // simulation square side
    pub G: Option<f64>, // gravitational constant, SI by default
    pub seed: Option<u64>, // deterministic seed to make runs reproducible
    pub frequency: Option<usize>, // frame sampling frequency
    pub scaling_factor: Option<f64>, // display radius multiplier
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // Initial position
    pub v: Vec<f64>, // Initial velocity
    pub m: f64, // Mass, must be > 0
    #[serde(default)]
    pub radius: f64, // Display radius
    pub color: Option<[u8; 3]>, // Display color, white by default
}

/// A generated galaxy
#[derive(Deserialize, Debug, Clone)]
pub struct GalaxyConfig {
    pub stars: usize, // number of stars, the black hole comes on top
    pub radius: f64, // disk radius
    pub center: [f64; 2], // disk center
    pub push: Option<[f64; 2]>, // velocity added to every body of the galaxy
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub galaxies: Vec<GalaxyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}
