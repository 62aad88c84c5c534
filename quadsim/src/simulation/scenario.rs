//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`
//! containing:
//! - the stepping engine (`Engine`) with its force model
//! - numerical parameters (`Parameters`)
//! - the initial snapshot (`Universe`)
//!
//! All input validation (masses, width, θ, dt, vector shapes) happens here,
//! before the first step.

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::configuration::config::{BodyConfig, EngineConfig, ScenarioConfig};
use crate::export::frames::{Frame, FrameRecorder};
use crate::simulation::engine::Engine;
use crate::simulation::error::{Result, SimError};
use crate::simulation::forces::{DirectGravity, TreeGravity, DEFAULT_THETA, GRAVITATIONAL_CONSTANT};
use crate::simulation::galaxy::{generate_galaxy, push_galaxy};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, Rgb, Universe};

/// A fully-initialized run: engine, parameters and the snapshot at t = 0
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub universe: Universe,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            steps: p_cfg.steps,
            dt: p_cfg.dt,
            width: p_cfg.width,
            theta: cfg.engine.theta.unwrap_or(DEFAULT_THETA),
            G: p_cfg.G.unwrap_or(GRAVITATIONAL_CONSTANT),
            seed: p_cfg.seed.unwrap_or(0),
            frequency: p_cfg.frequency.unwrap_or(1).max(1),
            scaling_factor: p_cfg.scaling_factor.unwrap_or(1.0),
        };

        // Bodies: explicit ones first, then every generated galaxy
        let mut bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| body_from_config(i, bc))
            .collect::<Result<Vec<Body>>>()?;

        let mut rng = ChaCha8Rng::seed_from_u64(parameters.seed);
        for g in &cfg.galaxies {
            let center = NVec2::new(g.center[0], g.center[1]);
            let mut galaxy = generate_galaxy(g.stars, g.radius, center, parameters.G, &mut rng);
            if let Some(push) = g.push {
                push_galaxy(&mut galaxy, NVec2::new(push[0], push[1]));
            }
            bodies.extend(galaxy);
        }

        if bodies.is_empty() {
            return Err(SimError::EmptyScenario);
        }

        let universe = Universe::new(bodies, parameters.width)?;
        let engine = build_engine(&cfg.engine, &parameters)?;

        info!(
            "scenario: {} bodies, {} steps of {} s, {} forces (theta = {})",
            universe.len(),
            parameters.steps,
            parameters.dt,
            engine.force_model().name(),
            parameters.theta
        );

        Ok(Self {
            engine,
            parameters,
            universe,
        })
    }

    /// Run every step, sampling frames as configured.
    ///
    /// Snapshots are streamed through the recorder, so only the sampled frames
    /// and the current snapshot are kept in memory.
    pub fn run(&self) -> Result<Vec<Frame>> {
        let mut recorder =
            FrameRecorder::new(self.parameters.frequency, self.parameters.scaling_factor);
        let log_every = (self.parameters.steps / 10).max(1);

        for item in self.engine.trajectory(self.universe.clone(), self.parameters.steps) {
            let (step, universe) = item?;
            recorder.record(step, &universe);
            if step % log_every == 0 {
                info!(
                    "step {}/{}: {} bodies in region",
                    step,
                    self.parameters.steps,
                    universe.present_count()
                );
            }
        }

        Ok(recorder.into_frames())
    }
}

fn build_engine(e_cfg: &EngineConfig, parameters: &Parameters) -> Result<Engine> {
    let parallel = e_cfg.parallel.unwrap_or(true);
    if e_cfg.barnes_hut {
        Engine::new(TreeGravity::new(parameters.G, parameters.theta, parallel)?, parameters.dt)
    } else {
        Engine::new(
            DirectGravity {
                G: parameters.G,
                parallel,
            },
            parameters.dt,
        )
    }
}

/// Map a `BodyConfig` to a runtime `Body` using nalgebra vectors
fn body_from_config(index: usize, bc: &BodyConfig) -> Result<Body> {
    let x = vec2(index, "position", &bc.x)?;
    let v = vec2(index, "velocity", &bc.v)?;
    Ok(Body::new(x, bc.m)
        .with_velocity(v)
        .with_radius(bc.radius)
        .with_color(bc.color.map(Rgb).unwrap_or_default()))
}

fn vec2(index: usize, field: &'static str, xs: &[f64]) -> Result<NVec2> {
    match xs {
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(SimError::BadVector {
            index,
            field,
            len: xs.len(),
        }),
    }
}
