//! Step driver
//!
//! `Engine` pairs a [`ForceModel`] with a fixed time step and advances
//! snapshots: build forces from `Universe(t)`, integrate, apply the boundary
//! policy, hand back `Universe(t+1)`. Steps are atomic; nothing carries over
//! between them except the snapshot itself.

use log::debug;

use crate::simulation::error::Result;
use crate::simulation::forces::{ForceModel, TreeGravity, GRAVITATIONAL_CONSTANT};
use crate::simulation::integrator::{explicit_step, validate_dt};
use crate::simulation::states::Universe;

pub struct Engine {
    dt: f64,
    forces: Box<dyn ForceModel>,
}

impl Engine {
    /// # Errors
    /// [`SimError::InvalidTimeStep`](crate::SimError::InvalidTimeStep) for a
    /// negative or non-finite `dt`.
    pub fn new(forces: impl ForceModel + 'static, dt: f64) -> Result<Self> {
        Ok(Self {
            dt: validate_dt(dt)?,
            forces: Box::new(forces),
        })
    }

    /// Barnes–Hut engine with SI gravity, evaluating forces in parallel.
    pub fn barnes_hut(dt: f64, theta: f64) -> Result<Self> {
        Self::new(TreeGravity::new(GRAVITATIONAL_CONSTANT, theta, true)?, dt)
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn force_model(&self) -> &dyn ForceModel {
        self.forces.as_ref()
    }

    /// Advance `universe` by one time step.
    ///
    /// The input snapshot is not modified. The result has the same number of
    /// slots; bodies that left the region are `None`.
    pub fn step(&self, universe: &Universe) -> Result<Universe> {
        let forces = self.forces.net_forces(universe)?;
        let next = explicit_step(universe, &forces, self.dt);

        debug!(
            "{} step: {} -> {} bodies present",
            self.forces.name(),
            universe.present_count(),
            next.present_count()
        );
        Ok(next)
    }

    /// Lazily step `initial` forward `steps` times.
    ///
    /// Yields `(0, initial)` first, then `(k, Universe(k))` for `k` in
    /// `1..=steps`. Each snapshot is computed only when requested, so dropping
    /// the iterator stops the run between steps. After an error the iterator is
    /// exhausted.
    pub fn trajectory(&self, initial: Universe, steps: usize) -> Trajectory<'_> {
        Trajectory {
            engine: self,
            initial: Some(initial),
            last: None,
            step: 0,
            steps,
        }
    }

    /// Collect the whole trajectory, `steps + 1` snapshots including `initial`.
    pub fn run(&self, initial: Universe, steps: usize) -> Result<Vec<Universe>> {
        self.trajectory(initial, steps)
            .map(|item| item.map(|(_, u)| u))
            .collect()
    }
}

/// One Barnes–Hut step with SI gravity: `Step(bodies, dt, theta) -> bodies'`.
pub fn step(universe: &Universe, dt: f64, theta: f64) -> Result<Universe> {
    Engine::barnes_hut(dt, theta)?.step(universe)
}

/// Single-pass sequence of snapshots, see [`Engine::trajectory`].
pub struct Trajectory<'a> {
    engine: &'a Engine,
    initial: Option<Universe>,
    last: Option<Universe>,
    step: usize,
    steps: usize,
}

impl Iterator for Trajectory<'_> {
    type Item = Result<(usize, Universe)>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(initial) = self.initial.take() {
            self.last = Some(initial.clone());
            return Some(Ok((0, initial)));
        }
        if self.step >= self.steps {
            return None;
        }

        let previous = self.last.take()?;
        match self.engine.step(&previous) {
            Ok(next) => {
                self.step += 1;
                self.last = Some(next.clone());
                Some(Ok((self.step, next)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
