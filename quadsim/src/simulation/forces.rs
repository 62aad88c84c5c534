//! Force contributors for the n-body engine
//!
//! Defines the pairwise Newtonian force law, the [`ForceModel`] trait the
//! engine steps with, and its two implementations: direct `O(N²)` summation and
//! the Barnes–Hut tree. Both return forces, not accelerations; the integrator
//! divides by mass.

use rayon::prelude::*;

use crate::simulation::barnes_hut::QuadTree;
use crate::simulation::error::{Result, SimError};
use crate::simulation::states::{Body, NVec2, Universe};

/// Gravitational constant in SI units (m³ kg⁻¹ s⁻²)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

/// Opening threshold used when none is configured
pub const DEFAULT_THETA: f64 = 0.5;

/// Force exerted on `target` by a point mass at `source_position`.
///
/// Magnitude `g * m1 * m2 / d²`, pointing from the target toward the source.
/// Returns zero when the two positions coincide exactly.
#[inline]
pub fn gravity_force(target: &Body, source_position: NVec2, source_mass: f64, g: f64) -> NVec2 {
    let r = source_position - target.position;
    let dist = r.norm();
    if dist == 0.0 {
        return NVec2::zeros();
    }

    // F = g m1 m2 / d², split along r / d
    let magnitude = g * target.mass * source_mass / (dist * dist);
    r * (magnitude / dist)
}

/// Anything that can produce the net force on every body of a snapshot.
///
/// `out[i]` is `None` exactly when body slot `i` is absent.
pub trait ForceModel: Send + Sync {
    fn net_forces(&self, universe: &Universe) -> Result<Vec<Option<NVec2>>>;

    /// Short label for logs
    fn name(&self) -> &'static str;
}

/// Exact pairwise summation over every other present body.
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct DirectGravity {
    pub G: f64,
    pub parallel: bool,
}

impl DirectGravity {
    /// Net force on `target` from every present body in `universe`
    pub fn force_on(&self, target: &Body, universe: &Universe) -> NVec2 {
        universe
            .present()
            .map(|(_, source)| gravity_force(target, source.position, source.mass, self.G))
            .fold(NVec2::zeros(), |acc, f| acc + f)
    }
}

impl ForceModel for DirectGravity {
    fn net_forces(&self, universe: &Universe) -> Result<Vec<Option<NVec2>>> {
        Ok(per_body(universe, self.parallel, |b| self.force_on(b, universe)))
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

/// Barnes–Hut approximation: one quadtree per call, then one traversal per body.
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct TreeGravity {
    pub G: f64,
    pub theta: f64,
    pub parallel: bool,
}

impl TreeGravity {
    /// # Errors
    /// [`SimError::InvalidTheta`] when `theta` is negative or NaN.
    #[allow(non_snake_case)]
    pub fn new(G: f64, theta: f64, parallel: bool) -> Result<Self> {
        if theta.is_nan() || theta < 0.0 {
            return Err(SimError::InvalidTheta { theta });
        }
        Ok(Self { G, theta, parallel })
    }
}

impl ForceModel for TreeGravity {
    fn net_forces(&self, universe: &Universe) -> Result<Vec<Option<NVec2>>> {
        let tree = QuadTree::from_universe(universe)?;
        Ok(per_body(universe, self.parallel, |b| {
            tree.force_on(b, self.theta, self.G)
        }))
    }

    fn name(&self) -> &'static str {
        "barnes-hut"
    }
}

/// Evaluate `f` for every present body, keeping slot order.
///
/// With `parallel` the bodies are fanned out over the rayon pool; `collect`
/// preserves the input order and returns only after every body is done.
fn per_body<F>(universe: &Universe, parallel: bool, f: F) -> Vec<Option<NVec2>>
where
    F: Fn(&Body) -> NVec2 + Send + Sync,
{
    if parallel {
        universe
            .bodies()
            .par_iter()
            .map(|slot| slot.as_ref().map(&f))
            .collect()
    } else {
        universe
            .bodies()
            .iter()
            .map(|slot| slot.as_ref().map(&f))
            .collect()
    }
}
