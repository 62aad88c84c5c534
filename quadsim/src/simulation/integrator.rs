//! Fixed-step explicit integrator for the N-body system
//!
//! Advances one body at a time from its net force:
//!
//! ```text
//! a' = F / m
//! v' = v + a' dt
//! x' = x + v dt + 1/2 a dt²      (pre-update v and a)
//! ```
//!
//! This is not symplectic and drifts in energy over long runs; the scheme is
//! kept as is so trajectories stay comparable between runs.

use log::warn;

use super::error::{Result, SimError};
use super::region::Region;
use super::states::{Body, NVec2, Universe};

/// New body state after `dt` under `force`. The input is left untouched.
pub fn integrate_body(body: &Body, force: NVec2, dt: f64) -> Body {
    let acceleration = force / body.mass;
    let velocity = body.velocity + acceleration * dt;
    let position = body.position + body.velocity * dt + 0.5 * dt * dt * body.acceleration;

    Body {
        position,
        velocity,
        acceleration,
        ..*body
    }
}

/// Drop bodies that left `region` (closed interval on both axes).
///
/// Removed bodies are gone for good; they are never reflected, clamped or
/// wrapped back in.
pub fn apply_boundary(body: Body, region: &Region) -> Option<Body> {
    region.contains(&body.position).then_some(body)
}

/// Reject time steps the integrator cannot use
pub fn validate_dt(dt: f64) -> Result<f64> {
    if !(dt.is_finite() && dt >= 0.0) {
        return Err(SimError::InvalidTimeStep { dt });
    }
    Ok(dt)
}

/// Integrate every present body of `universe` with its force from `forces`
/// and apply the boundary policy, producing the next snapshot.
///
/// `forces` must be aligned with `universe.bodies()`. Slot count is preserved.
pub fn explicit_step(universe: &Universe, forces: &[Option<NVec2>], dt: f64) -> Universe {
    debug_assert_eq!(universe.len(), forces.len());
    let region = universe.region();

    let bodies: Vec<Option<Body>> = universe
        .bodies()
        .iter()
        .zip(forces)
        .enumerate()
        .map(|(i, (slot, force))| {
            let (body, force) = ((*slot)?, (*force)?);
            let moved = integrate_body(&body, force, dt);
            let next = apply_boundary(moved, &region);
            if next.is_none() {
                let (x, y) = (moved.position.x, moved.position.y);
                warn!("body {i} left the region at ({x}, {y})");
            }
            next
        })
        .collect();

    Universe::from_validated(bodies, universe.width())
}
