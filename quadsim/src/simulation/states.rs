//! Core state types for the N-body simulation.
//!
//! Defines the 2D body and snapshot structs:
//! - `Body`     a point mass using `NVec2`
//! - `Universe` one immutable snapshot of every body slot plus the region width
//!
//! A `Universe` keeps a slot per body for the whole run. Bodies that leave the
//! simulation region become `None` and the slot is never reused, so index `i`
//! names the same body in every snapshot.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::simulation::error::{Result, SimError};
use crate::simulation::region::Region;

pub type NVec2 = Vector2<f64>;

/// Display color carried through the simulation untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const BLUE: Rgb = Rgb([0, 0, 255]);
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: NVec2,
    pub velocity: NVec2,
    pub acceleration: NVec2,
    pub mass: f64,   // must be > 0
    pub radius: f64, // display only
    pub color: Rgb,  // display only
}

impl Body {
    /// Body at rest with zero acceleration, white, zero radius.
    pub fn new(position: NVec2, mass: f64) -> Self {
        Self {
            position,
            velocity: NVec2::zeros(),
            acceleration: NVec2::zeros(),
            mass,
            radius: 0.0,
            color: Rgb::WHITE,
        }
    }

    pub fn with_velocity(mut self, velocity: NVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: NVec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn momentum(&self) -> NVec2 {
        self.velocity * self.mass
    }

    pub fn distance_to(&self, position: &NVec2) -> f64 {
        (self.position - position).norm()
    }

    /// Absorb `other` into this body without moving it.
    ///
    /// Masses add and the velocity becomes the plain mean of both velocities.
    /// This keeps coincident bodies from producing a zero-distance force; it is
    /// not a momentum-conserving collision.
    pub fn merge(&mut self, other: &Body) {
        self.mass += other.mass;
        self.velocity = (self.velocity + other.velocity) * 0.5;
    }

    /// Fold `other` into this body as a pseudo-mass: mass-weighted centroid,
    /// summed mass. Velocity is left alone.
    pub(crate) fn absorb_into_centroid(&mut self, other: &Body) {
        let total = self.mass + other.mass;
        self.position = (self.position * self.mass + other.position * other.mass) / total;
        self.mass = total;
    }
}

/// One snapshot of the simulated system.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    bodies: Vec<Option<Body>>,
    width: f64,
}

impl Universe {
    /// Validate and wrap an initial set of bodies.
    ///
    /// Every body must have a finite, strictly positive mass and the region
    /// width must be finite and positive.
    pub fn new(bodies: Vec<Body>, width: f64) -> Result<Self> {
        Self::from_slots(bodies.into_iter().map(Some).collect(), width)
    }

    /// Like [`Universe::new`] but keeps absent slots as given.
    pub fn from_slots(bodies: Vec<Option<Body>>, width: f64) -> Result<Self> {
        Region::new(0.0, 0.0, width)?;
        validate_masses(&bodies)?;
        Ok(Self { bodies, width })
    }

    /// Only the integrator builds snapshots this way; masses are carried over
    /// from an already validated snapshot.
    pub(crate) fn from_validated(bodies: Vec<Option<Body>>, width: f64) -> Self {
        Self { bodies, width }
    }

    pub fn bodies(&self) -> &[Option<Body>] {
        &self.bodies
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// The simulation region: origin at (0, 0), side `width`.
    pub fn region(&self) -> Region {
        Region {
            x: 0.0,
            y: 0.0,
            width: self.width,
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Body> {
        self.bodies.get(i).and_then(|b| b.as_ref())
    }

    /// Bodies still inside the region, with their slot index.
    pub fn present(&self) -> impl Iterator<Item = (usize, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.as_ref().map(|b| (i, b)))
    }

    pub fn present_count(&self) -> usize {
        self.bodies.iter().flatten().count()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().flatten().map(|b| b.mass).sum()
    }
}

pub(crate) fn validate_masses(bodies: &[Option<Body>]) -> Result<()> {
    for (index, body) in bodies.iter().enumerate() {
        if let Some(b) = body {
            if !(b.mass.is_finite() && b.mass > 0.0) {
                return Err(SimError::InvalidMass {
                    index,
                    mass: b.mass,
                });
            }
        }
    }
    Ok(())
}
