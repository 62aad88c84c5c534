//! Initial-condition generators.
//!
//! A galaxy is a ring of solar-mass stars around a central black hole. Each
//! star gets a tangential velocity of half the circular orbital speed around
//! the black hole, which keeps the disk bound without flinging stars out on
//! the first steps.

use std::f64::consts::PI;

use rand::Rng;

use crate::simulation::states::{Body, NVec2, Rgb};

pub const SOLAR_MASS: f64 = 1.989e30; // kg
pub const SOLAR_RADIUS: f64 = 696_340_000.0; // m
pub const BLACK_HOLE_MASS: f64 = 4.0e6 * SOLAR_MASS; // kg, roughly Sagittarius A*

/// Generate `num_stars` stars in a disk of radius `radius` around `center`,
/// followed by the central black hole as the last body.
///
/// Star distances are uniform in `[radius / 2, radius)` and angles uniform in
/// `[0, 2π)`. Orbital speeds use `g`, which must be the constant the engine
/// steps with.
pub fn generate_galaxy<R: Rng + ?Sized>(
    num_stars: usize,
    radius: f64,
    center: NVec2,
    g: f64,
    rng: &mut R,
) -> Vec<Body> {
    let mut bodies = Vec::with_capacity(num_stars + 1);

    for _ in 0..num_stars {
        let dist = radius * (rng.gen::<f64>() + 1.0) / 2.0;
        let angle = rng.gen::<f64>() * 2.0 * PI;

        let position = center + NVec2::new(angle.cos(), angle.sin()) * dist;

        // half of the circular orbital speed around the black hole
        let speed = 0.5 * (g * BLACK_HOLE_MASS / dist).sqrt();
        let tangent = angle + PI / 2.0;
        let velocity = NVec2::new(tangent.cos(), tangent.sin()) * speed;

        bodies.push(
            Body::new(position, SOLAR_MASS)
                .with_velocity(velocity)
                .with_radius(SOLAR_RADIUS)
                .with_color(Rgb::WHITE),
        );
    }

    // ten solar radii so it stands out once rendered
    bodies.push(
        Body::new(center, BLACK_HOLE_MASS)
            .with_radius(10.0 * SOLAR_RADIUS)
            .with_color(Rgb::BLUE),
    );

    bodies
}

/// Add `velocity` to every body, e.g. to send two galaxies toward each other.
pub fn push_galaxy(bodies: &mut [Body], velocity: NVec2) {
    for b in bodies.iter_mut() {
        b.velocity += velocity;
    }
}
