//! Numerical and physical parameters for a run
//!
//! `Parameters` holds runtime settings:
//! - number of steps, step size and region width,
//! - the gravitational constant `G` and the opening threshold `theta`,
//! - generator seed,
//! - frame sampling frequency and display radius scaling

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub steps: usize, // number of steps
    pub dt: f64, // step size (simulated seconds)
    pub width: f64, // side of the simulation square
    pub theta: f64, // Barnes–Hut opening threshold
    pub G: f64, // gravitational constant
    pub seed: u64, // deterministic seed for generated galaxies
    pub frequency: usize, // keep every `frequency`-th snapshot as a frame
    pub scaling_factor: f64, // display radius multiplier for frames
}
