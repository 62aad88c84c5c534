use std::time::Instant;

use log::info;

use crate::simulation::engine::Engine;
use crate::simulation::error::Result;
use crate::simulation::forces::{DirectGravity, ForceModel, TreeGravity};
use crate::simulation::states::{Body, NVec2, Universe};

const WIDTH: f64 = 20.0;
const G: f64 = 0.1;
const THETA: f64 = 0.7;

/// Helper to build a deterministic universe of size `n`, no rand needed
fn make_universe(n: usize) -> Result<Universe> {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec2::new(
                WIDTH / 2.0 + (i_f * 0.37).sin() * 5.0,
                WIDTH / 2.0 + (i_f * 0.13).cos() * 5.0,
            );
            Body::new(x, 1.0).with_radius(0.01)
        })
        .collect();

    Universe::new(bodies, WIDTH)
}

fn time_forces(model: &dyn ForceModel, universe: &Universe) -> Result<f64> {
    // Warm up
    model.net_forces(universe)?;

    let t0 = Instant::now();
    model.net_forces(universe)?;
    Ok(t0.elapsed().as_secs_f64())
}

/// Time one full force evaluation, direct vs Barnes–Hut, for growing N
pub fn bench_gravity() -> Result<()> {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let universe = make_universe(n)?;

        let direct = DirectGravity { G, parallel: false };
        let bh = TreeGravity {
            G,
            theta: THETA,
            parallel: false,
        };

        let dt_direct = time_forces(&direct, &universe)?;
        let dt_bh = time_forces(&bh, &universe)?;

        info!("N = {n:5}, direct = {:8.6} s, BH = {:8.6} s", dt_direct, dt_bh);
    }
    Ok(())
}

/// Time a few full engine steps per N, sequential vs parallel tree forces
pub fn bench_steps() -> Result<()> {
    let ns = [200, 400, 800, 1600, 3200, 6400, 12800];
    let steps = 2;

    for n in ns {
        let universe = make_universe(n)?;
        let mut per_step = [0.0; 2];

        for (slot, parallel) in [false, true].into_iter().enumerate() {
            let model = TreeGravity {
                G,
                theta: THETA,
                parallel,
            };
            let engine = Engine::new(model, 0.001)?;

            let t0 = Instant::now();
            engine.run(universe.clone(), steps)?;
            per_step[slot] = t0.elapsed().as_secs_f64() / steps as f64;
        }

        info!(
            "N = {:5}, sequential step = {:8.6} s, parallel step = {:8.6} s",
            n, per_step[0], per_step[1]
        );
    }
    Ok(())
}

/// Direct vs Barnes–Hut per-step time for n in 200..=12800
/// Paste output directly into a spreadsheet to graph
pub fn bench_steps_curve() -> Result<()> {
    println!("N,direct_ms,bh_ms");

    // Steps of 200 to give smoother graph
    for n in (200..=12800).step_by(200) {
        // Small n: average over a few steps to smooth noise
        // Large n: only 1 step to avoid minutes of runtime
        let steps_direct = if n <= 800 { 5 } else { 1 };
        let steps_bh = if n <= 2000 { 3 } else { 1 };

        let universe = make_universe(n)?;

        let direct = DirectGravity { G, parallel: false };
        let bh = TreeGravity {
            G,
            theta: THETA,
            parallel: false,
        };

        let engine_direct = Engine::new(direct, 0.001)?;
        let engine_bh = Engine::new(bh, 0.001)?;

        let t0 = Instant::now();
        engine_direct.run(universe.clone(), steps_direct)?;
        let ms_direct = t0.elapsed().as_secs_f64() * 1000.0 / steps_direct as f64;

        let t1 = Instant::now();
        engine_bh.run(universe, steps_bh)?;
        let ms_bh = t1.elapsed().as_secs_f64() * 1000.0 / steps_bh as f64;

        println!("{},{:.6},{:.6}", n, ms_direct, ms_bh);
    }
    Ok(())
}
