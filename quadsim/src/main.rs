use quadsim::{Scenario, ScenarioConfig};
use quadsim::{bench_gravity, bench_steps, bench_steps_curve};
use quadsim::write_frames;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "2D Barnes-Hut n-body simulator")]
struct Args {
    /// Scenario file: a path, or a name under the crate's scenarios/ directory
    #[arg(short, default_value = "galaxy.yaml")]
    file_name: String,

    /// Where to write the sampled frames
    #[arg(short, default_value = "frames.yaml")]
    output: PathBuf,

    /// Run the force/step benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// resolve here to keep main clean
fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.bench {
        bench_gravity()?;
        bench_steps()?;
        bench_steps_curve()?;
        return Ok(());
    }

    let path = scenario_path(&args.file_name);
    let scenario_cfg = ScenarioConfig::from_path(&path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;

    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    info!("simulation running");
    let frames = scenario.run().context("simulation failed")?;

    info!("simulation done, writing frames");
    write_frames(&args.output, &frames)
        .with_context(|| format!("failed to write frames to {}", args.output.display()))?;

    Ok(())
}
