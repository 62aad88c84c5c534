pub mod simulation;
pub mod configuration;
pub mod export;
pub mod benchmark;

pub use simulation::states::{Body, Universe, NVec2, Rgb};
pub use simulation::region::{Region, Quadrant};
pub use simulation::error::{SimError, Result};
pub use simulation::barnes_hut::{QuadTree, Node, NodeId, MAX_DEPTH};
pub use simulation::forces::{
    gravity_force, DirectGravity, ForceModel, TreeGravity, DEFAULT_THETA, GRAVITATIONAL_CONSTANT,
};
pub use simulation::integrator::{integrate_body, apply_boundary, explicit_step};
pub use simulation::engine::{Engine, Trajectory, step};
pub use simulation::scenario::Scenario;
pub use simulation::galaxy::{generate_galaxy, push_galaxy};

pub use configuration::config::{
    BodyConfig, EngineConfig, GalaxyConfig, ParametersConfig, ScenarioConfig,
};

pub use export::frames::{Frame, FrameBody, FrameRecorder, write_frames, read_frames};

pub use benchmark::benchmark::{bench_gravity, bench_steps, bench_steps_curve};
