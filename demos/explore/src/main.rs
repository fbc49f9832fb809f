//! explore: one agent mapping a random obstacle field by dead reckoning.
//!
//! Usage: `explore [config.json]`
//!
//! The optional JSON file may set any of `sim`, `agent`, `world`, `spawn` and
//! `output_dir`; missing fields keep their defaults.  Log verbosity follows
//! `RUST_LOG` (default `info`).

mod world;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use slam_agent::{AgentConfig, SimBuilder};
use slam_core::{Pose, SimConfig, SimRng};
use slam_output::{CsvWriter, SimOutputObserver};

use world::{build_environment, WorldConfig};

/// Offset of the environment-generation stream from the master seed.
const WORLD_STREAM: u64 = 1;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:        SimConfig,
    agent:      AgentConfig,
    world:      WorldConfig,
    /// Defaults to the environment centre facing +x.
    spawn:      Option<Pose>,
    output_dir: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let arg = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(arg.as_deref())?;

    // 1. Environment.
    let spawn = config
        .spawn
        .unwrap_or_else(|| Pose::new(config.world.width / 2.0, config.world.height / 2.0, 0.0));
    let body = &config.agent;
    let clearance = (body.body_length / 2.0 + body.sensor_offset).max(body.body_length.hypot(body.body_width) / 2.0);
    let mut rng = SimRng::new(config.sim.seed);
    let env = build_environment(&config.world, spawn.position(), clearance, &mut rng.child(WORLD_STREAM))?;
    info!(
        width = env.width(),
        height = env.height(),
        obstacles = env.obstacles().len() - env.walls().len(),
        "environment generated"
    );

    // 2. Sim.
    let mut sim = SimBuilder::new(config.sim.clone(), env)
        .agent_config(config.agent.clone())
        .spawn(spawn)
        .build()?;

    // 3. Output.
    let out = config.output_dir.clone().unwrap_or_else(|| PathBuf::from("output/explore"));
    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;
    let writer = CsvWriter::new(&out)?;
    let mut obs = SimOutputObserver::new(writer);

    // 4. Run.
    let t0 = Instant::now();
    let termination = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        error!(error = %e, "output error");
    }

    // 5. Summary.
    let agent = &sim.agent;
    let truth = agent.pose();
    let estimate = agent.map().estimated_pose();
    info!(
        ?termination,
        ticks = agent.tick_count().0,
        secs = elapsed.as_secs_f64(),
        "run complete"
    );
    info!(
        cells = agent.map().grid().len(),
        nodes = agent.planner().graph().node_count(),
        edges = agent.planner().graph().edge_count(),
        contacts = agent.map().contacts().len(),
        snapshots = obs.rebuilds_written(),
        "map summary"
    );
    info!(
        true_pose = %truth,
        estimated_pose = %estimate,
        drift = truth.position().distance_to(estimate.position()),
        output = %out.display(),
        "final pose"
    );

    Ok(())
}
