//! `slam-agent`: the simulated agent and the tick loop that drives it.
//!
//! # Tick cycle
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Select   : completed routine → Explore; while exploring the policy
//!                 may switch to Backtrack, SpinScan or NavigateToNode
//!                 (navigation first rebuilds the map and graph).
//!   ② Command  : the active routine produces (speed, omega) from the
//!                 previous scan and the map's estimated pose.
//!   ③ Move     : integrate the true pose: turn, then advance.  A step
//!                 that would carry the centre or sensor into an obstacle
//!                 keeps only its turn, or is cancelled.
//!   ④ Sense    : cast every ray from the sensor against the environment.
//!   ⑤ Record   : log the executed (speed, omega) and the new contacts.
//!   ⑥ Rebuild  : every rebuild_interval_ticks: replay the map, rebuild
//!                 the navigation graph.
//!   ⑦ Check    : stop if the body centre is out of bounds or inside an
//!                 obstacle.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`config`]   | `AgentConfig`, `AgentPatch`                                 |
//! | [`agent`]    | `Agent`, `TickReport`, `RebuildStats`, `AgentSnapshot`      |
//! | [`sim`]      | `Sim`, `Termination`                                        |
//! | [`builder`]  | `SimBuilder`                                                |
//! | [`observer`] | `SimObserver`, `NoopObserver`                               |
//! | [`error`]    | `SimError`, `SimResult`                                     |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Navigation graph construction on Rayon's thread pool.    |
//! | `fx-hash`  | Occupancy grid keyed through FxHash.                     |
//! | `serde`    | Configs and snapshots become (de)serializable.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use slam_agent::{NoopObserver, SimBuilder};
//! use slam_core::SimConfig;
//! use slam_world::Environment;
//!
//! let env = Environment::new(100.0, 100.0)?;
//! let mut sim = SimBuilder::new(SimConfig::default(), env).build()?;
//! let termination = sim.run(&mut NoopObserver);
//! ```

pub mod agent;
pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;


pub use agent::{Agent, AgentSnapshot, RaySnapshot, RebuildStats, TickReport};
pub use builder::SimBuilder;
pub use config::{AgentConfig, AgentPatch};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, Termination};
