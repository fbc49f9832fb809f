//! `slam-core`: foundational types for the 2D ray-casting SLAM simulator.
//!
//! This crate is a dependency of every other `slam-*` crate.  It has no
//! `slam-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`geometry`]    | `Point`, `Vector`, `Pose`, `Line`, `segments_intersection` |
//! | [`ids`]         | `ObstacleId`, `RayId`, `NodeId`                           |
//! | [`time`]        | `Tick`, `SimConfig`                                       |
//! | [`rng`]         | `SimRng` (seedable, explicit RNG handle)                  |
//! | [`error`]       | `SlamError`, `SlamResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geometry;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SlamError, SlamResult};
pub use geometry::{distance, segments_intersection, wrap_degrees, Line, Point, Pose, Vector};
pub use ids::{NodeId, ObstacleId, RayId};
pub use rng::SimRng;
pub use time::{SimConfig, Tick};
