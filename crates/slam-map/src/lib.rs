//! `slam-map`: occupancy mapping from dead-reckoned odometry.
//!
//! The map runs a two-state cycle over ticks:
//!
//! ```text
//! every tick:   record(speed, omega, rays)   → TickRecord + queued Gaussians
//! on demand:    build()                      → replay odometry from the start,
//!                                              resolve queued Gaussians to
//!                                              world points, fold into grid
//! ```
//!
//! Only the odometry the agent reports is integrated; nothing corrects the estimate against
//! sensed landmarks, so drift compounds over a run.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`config`]   | `MapConfig` (marker spread, ring weighting, thresholds)  |
//! | [`gaussian`] | `Gaussian` belief marker                                  |
//! | [`record`]   | `TickRecord`, `PendingMarker`                             |
//! | [`grid`]     | `GridKey`, `GridPoint`, `Confidence`, `OccupancyGrid`     |
//! | [`map`]      | `Map`, `BuildStats`                                       |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | Occupancy grid uses `rustc_hash::FxHashMap`.              |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public value types.  |

pub mod config;
pub mod gaussian;
pub mod grid;
pub mod map;
pub mod record;


pub use config::MapConfig;
pub use gaussian::Gaussian;
pub use grid::{Confidence, GridKey, GridPoint, OccupancyGrid};
pub use map::{marker_position, replay, BuildStats, Map};
pub use record::{PendingMarker, TickRecord};
