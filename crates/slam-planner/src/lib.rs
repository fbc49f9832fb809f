//! `slam-planner`: navigation graph, routing, and frontier selection.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`graph`]   | `NavGraph` (CSR adjacency + R-tree), `NavNode`               |
//! | [`router`]  | `Router` trait, `Route`, `BreadthFirstRouter`                |
//! | [`planner`] | `Planner`, `PlannerConfig`                                   |
//! | [`error`]   | `PlannerError`, `PlannerResult<T>`                           |
//!
//! The graph is rebuilt wholesale from a grid snapshot on every planning
//! cycle.  Node ids are therefore only meaningful for the graph that issued
//! them.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Neighbour queries during graph construction run on Rayon.  |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public value types.   |

pub mod error;
pub mod graph;
pub mod planner;
pub mod router;


pub use error::{PlannerError, PlannerResult};
pub use graph::{NavGraph, NavNode};
pub use planner::{Planner, PlannerConfig};
pub use router::{BreadthFirstRouter, Route, Router};
