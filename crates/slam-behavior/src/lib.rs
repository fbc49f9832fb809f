//! `slam-behavior`: motion routines and the policy that switches them.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`command`]  | `Command`: one tick's `(speed, omega)` motor output           |
//! | [`context`]  | `SenseContext<'a>`, `Proximity`: read-only per-tick inputs    |
//! | [`routine`]  | `MotionRoutine` trait, `Explore`, `Backtrack`, `SpinScan`,     |
//! |              | `NavigateToNode`, the `Routine` union and `RoutineKind`        |
//! | [`policy`]   | `BehaviorPolicy`, `Transition`                                 |
//! | [`config`]   | `BehaviorConfig`                                               |
//!
//! # Design notes
//!
//! The active routine is one owned [`Routine`] value held by the agent and
//! replaced wholesale on every transition.  Routines never touch the agent:
//! they read a [`SenseContext`] built fresh each tick and draw randomness
//! from the `SimRng` handle passed alongside it.
//!
//! Transitions are decided by [`BehaviorPolicy`] only while exploring.  Any
//! other routine runs until its `completed()` predicate turns true, after
//! which the agent returns to exploring.

pub mod command;
pub mod config;
pub mod context;
pub mod policy;
pub mod routine;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use config::BehaviorConfig;
pub use context::{Proximity, SenseContext};
pub use policy::{BehaviorPolicy, Transition};
pub use routine::{
    Backtrack, Explore, MotionRoutine, NavigateToNode, NavigatePhase, Routine, RoutineKind, SpinScan,
};
