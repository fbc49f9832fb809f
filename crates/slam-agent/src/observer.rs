//! Simulation observer trait for progress reporting and data collection.

use slam_behavior::RoutineKind;
use slam_core::Tick;
use slam_world::Environment;

use crate::{Agent, RebuildStats, Termination, TickReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: routine logger
///
/// ```rust,ignore
/// struct RoutineLog(Vec<(Tick, RoutineKind)>);
///
/// impl SimObserver for RoutineLog {
///     fn on_routine_change(&mut self, tick: Tick, _from: RoutineKind, to: RoutineKind) {
///         self.0.push((tick, to));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the agent completes the tick.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called when routine selection switches routines.
    fn on_routine_change(&mut self, _tick: Tick, _from: RoutineKind, _to: RoutineKind) {}

    /// Called after every map and graph rebuild, periodic or navigation
    /// triggered.
    fn on_rebuild(&mut self, _tick: Tick, _stats: RebuildStats, _agent: &Agent) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    fn on_snapshot(&mut self, _tick: Tick, _agent: &Agent, _env: &Environment) {}

    /// Called once after the loop stops, whatever the reason.
    fn on_sim_end(&mut self, _final_tick: Tick, _termination: Termination, _agent: &Agent) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
