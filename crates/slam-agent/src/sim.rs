//! The `Sim` struct and its tick loop.

use slam_core::{SimConfig, Tick};
use slam_world::Environment;
use tracing::{info, warn};

use crate::{Agent, SimObserver, TickReport};

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// `config.total_ticks` ticks ran (or the requested `run_ticks` count).
    Completed,
    /// The body centre left the environment bounds.
    OutOfBounds,
    /// The body centre ended a tick inside an obstacle.
    InObstacle,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick:
///
/// 1. `on_tick_start`
/// 2. [`Agent::tick`]: routine selection, command, integration, scan, map
///    recording and, every `rebuild_interval_ticks`, a map and graph rebuild
/// 3. `on_routine_change` / `on_rebuild` for whatever the tick reported,
///    then `on_tick_end` and, at output intervals, `on_snapshot`
/// 4. termination check on the true body centre
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, seed, intervals).
    pub config: SimConfig,

    /// The static world.  Never mutated by the loop.
    pub environment: Environment,

    pub agent: Agent,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `config.end_tick()` or a termination predicate fires.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> Termination {
        info!(
            ticks = self.config.total_ticks,
            seed = self.config.seed,
            obstacles = self.environment.obstacles().len(),
            "simulation started"
        );
        let remaining = self.config.end_tick().0.saturating_sub(self.agent.tick_count().0);
        let termination = self.run_loop(remaining, observer);
        info!(
            ticks = self.agent.tick_count().0,
            ?termination,
            cells = self.agent.map().grid().len(),
            nodes = self.agent.planner().graph().node_count(),
            "simulation finished"
        );
        termination
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`),
    /// stopping early only on a termination predicate.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> Termination {
        self.run_loop(n, observer)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn run_loop<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> Termination {
        let mut termination = Termination::Completed;
        for _ in 0..n {
            let now = self.agent.tick_count();
            observer.on_tick_start(now);
            let report = self.agent.tick(&self.environment);
            self.notify(now, &report, observer);

            if let Some(t) = self.check_termination() {
                let p = self.agent.pose();
                warn!(tick = now.0, x = p.x, y = p.y, reason = ?t, "simulation terminated early");
                termination = t;
                break;
            }
        }
        observer.on_sim_end(self.agent.tick_count(), termination, &self.agent);
        termination
    }

    fn notify<O: SimObserver>(&self, now: Tick, report: &TickReport, observer: &mut O) {
        if let Some((from, to)) = report.switched {
            observer.on_routine_change(now, from, to);
        }
        if let Some(stats) = report.rebuild {
            observer.on_rebuild(now, stats, &self.agent);
        }
        observer.on_tick_end(now, report);
        if now.is_multiple_of(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &self.agent, &self.environment);
        }
    }

    /// Termination predicates, evaluated on the true body centre.
    pub fn check_termination(&self) -> Option<Termination> {
        let centre = self.agent.pose().position();
        if self.environment.out_of_bounds(centre) {
            Some(Termination::OutOfBounds)
        } else if self.environment.is_point_in_obstacle(centre) {
            Some(Termination::InObstacle)
        } else {
            None
        }
    }
}
