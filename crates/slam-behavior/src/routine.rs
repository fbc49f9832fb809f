//! Motion routines.
//!
//! | Routine          | Length                   | Output                                     |
//! |------------------|--------------------------|--------------------------------------------|
//! | `Explore`        | open-ended               | forward, steering away from touching rays  |
//! | `Backtrack`      | `n` steps (default 3)    | reverse `n-1` steps, then turn 120–240°    |
//! | `SpinScan`       | `n` steps (default 20)   | turn `360/n` in place each step            |
//! | `NavigateToNode` | until arrival + sweep    | steer along a planned route, then sweep    |
//!
//! Random draws are uniform over the bounds in the table above and in each
//! routine's docs, taken from the caller's `SimRng`.

use std::fmt;

use slam_core::{wrap_degrees, SimRng};
use slam_map::GridKey;
use tracing::debug;

use crate::{BehaviorConfig, Command, SenseContext};

/// Heading jitter while nothing is touching, degrees.
const EXPLORE_JITTER: f64 = 10.0;
/// Turn range once any ray touches, degrees.
const EXPLORE_TURN: f64 = 25.0;
/// Final-step turn range of a backtrack, degrees.
const BACKTRACK_TURN: (f64, f64) = (120.0, 240.0);

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Shared interface of every routine.
pub trait MotionRoutine {
    /// Produce this tick's command and advance internal progress.
    fn get_commands(&mut self, ctx: &SenseContext<'_>, rng: &mut SimRng) -> Command;

    /// `true` once the routine has nothing left to do.  Never true for
    /// open-ended routines.
    fn completed(&self) -> bool;
}

// ── Explore ───────────────────────────────────────────────────────────────────

/// Default wandering.
///
/// * nothing touching: turn `U(-10, 10)`
/// * only the first ray touching: turn `U(0, 25)` (away, counter-clockwise)
/// * only the last ray touching: turn `U(-25, 0)`
/// * anything else touching: turn `U(-25, 25)` and scale speed by
///   `closest / collision_distance`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Explore;

impl MotionRoutine for Explore {
    fn get_commands(&mut self, ctx: &SenseContext<'_>, rng: &mut SimRng) -> Command {
        let p = ctx.proximity;
        let mut speed = ctx.speed;
        let omega = match (p.first(), p.last()) {
            (true, false) => rng.uniform(0.0, EXPLORE_TURN),
            (false, true) => rng.uniform(-EXPLORE_TURN, 0.0),
            _ if p.any() => {
                speed = ctx.speed * (p.distance / ctx.collision_distance);
                rng.uniform(-EXPLORE_TURN, EXPLORE_TURN)
            }
            _ => rng.uniform(-EXPLORE_JITTER, EXPLORE_JITTER),
        };
        Command::new(speed, omega)
    }

    fn completed(&self) -> bool {
        false
    }
}

// ── Backtrack ─────────────────────────────────────────────────────────────────

/// Fixed-length recovery: reverse, then turn away.
#[derive(Clone, Debug, PartialEq)]
pub struct Backtrack {
    n_steps: u32,
    steps:   u32,
}

impl Backtrack {
    pub fn new(n_steps: u32) -> Self {
        Self { n_steps, steps: 0 }
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps
    }
}

impl Default for Backtrack {
    fn default() -> Self {
        Self::new(3)
    }
}

impl MotionRoutine for Backtrack {
    fn get_commands(&mut self, ctx: &SenseContext<'_>, rng: &mut SimRng) -> Command {
        let cmd = if self.steps + 1 < self.n_steps {
            Command::new(-ctx.speed, 0.0)
        } else {
            Command::turn(rng.uniform(BACKTRACK_TURN.0, BACKTRACK_TURN.1))
        };
        self.steps += 1;
        cmd
    }

    fn completed(&self) -> bool {
        self.steps >= self.n_steps
    }
}

// ── SpinScan ──────────────────────────────────────────────────────────────────

/// One full in-place rotation in `n_steps` equal increments.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinScan {
    n_steps: u32,
    steps:   u32,
}

impl SpinScan {
    pub fn new(n_steps: u32) -> Self {
        Self { n_steps, steps: 0 }
    }
}

impl Default for SpinScan {
    fn default() -> Self {
        Self::new(20)
    }
}

impl MotionRoutine for SpinScan {
    fn get_commands(&mut self, _ctx: &SenseContext<'_>, _rng: &mut SimRng) -> Command {
        self.steps += 1;
        Command::turn(360.0 / self.n_steps as f64)
    }

    fn completed(&self) -> bool {
        self.steps >= self.n_steps
    }
}

// ── NavigateToNode ────────────────────────────────────────────────────────────

/// Progress of a [`NavigateToNode`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavigatePhase {
    /// Following the route.
    Navigate,
    /// Arrived; executing the scan sweep.
    Scan,
}

/// Goal-directed travel to a grid cell followed by an in-place sweep.
///
/// The target is held as a [`GridKey`] and resolved against the planner's
/// current graph on every navigate tick, so a rebuild mid-route keeps the
/// same destination cell.  Every navigate tick re-plans from the map's
/// estimated position.  The
/// steering command is the mean wrapped bearing error towards the next
/// `lookahead` route nodes, plus `U(-jitter, jitter)`, clamped to
/// `±max_turn`.
///
/// The routine is interrupted (completed, no sweep) when any ray touches,
/// when the target cell is no longer a graph node, or when routing fails.  A route too short to supply `lookahead` nodes beyond
/// the start counts as arrival.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigateToNode {
    target:      GridKey,
    phase:       NavigatePhase,
    lookahead:   usize,
    jitter:      f64,
    max_turn:    f64,
    sweep:       Vec<f64>,
    sweep_index: usize,
    interrupted: bool,
}

impl NavigateToNode {
    pub fn new(target: GridKey, config: &BehaviorConfig) -> Self {
        Self {
            target,
            phase: NavigatePhase::Navigate,
            lookahead: config.lookahead.max(1),
            jitter: config.navigate_jitter,
            max_turn: config.max_navigate_turn,
            sweep: config.scan_sweep.clone(),
            sweep_index: 0,
            interrupted: false,
        }
    }

    #[inline]
    pub fn target(&self) -> GridKey {
        self.target
    }

    #[inline]
    pub fn phase(&self) -> NavigatePhase {
        self.phase
    }

    #[inline]
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    fn interrupt(&mut self, reason: &str) -> Command {
        debug!(target_cell = %self.target, reason, "navigation interrupted");
        self.interrupted = true;
        Command::stop()
    }

    fn navigate(&mut self, ctx: &SenseContext<'_>, rng: &mut SimRng) -> Command {
        if ctx.proximity.any() {
            return self.interrupt("obstacle within collision distance");
        }

        let Some(target) = ctx.planner.node_at(self.target) else {
            return self.interrupt("target cell is no longer a graph node");
        };
        let pose = ctx.estimated_pose;
        let route = match ctx.planner.plan_route(pose.position(), target) {
            Ok(route) => route,
            Err(e) => return self.interrupt(&e.to_string()),
        };
        if route.len() < self.lookahead + 1 {
            debug!(target_cell = %self.target, "navigation target reached");
            self.phase = NavigatePhase::Scan;
            return Command::stop();
        }

        let points = ctx.planner.route_points(&route);
        let correction = points[1..=self.lookahead]
            .iter()
            .map(|&p| wrap_degrees((p - pose.position()).angle() - pose.heading))
            .sum::<f64>()
            / self.lookahead as f64;
        let omega = (correction + rng.uniform(-self.jitter, self.jitter))
            .clamp(-self.max_turn, self.max_turn);

        Command::new(ctx.speed, omega)
    }

    fn scan(&mut self) -> Command {
        let omega = self.sweep.get(self.sweep_index).copied().unwrap_or(0.0);
        self.sweep_index += 1;
        Command::turn(omega)
    }
}

impl MotionRoutine for NavigateToNode {
    fn get_commands(&mut self, ctx: &SenseContext<'_>, rng: &mut SimRng) -> Command {
        if self.interrupted {
            return Command::stop();
        }
        match self.phase {
            NavigatePhase::Navigate => self.navigate(ctx, rng),
            NavigatePhase::Scan => self.scan(),
        }
    }

    fn completed(&self) -> bool {
        self.interrupted
            || (self.phase == NavigatePhase::Scan && self.sweep_index >= self.sweep.len())
    }
}

// ── Routine union ─────────────────────────────────────────────────────────────

/// Discriminant of a [`Routine`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoutineKind {
    Explore,
    Backtrack,
    SpinScan,
    NavigateToNode,
}

impl RoutineKind {
    pub fn name(self) -> &'static str {
        match self {
            RoutineKind::Explore        => "exploration",
            RoutineKind::Backtrack      => "back track",
            RoutineKind::SpinScan       => "spin scan",
            RoutineKind::NavigateToNode => "navigate to node",
        }
    }
}

impl fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The routine currently in control of an agent.
#[derive(Clone, Debug, PartialEq)]
pub enum Routine {
    Explore(Explore),
    Backtrack(Backtrack),
    SpinScan(SpinScan),
    NavigateToNode(NavigateToNode),
}

impl Routine {
    pub fn kind(&self) -> RoutineKind {
        match self {
            Routine::Explore(_)        => RoutineKind::Explore,
            Routine::Backtrack(_)      => RoutineKind::Backtrack,
            Routine::SpinScan(_)       => RoutineKind::SpinScan,
            Routine::NavigateToNode(_) => RoutineKind::NavigateToNode,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    #[inline]
    pub fn is_explore(&self) -> bool {
        matches!(self, Routine::Explore(_))
    }
}

impl Default for Routine {
    fn default() -> Self {
        Routine::Explore(Explore)
    }
}

impl MotionRoutine for Routine {
    fn get_commands(&mut self, ctx: &SenseContext<'_>, rng: &mut SimRng) -> Command {
        match self {
            Routine::Explore(r)        => r.get_commands(ctx, rng),
            Routine::Backtrack(r)      => r.get_commands(ctx, rng),
            Routine::SpinScan(r)       => r.get_commands(ctx, rng),
            Routine::NavigateToNode(r) => r.get_commands(ctx, rng),
        }
    }

    fn completed(&self) -> bool {
        match self {
            Routine::Explore(r)        => r.completed(),
            Routine::Backtrack(r)      => r.completed(),
            Routine::SpinScan(r)       => r.completed(),
            Routine::NavigateToNode(r) => r.completed(),
        }
    }
}
