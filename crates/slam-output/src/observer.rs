//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use slam_agent::{Agent, RebuildStats, SimObserver, Termination};
use slam_core::Tick;
use slam_world::Environment;

use crate::row::{ContactRow, EdgeRow, GridRow, NodeRow, TrajectoryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes trajectory and contact rows at snapshot
/// ticks and grid and graph snapshots after every rebuild.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:      W,
    rebuilds:    usize,
    last_error:  Option<OutputError>,
    termination: Option<Termination>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rebuilds:    0,
            last_error:  None,
            termination: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Grid and graph snapshots written so far.
    pub fn rebuilds_written(&self) -> usize {
        self.rebuilds
    }

    /// How the observed run ended, once it has.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_snapshot(&mut self, tick: Tick, agent: &Agent, _env: &Environment) {
        let pose = agent.pose();
        let est = agent.map().estimated_pose();
        let row = TrajectoryRow {
            tick:        tick.0,
            x:           pose.x,
            y:           pose.y,
            heading:     pose.heading,
            est_x:       est.x,
            est_y:       est.y,
            est_heading: est.heading,
            routine:     agent.routine().name(),
        };
        let result = self.writer.write_trajectory(&row);
        self.store_err(result);

        let contacts: Vec<ContactRow> = agent
            .rays()
            .iter()
            .filter_map(|ray| ray.contact())
            .map(|c| ContactRow {
                tick:     tick.0,
                ray:      c.ray.0,
                obstacle: c.obstacle.0,
                x:        c.point.x,
                y:        c.point.y,
                distance: c.distance,
            })
            .collect();
        if !contacts.is_empty() {
            let result = self.writer.write_contacts(&contacts);
            self.store_err(result);
        }
    }

    fn on_rebuild(&mut self, tick: Tick, _stats: RebuildStats, agent: &Agent) {
        let grid: Vec<GridRow> = agent
            .map()
            .grid_points()
            .iter()
            .map(|p| GridRow {
                tick:       tick.0,
                x:          p.x(),
                y:          p.y(),
                value:      p.value,
                confidence: p.confidence().as_i8(),
            })
            .collect();
        let result = self.writer.write_grid(&grid);
        self.store_err(result);

        let graph = agent.planner().graph();
        let nodes: Vec<NodeRow> = graph
            .nodes
            .iter()
            .map(|n| NodeRow {
                tick:       tick.0,
                node:       n.id.0,
                x:          n.key.x,
                y:          n.key.y,
                confidence: n.confidence.as_i8(),
            })
            .collect();
        let edges: Vec<EdgeRow> = graph
            .edges()
            .map(|(from, to)| EdgeRow { tick: tick.0, from: from.0, to: to.0 })
            .collect();
        let result = self.writer.write_graph(&nodes, &edges);
        self.store_err(result);
        self.rebuilds += 1;
    }

    fn on_sim_end(&mut self, _final_tick: Tick, termination: Termination, _agent: &Agent) {
        self.termination = Some(termination);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
