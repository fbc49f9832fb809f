//! The `OutputWriter` trait implemented by backend writers.

use crate::{ContactRow, EdgeRow, GridRow, NodeRow, OutputResult, TrajectoryRow};

/// Sink for simulation output rows.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    fn write_trajectory(&mut self, row: &TrajectoryRow) -> OutputResult<()>;

    fn write_contacts(&mut self, rows: &[ContactRow]) -> OutputResult<()>;

    /// Write one occupancy grid snapshot.
    fn write_grid(&mut self, rows: &[GridRow]) -> OutputResult<()>;

    /// Write one navigation graph snapshot.
    fn write_graph(&mut self, nodes: &[NodeRow], edges: &[EdgeRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
