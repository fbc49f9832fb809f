//! CSV output backend.
//!
//! Creates five files in the configured output directory:
//! - `trajectory.csv`
//! - `contacts.csv`
//! - `grid.csv`
//! - `graph_nodes.csv`
//! - `graph_edges.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ContactRow, EdgeRow, GridRow, NodeRow, OutputResult, TrajectoryRow};

pub const TRAJECTORY_HEADER: [&str; 8] =
    ["tick", "x", "y", "heading", "est_x", "est_y", "est_heading", "routine"];
pub const CONTACTS_HEADER: [&str; 6] = ["tick", "ray", "obstacle", "x", "y", "distance"];
pub const GRID_HEADER: [&str; 5] = ["tick", "x", "y", "value", "confidence"];
pub const NODES_HEADER: [&str; 5] = ["tick", "node", "x", "y", "confidence"];
pub const EDGES_HEADER: [&str; 3] = ["tick", "from", "to"];

/// Writes simulation output to CSV files.
pub struct CsvWriter {
    trajectory: Writer<File>,
    contacts:   Writer<File>,
    grid:       Writer<File>,
    nodes:      Writer<File>,
    edges:      Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            trajectory: open(dir, "trajectory.csv", &TRAJECTORY_HEADER)?,
            contacts:   open(dir, "contacts.csv", &CONTACTS_HEADER)?,
            grid:       open(dir, "grid.csv", &GRID_HEADER)?,
            nodes:      open(dir, "graph_nodes.csv", &NODES_HEADER)?,
            edges:      open(dir, "graph_edges.csv", &EDGES_HEADER)?,
            finished:   false,
        })
    }
}

fn open(dir: &Path, name: &str, header: &[&str]) -> OutputResult<Writer<File>> {
    let mut w = Writer::from_path(dir.join(name))?;
    w.write_record(header)?;
    Ok(w)
}

impl OutputWriter for CsvWriter {
    fn write_trajectory(&mut self, row: &TrajectoryRow) -> OutputResult<()> {
        self.trajectory.write_record(&[
            row.tick.to_string(),
            row.x.to_string(),
            row.y.to_string(),
            row.heading.to_string(),
            row.est_x.to_string(),
            row.est_y.to_string(),
            row.est_heading.to_string(),
            row.routine.to_owned(),
        ])?;
        Ok(())
    }

    fn write_contacts(&mut self, rows: &[ContactRow]) -> OutputResult<()> {
        for row in rows {
            self.contacts.write_record(&[
                row.tick.to_string(),
                row.ray.to_string(),
                row.obstacle.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.distance.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_grid(&mut self, rows: &[GridRow]) -> OutputResult<()> {
        for row in rows {
            self.grid.write_record(&[
                row.tick.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.value.to_string(),
                row.confidence.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_graph(&mut self, nodes: &[NodeRow], edges: &[EdgeRow]) -> OutputResult<()> {
        for row in nodes {
            self.nodes.write_record(&[
                row.tick.to_string(),
                row.node.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.confidence.to_string(),
            ])?;
        }
        for row in edges {
            self.edges.write_record(&[row.tick.to_string(), row.from.to_string(), row.to.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trajectory.flush()?;
        self.contacts.flush()?;
        self.grid.flush()?;
        self.nodes.flush()?;
        self.edges.flush()?;
        Ok(())
    }
}
