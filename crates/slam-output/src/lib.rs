//! `slam-output`: CSV export of a simulation run.
//!
//! | File              | Written            | Columns                                          |
//! |-------------------|--------------------|--------------------------------------------------|
//! | `trajectory.csv`  | every snapshot     | tick, true pose, estimated pose, routine         |
//! | `contacts.csv`    | every snapshot     | tick, ray, obstacle, hit point, distance         |
//! | `grid.csv`        | every rebuild      | tick, cell x/y, value, confidence                |
//! | `graph_nodes.csv` | every rebuild      | tick, node id, cell x/y, confidence              |
//! | `graph_edges.csv` | every rebuild      | tick, from, to                                   |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `slam_agent::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use slam_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ContactRow, EdgeRow, GridRow, NodeRow, TrajectoryRow};
pub use writer::OutputWriter;
