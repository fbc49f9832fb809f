//! The map builder: odometry log, marker queue, replay and grid fold.

use slam_core::{Point, Pose, Vector};
use slam_world::{Contact, Ray};
use tracing::debug;

use crate::{Gaussian, GridPoint, MapConfig, OccupancyGrid, PendingMarker, TickRecord};

/// Counters reported by [`Map::build`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Records replayed to reconstruct the trajectory.
    pub records: usize,
    /// Markers folded into the grid by this build.
    pub markers: usize,
    /// Grid cells after the build.
    pub cells:   usize,
}

/// Dead-reckoning occupancy map.
///
/// The map never sees the agent's true pose after construction.  It keeps the
/// commanded `(speed, omega)` of every tick, reconstructs the trajectory from
/// `start` by replaying them, and places belief markers relative to that
/// reconstruction.
///
/// Replay indexing: `trajectory()[0]` is `start` and record `i` produces
/// `trajectory()[i + 1]`.  Markers queued while recording `i` resolve against
/// `trajectory()[i + 1]`.
#[derive(Clone, Debug)]
pub struct Map {
    config:        MapConfig,
    sensor_offset: f64,
    start:         Pose,
    records:       Vec<TickRecord>,
    pending:       Vec<PendingMarker>,
    trajectory:    Vec<Pose>,
    estimate:      Pose,
    contacts:      Vec<Contact>,
    grid:          OccupancyGrid,
}

impl Map {
    /// `sensor_offset` is the distance from the body centre to the sensor
    /// along the heading.
    pub fn new(start: Pose, sensor_offset: f64, config: MapConfig) -> Self {
        let grid = OccupancyGrid::new(&config);
        Self {
            config,
            sensor_offset,
            start,
            records: Vec::new(),
            pending: Vec::new(),
            trajectory: vec![start],
            estimate: start,
            contacts: Vec::new(),
            grid,
        }
    }

    // ── Accumulate ────────────────────────────────────────────────────────

    /// Log one tick: the executed command and the current state of every
    /// ray, scanned from `sensor`.
    ///
    /// A ray with a contact yields free markers at sample distances strictly
    /// before the hit plus one occupied marker at the hit.  A ray without one
    /// yields free markers along its full length.
    ///
    /// Returns the index of the new record.
    pub fn record(&mut self, speed: f64, omega: f64, rays: &[Ray], sensor: Pose) -> usize {
        let index = self.records.len();
        let n = self.config.samples_per_ray;
        let mut observations = Vec::with_capacity(rays.len());

        for ray in rays {
            let offset = ray.offset();
            let hit = ray.contact().map(|c| c.distance);
            observations.push(hit);

            let limit = hit.unwrap_or(f64::INFINITY);
            for sample in ray.sample(sensor, n).take_while(|s| s.distance < limit) {
                self.pending.push(PendingMarker {
                    record:   index,
                    gaussian: Gaussian::free(self.config.free_std, sample.distance, offset),
                });
            }

            if let Some(contact) = ray.contact() {
                self.pending.push(PendingMarker {
                    record:   index,
                    gaussian: Gaussian::occupied(self.config.occupied_std, contact.distance, offset),
                });
                self.contacts.push(*contact);
            }
        }

        self.records.push(TickRecord { speed, omega, observations });
        self.estimate = self.estimate.integrate(speed, omega);
        index
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Replay every record from the start pose, resolve all queued markers
    /// and fold them into the grid.
    ///
    /// A no-op when nothing has been recorded.  Grid values are never reset;
    /// each marker is folded exactly once.
    pub fn build(&mut self) -> BuildStats {
        if self.records.is_empty() {
            return BuildStats { records: 0, markers: 0, cells: self.grid.len() };
        }

        self.trajectory = replay(self.start, &self.records);

        let markers = self.pending.len();
        for marker in self.pending.drain(..) {
            let pose = self.trajectory[marker.record + 1];
            let center = marker_position(pose, self.sensor_offset, &marker.gaussian);
            self.grid.deposit(center, &marker.gaussian);
        }

        let stats = BuildStats { records: self.records.len(), markers, cells: self.grid.len() };
        debug!(records = stats.records, markers = stats.markers, cells = stats.cells, "map rebuilt");
        stats
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Current dead-reckoned pose: the last pose a full replay would produce.
    #[inline]
    pub fn estimated_pose(&self) -> Pose {
        self.estimate
    }

    #[inline]
    pub fn start(&self) -> Pose {
        self.start
    }

    #[inline]
    pub fn sensor_offset(&self) -> f64 {
        self.sensor_offset
    }

    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    #[inline]
    pub fn records(&self) -> &[TickRecord] {
        &self.records
    }

    /// Markers recorded since the last build.
    #[inline]
    pub fn pending(&self) -> &[PendingMarker] {
        &self.pending
    }

    /// Trajectory reconstructed by the last build.
    #[inline]
    pub fn trajectory(&self) -> &[Pose] {
        &self.trajectory
    }

    /// Every contact forwarded so far, in world coordinates as sensed.
    #[inline]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Snapshot of every grid cell, ordered by key.
    pub fn grid_points(&self) -> Vec<GridPoint> {
        self.grid.points()
    }
}

/// Forward-Euler replay of a command log.  The result has one more pose than
/// there are records.
pub fn replay(start: Pose, records: &[TickRecord]) -> Vec<Pose> {
    let mut trajectory = Vec::with_capacity(records.len() + 1);
    trajectory.push(start);
    let mut pose = start;
    for r in records {
        pose = pose.integrate(r.speed, r.omega);
        trajectory.push(pose);
    }
    trajectory
}

/// World position of a marker observed from body pose `pose`.
#[inline]
pub fn marker_position(pose: Pose, sensor_offset: f64, marker: &Gaussian) -> Point {
    pose.forward(sensor_offset) + Vector::from_angle(pose.heading + marker.angle_offset, marker.distance)
}
