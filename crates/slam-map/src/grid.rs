//! Discretised occupancy grid.
//!
//! Cells are keyed by integer coordinates obtained by rounding world
//! coordinates (`f64::round`, half away from zero).  A cell is created the
//! first time any marker touches it, holding
//! [`MapConfig::initial_cell_value`], and from then on only accumulates.
//! Cells are never removed.
//!
//! A marker deposits its full mean on the cell nearest its centre and
//! `mean × ring_weight` on each distinct cell hit by a ring of
//! `ring_samples` points at radius `std` around the centre.

use std::fmt;

use slam_core::{Point, Vector};

use crate::{Gaussian, MapConfig};

#[cfg(feature = "fx-hash")]
type CellMap = rustc_hash::FxHashMap<GridKey, f64>;
#[cfg(not(feature = "fx-hash"))]
type CellMap = std::collections::HashMap<GridKey, f64>;

// ── GridKey ───────────────────────────────────────────────────────────────────

/// Integer cell coordinate.  Orders by `x`, then `y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridKey {
    pub x: i32,
    pub y: i32,
}

impl GridKey {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell containing `point`.
    #[inline]
    pub fn from_point(point: Point) -> Self {
        Self { x: point.x.round() as i32, y: point.y.round() as i32 }
    }

    /// Cell centre in world coordinates.
    #[inline]
    pub fn point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

// ── Confidence ────────────────────────────────────────────────────────────────

/// Three-way classification of a cell's accumulated value.
///
/// | Value range              | Confidence  |
/// |--------------------------|-------------|
/// | `value < 0`              | `Obstacle`  |
/// | `0 ≤ value < threshold`  | `Uncertain` |
/// | `value ≥ threshold`      | `Open`      |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Confidence {
    Obstacle  = -1,
    Uncertain = 0,
    Open      = 1,
}

impl Confidence {
    pub fn from_value(value: f64, threshold: f64) -> Self {
        if value < 0.0 {
            Confidence::Obstacle
        } else if value < threshold {
            Confidence::Uncertain
        } else {
            Confidence::Open
        }
    }

    /// `-1`, `0` or `1`.
    #[inline]
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

// ── GridPoint ─────────────────────────────────────────────────────────────────

/// Snapshot of one grid cell.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub key:       GridKey,
    pub value:     f64,
    pub threshold: f64,
}

impl GridPoint {
    #[inline]
    pub fn x(&self) -> i32 {
        self.key.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.key.y
    }

    #[inline]
    pub fn point(&self) -> Point {
        self.key.point()
    }

    /// Derived from the current `value` on every call.
    #[inline]
    pub fn confidence(&self) -> Confidence {
        Confidence::from_value(self.value, self.threshold)
    }
}

// ── OccupancyGrid ─────────────────────────────────────────────────────────────

/// Sparse grid of accumulated belief values.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    cells:        CellMap,
    initial:      f64,
    threshold:    f64,
    ring_samples: usize,
    ring_weight:  f64,
}

impl OccupancyGrid {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            cells:        CellMap::default(),
            initial:      config.initial_cell_value,
            threshold:    config.confidence_threshold,
            ring_samples: config.ring_samples,
            ring_weight:  config.ring_weight,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Current value of a cell; `None` if nothing has touched it yet.
    pub fn value(&self, key: GridKey) -> Option<f64> {
        self.cells.get(&key).copied()
    }

    pub fn get(&self, key: GridKey) -> Option<GridPoint> {
        self.value(key).map(|value| GridPoint { key, value, threshold: self.threshold })
    }

    /// Add `delta` to a cell, creating it at the initial value first if needed.
    pub fn add(&mut self, key: GridKey, delta: f64) {
        *self.cells.entry(key).or_insert(self.initial) += delta;
    }

    /// Fold one resolved marker centred at `center` into the grid.
    pub fn deposit(&mut self, center: Point, marker: &Gaussian) {
        let centre_key = GridKey::from_point(center);
        self.add(centre_key, marker.mean);

        if self.ring_samples == 0 || marker.std <= 0.0 {
            return;
        }
        let ring_value = marker.mean * self.ring_weight;
        let step = 360.0 / self.ring_samples as f64;

        let mut ring: Vec<GridKey> = Vec::with_capacity(self.ring_samples);
        for k in 0..self.ring_samples {
            let key = GridKey::from_point(center + Vector::from_angle(k as f64 * step, marker.std));
            if key != centre_key && !ring.contains(&key) {
                ring.push(key);
            }
        }
        for key in ring {
            self.add(key, ring_value);
        }
    }

    /// Every cell, ordered by key.
    pub fn points(&self) -> Vec<GridPoint> {
        let mut points: Vec<GridPoint> = self
            .cells
            .iter()
            .map(|(&key, &value)| GridPoint { key, value, threshold: self.threshold })
            .collect();
        points.sort_unstable_by_key(|p| p.key);
        points
    }
}
