//! Map-builder tuning constants.

use slam_core::{SlamError, SlamResult};

/// Parameters of belief-marker synthesis and grid accumulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    /// Evenly spaced samples taken along each ray (origin and end inclusive).
    pub samples_per_ray: usize,

    /// Spread radius of free-space markers.
    pub free_std: f64,

    /// Spread radius of occupied markers.
    pub occupied_std: f64,

    /// Number of points on the ring around a marker centre.
    pub ring_samples: usize,

    /// Fraction of the marker's mean deposited on each ring cell.
    pub ring_weight: f64,

    /// Value a cell holds when first touched.
    pub initial_cell_value: f64,

    /// Cells at or above this value are trusted as open.
    pub confidence_threshold: f64,
}

impl MapConfig {
    pub fn validate(&self) -> SlamResult<()> {
        if self.samples_per_ray == 0 {
            return Err(SlamError::Config("samples_per_ray must be > 0".into()));
        }
        if !(self.free_std >= 0.0 && self.occupied_std >= 0.0) {
            return Err(SlamError::Config("marker spread must be non-negative".into()));
        }
        if self.confidence_threshold <= 0.0 {
            return Err(SlamError::Config("confidence_threshold must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            samples_per_ray:      12,
            free_std:             1.0,
            occupied_std:         1.0,
            ring_samples:         8,
            ring_weight:          0.25,
            initial_cell_value:   0.1,
            confidence_threshold: 1.5,
        }
    }
}
