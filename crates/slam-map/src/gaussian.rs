//! Signed belief markers.

/// Evidence that a point along a ray is free (`mean = +1`) or occupied
/// (`mean = -1`).
///
/// A marker is expressed relative to the sensor: `distance` along a ray whose
/// absolute angle is the agent heading plus `angle_offset`.  It has no world
/// position until the map build resolves it against the reconstructed pose of
/// the tick it was recorded on.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gaussian {
    pub mean:         f64,
    pub std:          f64,
    pub distance:     f64,
    pub angle_offset: f64,
}

impl Gaussian {
    pub fn free(std: f64, distance: f64, angle_offset: f64) -> Self {
        Self { mean: 1.0, std, distance, angle_offset }
    }

    pub fn occupied(std: f64, distance: f64, angle_offset: f64) -> Self {
        Self { mean: -1.0, std, distance, angle_offset }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.mean > 0.0
    }
}
