//! Per-tick odometry records and markers awaiting the next build.

use crate::Gaussian;

/// Everything the map keeps about one tick: the command that was executed
/// and, per ray, the hit distance or `None` for a miss.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickRecord {
    pub speed:        f64,
    pub omega:        f64,
    pub observations: Vec<Option<f64>>,
}

/// A marker queued against the record it was produced with.
///
/// `record` indexes [`Map::records`](crate::Map::records); the marker
/// resolves against the pose that record produced.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PendingMarker {
    pub record:   usize,
    pub gaussian: Gaussian,
}
