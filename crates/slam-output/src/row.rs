//! Plain data row types written by output backends.

/// True and dead-reckoned pose of the agent at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow {
    pub tick:          u64,
    pub x:             f64,
    pub y:             f64,
    pub heading:       f64,
    pub est_x:         f64,
    pub est_y:         f64,
    pub est_heading:   f64,
    pub routine:       &'static str,
}

/// One ray contact as sensed at a snapshot tick (world coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRow {
    pub tick:     u64,
    pub ray:      u16,
    pub obstacle: u32,
    pub x:        f64,
    pub y:        f64,
    pub distance: f64,
}

/// One occupancy cell after a rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRow {
    pub tick:       u64,
    pub x:          i32,
    pub y:          i32,
    pub value:      f64,
    /// -1 obstacle, 0 uncertain, 1 open.
    pub confidence: i8,
}

/// One navigation graph node after a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRow {
    pub tick:       u64,
    pub node:       u32,
    pub x:          i32,
    pub y:          i32,
    pub confidence: i8,
}

/// One undirected navigation graph edge after a rebuild, `from < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRow {
    pub tick: u64,
    pub from: u32,
    pub to:   u32,
}
