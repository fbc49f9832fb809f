//! Read-only inputs handed to a routine each tick.

use slam_core::{Pose, Tick};
use slam_planner::Planner;
use slam_world::Ray;

// ── Proximity ─────────────────────────────────────────────────────────────────

/// Which rays report an obstacle inside the collision distance, and how close
/// the nearest of those is.
#[derive(Clone, Debug, PartialEq)]
pub struct Proximity {
    /// One flag per ray, in fan order.
    pub touching: Vec<bool>,
    /// Closest touching distance; `2 × collision_distance` when none touch.
    pub distance: f64,
}

impl Proximity {
    pub fn from_rays(rays: &[Ray], collision_distance: f64) -> Self {
        let mut distance = collision_distance * 2.0;
        let touching = rays
            .iter()
            .map(|ray| match ray.contact() {
                Some(c) if c.distance < collision_distance => {
                    distance = distance.min(c.distance);
                    true
                }
                _ => false,
            })
            .collect();
        Self { touching, distance }
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.touching.iter().any(|&t| t)
    }

    /// First ray of the fan (most negative offset).
    #[inline]
    pub fn first(&self) -> bool {
        self.touching.first().copied().unwrap_or(false)
    }

    /// Last ray of the fan (most positive offset).
    #[inline]
    pub fn last(&self) -> bool {
        self.touching.last().copied().unwrap_or(false)
    }
}

// ── SenseContext ──────────────────────────────────────────────────────────────

/// Everything a routine may read while producing a command.
///
/// Built once per tick by the agent.  All borrows end before the agent
/// integrates the command, so routines can never observe a half-updated
/// agent.
pub struct SenseContext<'a> {
    pub tick: Tick,

    pub proximity: &'a Proximity,

    /// Dead-reckoned pose from the map.  Navigation steers by this, never by
    /// the true pose.
    pub estimated_pose: Pose,

    pub planner: &'a Planner,

    /// Nominal forward speed.
    pub speed: f64,

    pub collision_distance: f64,
}
