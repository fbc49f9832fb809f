//! Agent configuration and the explicit field-by-field patch.

use slam_behavior::BehaviorConfig;
use slam_map::MapConfig;
use slam_planner::PlannerConfig;

use crate::{SimError, SimResult};

/// Physical and sensing parameters of the agent, plus the configuration of
/// the subsystems it owns.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    /// Nominal forward speed, world units per tick.
    pub speed: f64,

    /// Rays reporting a contact closer than this count as touching.
    pub collision_distance: f64,

    /// Angular offsets of the ray fan from the heading, degrees, ascending.
    pub ray_offsets: Vec<f64>,

    pub ray_length: f64,

    /// Distance from the body centre to the sensor along the heading.
    pub sensor_offset: f64,

    /// Body extent across the heading.
    pub body_width: f64,

    /// Body extent along the heading.
    pub body_length: f64,

    pub behavior: BehaviorConfig,
    pub map:      MapConfig,
    pub planner:  PlannerConfig,
}

impl AgentConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.ray_offsets.is_empty() {
            return Err(SimError::Config("ray fan must contain at least one ray".into()));
        }
        if self.ray_offsets.len() > u16::MAX as usize {
            return Err(SimError::Config(format!("too many rays: {}", self.ray_offsets.len())));
        }
        if !(self.ray_length > 0.0) {
            return Err(SimError::Config("ray_length must be > 0".into()));
        }
        if !(self.speed >= 0.0) {
            return Err(SimError::Config("speed must be non-negative".into()));
        }
        if !(self.collision_distance > 0.0) {
            return Err(SimError::Config("collision_distance must be > 0".into()));
        }
        self.behavior.validate()?;
        self.map.validate()?;
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            speed:              0.5,
            collision_distance: 6.0,
            ray_offsets:        vec![-40.0, -20.0, 0.0, 20.0, 40.0],
            ray_length:         12.0,
            sensor_offset:      2.0,
            body_width:         3.0,
            body_length:        4.0,
            behavior:           BehaviorConfig::default(),
            map:                MapConfig::default(),
            planner:            PlannerConfig::default(),
        }
    }
}

/// Explicit update of selected agent fields.  `None` leaves a field as is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentPatch {
    pub x:                  Option<f64>,
    pub y:                  Option<f64>,
    pub heading:            Option<f64>,
    pub speed:              Option<f64>,
    pub collision_distance: Option<f64>,
}

impl AgentPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `true` if the patch moves or turns the agent.
    pub fn touches_pose(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.heading.is_some()
    }
}
