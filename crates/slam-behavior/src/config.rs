//! Behavior tuning.

use slam_core::{SlamError, SlamResult};

/// Routine parameters and transition probabilities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    /// When `false` the agent explores forever; the policy always stays.
    pub switching: bool,

    /// Per-tick probability of a spin scan while any ray is touching.
    pub spin_scan_probability: f64,

    /// Per-tick probability of starting navigation while no ray is touching.
    pub navigate_probability: f64,

    /// Navigation is never started before this tick.
    pub min_ticks_before_navigate: u64,

    /// Length of a backtrack, in ticks.
    pub backtrack_steps: u32,

    /// Length of a spin scan, in ticks.  Each step turns `360 / spin_steps`.
    pub spin_steps: u32,

    /// Route nodes averaged into one steering correction.
    pub lookahead: usize,

    /// Half-width of the uniform jitter added to navigation steering, degrees.
    pub navigate_jitter: f64,

    /// Largest per-tick turn while navigating, degrees.
    pub max_navigate_turn: f64,

    /// Turns executed in place once the navigation target is reached.
    pub scan_sweep: Vec<f64>,
}

impl BehaviorConfig {
    pub fn validate(&self) -> SlamResult<()> {
        for (name, p) in [
            ("spin_scan_probability", self.spin_scan_probability),
            ("navigate_probability", self.navigate_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SlamError::Config(format!("{name} must lie in [0, 1], got {p}")));
            }
        }
        if self.backtrack_steps == 0 || self.spin_steps == 0 {
            return Err(SlamError::Config("routine step counts must be > 0".into()));
        }
        if self.lookahead == 0 {
            return Err(SlamError::Config("lookahead must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            switching:                 true,
            spin_scan_probability:     0.02,
            navigate_probability:      0.02,
            min_ticks_before_navigate: 150,
            backtrack_steps:           3,
            spin_steps:                20,
            lookahead:                 3,
            navigate_jitter:           5.0,
            max_navigate_turn:         45.0,
            scan_sweep:                vec![45.0, 45.0, -45.0, -45.0, -45.0, -45.0, 45.0, 45.0],
        }
    }
}
