//! Routine-transition policy, evaluated once per tick while exploring.

use slam_core::{SimRng, Tick};

use crate::{BehaviorConfig, Proximity};

/// What the agent should switch to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Keep exploring.
    Stay,
    Backtrack,
    SpinScan,
    /// Rebuild the map and planner, then navigate to an uncertain node if
    /// one exists.
    Navigate,
}

/// Decides transitions out of `Explore`.
///
/// Rules, first match wins:
///
/// 1. first and last rays both touching and the closest touching distance
///    below one step (`speed`) → `Backtrack`
/// 2. any ray touching, with probability `spin_scan_probability` → `SpinScan`
/// 3. `tick ≥ min_ticks_before_navigate`, nothing touching, with probability
///    `navigate_probability` → `Navigate`
/// 4. otherwise `Stay`
///
/// Probability draws are made only when the rule's other conditions hold.
#[derive(Clone, Debug)]
pub struct BehaviorPolicy {
    config: BehaviorConfig,
}

impl BehaviorPolicy {
    pub fn new(config: BehaviorConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn decide(&self, tick: Tick, proximity: &Proximity, speed: f64, rng: &mut SimRng) -> Transition {
        if !self.config.switching {
            return Transition::Stay;
        }
        if proximity.first() && proximity.last() && proximity.distance < speed {
            return Transition::Backtrack;
        }
        let touching = proximity.any();
        if touching && rng.gen_bool(self.config.spin_scan_probability) {
            return Transition::SpinScan;
        }
        if !touching
            && tick.0 >= self.config.min_ticks_before_navigate
            && rng.gen_bool(self.config.navigate_probability)
        {
            return Transition::Navigate;
        }
        Transition::Stay
    }
}

impl Default for BehaviorPolicy {
    fn default() -> Self {
        Self::new(BehaviorConfig::default())
    }
}
