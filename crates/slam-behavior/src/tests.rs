//! Unit tests for slam-behavior.

use slam_core::{Pose, Tick};
use slam_planner::Planner;

use crate::{Proximity, SenseContext};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SPEED: f64 = 0.5;
const COLLISION: f64 = 6.0;

fn make_context<'a>(proximity: &'a Proximity, planner: &'a Planner, pose: Pose) -> SenseContext<'a> {
    SenseContext {
        tick: Tick(0),
        proximity,
        estimated_pose: pose,
        planner,
        speed: SPEED,
        collision_distance: COLLISION,
    }
}

fn clear(n: usize) -> Proximity {
    Proximity { touching: vec![false; n], distance: COLLISION * 2.0 }
}

fn touching(flags: &[bool], distance: f64) -> Proximity {
    Proximity { touching: flags.to_vec(), distance }
}

// ── Proximity ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod proximity {
    use slam_core::{Point, Pose};
    use slam_world::{ray_fan, Obstacle};

    use super::COLLISION;
    use crate::Proximity;

    #[test]
    fn flags_rays_inside_collision_distance() {
        // Wall face at x = 5 in front of a sensor at the origin facing +x.
        let wall = Obstacle::new(Point::new(5.0, -20.0), 0.0, 1.0, 40.0, "wall");
        let mut rays = ray_fan(&[-40.0, 0.0, 40.0], 12.0);
        for ray in &mut rays {
            ray.scan(Pose::default(), std::slice::from_ref(&wall));
        }
        let p = Proximity::from_rays(&rays, COLLISION);
        // Centre ray hits at 5; edge rays at 5 / cos 40° ≈ 6.53.
        assert_eq!(p.touching, vec![false, true, false]);
        assert!((p.distance - 5.0).abs() < 1e-9);
        assert!(p.any() && !p.first() && !p.last());
    }

    #[test]
    fn no_contacts_defaults_to_twice_collision() {
        let mut rays = ray_fan(&[-40.0, 0.0, 40.0], 12.0);
        for ray in &mut rays {
            ray.scan(Pose::default(), &[]);
        }
        let p = Proximity::from_rays(&rays, COLLISION);
        assert!(!p.any());
        assert_eq!(p.distance, 12.0);
    }

    #[test]
    fn empty_fan() {
        let p = Proximity::from_rays(&[], COLLISION);
        assert!(!p.any() && !p.first() && !p.last());
    }
}

// ── Routines ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod explore {
    use slam_core::{Pose, SimRng};
    use slam_planner::Planner;

    use super::*;
    use crate::{Explore, MotionRoutine};

    fn run(p: &Proximity, seed: u64) -> Vec<crate::Command> {
        let planner = Planner::default();
        let ctx = make_context(p, &planner, Pose::default());
        let mut rng = SimRng::new(seed);
        let mut r = Explore;
        (0..200).map(|_| r.get_commands(&ctx, &mut rng)).collect()
    }

    #[test]
    fn free_space_jitters_at_full_speed() {
        for cmd in run(&clear(5), 1) {
            assert_eq!(cmd.speed, SPEED);
            assert!((-10.0..10.0).contains(&cmd.omega));
        }
    }

    #[test]
    fn first_ray_touching_turns_positive() {
        let p = touching(&[true, false, false, false, false], 4.0);
        for cmd in run(&p, 2) {
            assert_eq!(cmd.speed, SPEED);
            assert!((0.0..25.0).contains(&cmd.omega));
        }
    }

    #[test]
    fn last_ray_touching_turns_negative() {
        let p = touching(&[false, false, false, false, true], 4.0);
        for cmd in run(&p, 3) {
            assert!((-25.0..0.0).contains(&cmd.omega));
        }
    }

    #[test]
    fn other_contacts_slow_down() {
        let p = touching(&[false, false, true, false, false], 3.0);
        for cmd in run(&p, 4) {
            assert!((cmd.speed - SPEED * 0.5).abs() < 1e-12);
            assert!((-25.0..25.0).contains(&cmd.omega));
        }
        let both = touching(&[true, false, false, false, true], 1.5);
        for cmd in run(&both, 5) {
            assert!((cmd.speed - SPEED * 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn never_completes() {
        assert!(!Explore.completed());
    }
}

#[cfg(test)]
mod backtrack {
    use slam_core::{Pose, SimRng};
    use slam_planner::Planner;

    use super::*;
    use crate::{Backtrack, MotionRoutine};

    #[test]
    fn reverses_then_turns_away() {
        let planner = Planner::default();
        let p = clear(5);
        let ctx = make_context(&p, &planner, Pose::default());
        let mut rng = SimRng::new(11);
        let mut r = Backtrack::default();

        for _ in 0..2 {
            assert!(!r.completed());
            let cmd = r.get_commands(&ctx, &mut rng);
            assert_eq!(cmd.speed, -SPEED);
            assert_eq!(cmd.omega, 0.0);
        }
        assert!(!r.completed());
        let last = r.get_commands(&ctx, &mut rng);
        assert_eq!(last.speed, 0.0);
        assert!((120.0..240.0).contains(&last.omega));
        assert!(r.completed());
        assert_eq!(r.steps_taken(), 3);
    }
}

#[cfg(test)]
mod spin_scan {
    use slam_core::{Pose, SimRng};
    use slam_planner::Planner;

    use super::*;
    use crate::{MotionRoutine, SpinScan};

    #[test]
    fn full_turn_in_place() {
        let planner = Planner::default();
        let p = clear(5);
        let ctx = make_context(&p, &planner, Pose::default());
        let mut rng = SimRng::new(0);
        let mut r = SpinScan::default();
        let mut total = 0.0;
        for i in 0..20 {
            assert!(!r.completed(), "completed early at step {i}");
            let cmd = r.get_commands(&ctx, &mut rng);
            assert_eq!(cmd.speed, 0.0);
            assert!((cmd.omega - 18.0).abs() < 1e-12);
            total += cmd.omega;
        }
        assert!(r.completed());
        assert!((total - 360.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod navigate {
    use slam_core::{Pose, SimRng};
    use slam_map::{GridKey, GridPoint};
    use slam_planner::Planner;

    use super::*;
    use crate::{BehaviorConfig, Command, MotionRoutine, NavigatePhase, NavigateToNode};

    fn open_cell(x: i32, y: i32) -> GridPoint {
        GridPoint { key: GridKey::new(x, y), value: 2.0, threshold: 1.5 }
    }

    /// Open corridor from (0, 0) to (10, 0).
    fn corridor_cells() -> Vec<GridPoint> {
        (0..=10).map(|x| open_cell(x, 0)).collect()
    }

    fn corridor() -> Planner {
        let mut planner = Planner::default();
        planner.build(&corridor_cells());
        planner
    }

    const FAR_END: GridKey = GridKey { x: 10, y: 0 };

    #[test]
    fn routing_failure_interrupts() {
        let planner = Planner::default();
        let p = clear(5);
        let ctx = make_context(&p, &planner, Pose::default());
        let mut r = NavigateToNode::new(GridKey::new(0, 0), &BehaviorConfig::default());
        let cmd = r.get_commands(&ctx, &mut SimRng::new(0));
        assert_eq!(cmd, Command::stop());
        assert!(r.interrupted());
        assert!(r.completed());
    }

    #[test]
    fn touching_interrupts() {
        let planner = corridor();
        let p = touching(&[false, false, true, false, false], 3.0);
        let ctx = make_context(&p, &planner, Pose::default());
        let mut r = NavigateToNode::new(FAR_END, &BehaviorConfig::default());
        r.get_commands(&ctx, &mut SimRng::new(0));
        assert!(r.interrupted() && r.completed());
        assert_eq!(r.phase(), NavigatePhase::Navigate);
    }

    #[test]
    fn steers_along_route() {
        let planner = corridor();
        let p = clear(5);
        let config = BehaviorConfig::default();
        let mut rng = SimRng::new(3);

        // Already facing down the corridor: only jitter remains.
        let ctx = make_context(&p, &planner, Pose::new(0.0, 0.0, 0.0));
        let mut r = NavigateToNode::new(FAR_END, &config);
        let cmd = r.get_commands(&ctx, &mut rng);
        assert_eq!(cmd.speed, SPEED);
        assert!(cmd.omega.abs() <= config.navigate_jitter);
        assert!(!r.completed());

        // Facing +y: a right turn, clamped.
        let ctx = make_context(&p, &planner, Pose::new(0.0, 0.0, 90.0));
        let cmd = r.get_commands(&ctx, &mut rng);
        assert_eq!(cmd.omega, -config.max_navigate_turn);

        // Unwrapped heading is handled through bearing wrapping.
        let ctx = make_context(&p, &planner, Pose::new(0.0, 0.0, 720.0 + 2.0));
        let cmd = r.get_commands(&ctx, &mut rng);
        assert!((cmd.omega + 2.0).abs() <= config.navigate_jitter + 1e-9);
    }

    #[test]
    fn arrival_starts_sweep_then_completes() {
        let planner = corridor();
        let p = clear(5);
        let config = BehaviorConfig::default();
        let ctx = make_context(&p, &planner, Pose::new(9.6, 0.0, 0.0));
        let mut rng = SimRng::new(0);
        let mut r = NavigateToNode::new(FAR_END, &config);

        // Route (10,0) alone is shorter than lookahead + 1.
        assert_eq!(r.get_commands(&ctx, &mut rng), Command::stop());
        assert_eq!(r.phase(), NavigatePhase::Scan);
        assert!(!r.interrupted());

        let mut total = 0.0;
        for expected in &config.scan_sweep {
            assert!(!r.completed());
            let cmd = r.get_commands(&ctx, &mut rng);
            assert_eq!(cmd.speed, 0.0);
            assert_eq!(cmd.omega, *expected);
            total += cmd.omega;
        }
        assert!(r.completed());
        assert_eq!(total, 0.0, "sweep returns to the arrival heading");
    }

    #[test]
    fn target_cell_survives_a_rebuild() {
        let mut planner = corridor();
        let p = clear(5);
        let config = BehaviorConfig::default();
        let mut rng = SimRng::new(5);
        let mut r = NavigateToNode::new(FAR_END, &config);
        let old_id = planner.node_at(FAR_END).unwrap();

        // A branch west of the corridor sorts first and renumbers every node;
        // the old id of the far end now names a cell on the branch, due north.
        let mut cells = corridor_cells();
        cells.extend((0..=20).map(|y| open_cell(-1, y)));
        planner.build(&cells);
        assert_eq!(planner.node(old_id).unwrap().key.x, -1);

        let ctx = make_context(&p, &planner, Pose::new(0.0, 0.0, 0.0));
        let cmd = r.get_commands(&ctx, &mut rng);
        assert!(!r.interrupted());
        assert_eq!(r.target(), FAR_END);
        assert!(cmd.omega.abs() <= config.navigate_jitter, "still heading east, got {}", cmd.omega);
    }

    #[test]
    fn vanished_target_cell_interrupts() {
        let mut planner = corridor();
        let p = clear(5);
        let mut r = NavigateToNode::new(FAR_END, &BehaviorConfig::default());

        // Same corridor, one cell shorter.
        let shorter: Vec<_> = (0..10).map(|x| open_cell(x, 0)).collect();
        planner.build(&shorter);
        let ctx = make_context(&p, &planner, Pose::default());
        assert_eq!(r.get_commands(&ctx, &mut SimRng::new(0)), Command::stop());
        assert!(r.interrupted() && r.completed());
    }
}

#[cfg(test)]
mod routine_union {
    use slam_core::{Pose, SimRng};
    use slam_planner::Planner;

    use super::*;
    use crate::{Backtrack, MotionRoutine, Routine, RoutineKind, SpinScan};

    #[test]
    fn default_is_explore() {
        let r = Routine::default();
        assert!(r.is_explore());
        assert_eq!(r.kind(), RoutineKind::Explore);
        assert_eq!(r.name(), "exploration");
    }

    #[test]
    fn dispatch_reaches_variant() {
        let planner = Planner::default();
        let p = clear(5);
        let ctx = make_context(&p, &planner, Pose::default());
        let mut rng = SimRng::new(0);
        let mut r = Routine::SpinScan(SpinScan::new(2));
        assert_eq!(r.kind().to_string(), "spin scan");
        r.get_commands(&ctx, &mut rng);
        r.get_commands(&ctx, &mut rng);
        assert!(r.completed());

        let r = Routine::Backtrack(Backtrack::default());
        assert_eq!(r.name(), "back track");
        assert!(!r.completed());
    }
}

// ── Policy ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use slam_core::{SimRng, Tick};

    use super::*;
    use crate::{BehaviorConfig, BehaviorPolicy, Transition};

    fn always(config: BehaviorConfig) -> BehaviorPolicy {
        BehaviorPolicy::new(BehaviorConfig {
            spin_scan_probability: 1.0,
            navigate_probability: 1.0,
            ..config
        })
    }

    #[test]
    fn disabled_switching_always_stays() {
        let policy = always(BehaviorConfig { switching: false, ..BehaviorConfig::default() });
        let mut rng = SimRng::new(0);
        let p = touching(&[true, true, true, true, true], 0.1);
        assert_eq!(policy.decide(Tick(1000), &p, SPEED, &mut rng), Transition::Stay);
    }

    #[test]
    fn boxed_in_backtracks() {
        let policy = BehaviorPolicy::default();
        let mut rng = SimRng::new(0);
        let p = touching(&[true, false, false, false, true], 0.3);
        assert_eq!(policy.decide(Tick(0), &p, SPEED, &mut rng), Transition::Backtrack);

        // Both edges touching but still more than a step away.
        let policy = always(BehaviorConfig::default());
        let p = touching(&[true, false, false, false, true], 2.0);
        assert_eq!(policy.decide(Tick(0), &p, SPEED, &mut rng), Transition::SpinScan);
    }

    #[test]
    fn spin_scan_needs_contact() {
        let policy = always(BehaviorConfig::default());
        let mut rng = SimRng::new(0);
        let p = touching(&[false, false, true, false, false], 4.0);
        assert_eq!(policy.decide(Tick(0), &p, SPEED, &mut rng), Transition::SpinScan);
    }

    #[test]
    fn navigate_waits_for_min_ticks_and_clear_view() {
        let policy = always(BehaviorConfig::default());
        let mut rng = SimRng::new(0);
        let p = clear(5);
        assert_eq!(policy.decide(Tick(149), &p, SPEED, &mut rng), Transition::Stay);
        assert_eq!(policy.decide(Tick(150), &p, SPEED, &mut rng), Transition::Navigate);
    }

    #[test]
    fn zero_probabilities_stay() {
        let policy = BehaviorPolicy::new(BehaviorConfig {
            spin_scan_probability: 0.0,
            navigate_probability: 0.0,
            ..BehaviorConfig::default()
        });
        let mut rng = SimRng::new(0);
        for t in 0..500 {
            let p = if t % 2 == 0 { clear(5) } else { touching(&[false, true, false, false, false], 4.0) };
            assert_eq!(policy.decide(Tick(t), &p, SPEED, &mut rng), Transition::Stay);
        }
    }

    #[test]
    fn config_validation() {
        assert!(BehaviorConfig::default().validate().is_ok());
        let bad = BehaviorConfig { navigate_probability: 1.5, ..BehaviorConfig::default() };
        assert!(bad.validate().is_err());
    }
}
