//! Unit tests for slam-world.
//!
//! All tests use hand-placed obstacles so expected distances can be derived
//! analytically.

#[cfg(test)]
mod obstacles {
    use slam_core::{Point, SimRng, Vector};

    use crate::{Corner, Edge, Obstacle};

    #[test]
    fn axis_aligned_corners() {
        let o = Obstacle::new(Point::new(1.0, 2.0), 0.0, 4.0, 3.0, "box");
        assert_eq!(o.corner(Corner::A), Point::new(1.0, 2.0));
        assert_eq!(o.corner(Corner::B), Point::new(1.0, 5.0));
        assert_eq!(o.corner(Corner::C), Point::new(5.0, 5.0));
        assert_eq!(o.corner(Corner::D), Point::new(5.0, 2.0));
        assert_eq!(o.center(), Point::new(3.0, 3.5));
        assert!((o.size() - 5.0).abs() < 1e-12);
        assert!((o.area() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn edges_close_the_polygon() {
        let o = Obstacle::new(Point::new(0.0, 0.0), 33.0, 5.0, 2.0, "r");
        let edges: Vec<_> = o.edges().collect();
        assert_eq!(edges.len(), 4);
        for w in 0..4 {
            let (_, _, end) = edges[w];
            let (_, start, _) = edges[(w + 1) % 4];
            assert_eq!(end, start);
        }
        assert_eq!(o.edge(Edge::DA).1, o.corner(Corner::A));
    }

    #[test]
    fn rotated_corners() {
        let o = Obstacle::new(Point::new(0.0, 0.0), 90.0, 2.0, 1.0, "r");
        // D = (w, 0) rotated 90° → (0, w).
        let d = o.corner(Corner::D);
        assert!(d.x.abs() < 1e-12 && (d.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn contains_interior_points() {
        let mut rng = SimRng::new(7);
        for angle in [0.0, 20.0, 45.0, 137.0, 300.0] {
            let o = Obstacle::new(Point::new(30.0, 30.0), angle, 5.0, 10.0, "test");
            for _ in 0..200 {
                let u = rng.uniform(0.01, 4.99);
                let v = rng.uniform(0.01, 9.99);
                let p = o.pivot() + Vector::new(u, v).rotate(angle);
                assert!(o.contains(p), "angle {angle}: {p} should be inside");
            }
        }
    }

    #[test]
    fn rejects_points_outside_bounding_circle() {
        let o = Obstacle::new(Point::new(30.0, 30.0), 20.0, 5.0, 10.0, "test");
        for deg in (0..360).step_by(15) {
            let p = o.center() + Vector::from_angle(deg as f64, o.size() + 0.5);
            assert!(!o.contains(p));
        }
    }

    #[test]
    fn contains_agrees_with_edges() {
        // Points just across each edge midpoint, inward vs outward.
        let o = Obstacle::new(Point::new(10.0, 10.0), 20.0, 6.0, 4.0, "r");
        for (_, a, b) in o.edges() {
            let mid = a.lerp(b, 0.5);
            let inward = (o.center() - mid) * 0.01;
            assert!(o.contains(mid + inward));
            assert!(!o.contains(mid - inward));
        }
    }
}

#[cfg(test)]
mod environment {
    use slam_core::{Point, SimRng};

    use crate::{Environment, Obstacle, WorldError, WALL_THICKNESS};

    #[test]
    fn walls_always_present() {
        let env = Environment::new(60.0, 60.0).unwrap();
        assert_eq!(env.obstacles().len(), 4);
        let names: Vec<_> = env.walls().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["south", "east", "north", "west"]);
    }

    #[test]
    fn invalid_bounds_rejected() {
        assert!(matches!(
            Environment::new(0.0, 10.0),
            Err(WorldError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn walls_frame_the_bounds() {
        let env = Environment::new(60.0, 40.0).unwrap();
        let h = WALL_THICKNESS / 2.0;
        assert!(env.is_point_in_obstacle(Point::new(30.0, -h)));
        assert!(env.is_point_in_obstacle(Point::new(30.0, 40.0 + h)));
        assert!(env.is_point_in_obstacle(Point::new(-h, 20.0)));
        assert!(env.is_point_in_obstacle(Point::new(60.0 + h, 20.0)));
        // Corners are covered too.
        assert!(env.is_point_in_obstacle(Point::new(-h, -h)));
        assert!(env.is_point_in_obstacle(Point::new(60.0 + h, 40.0 + h)));
        assert!(!env.is_point_in_obstacle(Point::new(30.0, 20.0)));
    }

    #[test]
    fn out_of_bounds() {
        let env = Environment::new(60.0, 40.0).unwrap();
        assert!(!env.out_of_bounds(Point::new(0.0, 0.0)));
        assert!(!env.out_of_bounds(Point::new(60.0, 40.0)));
        assert!(env.out_of_bounds(Point::new(-0.1, 10.0)));
        assert!(env.out_of_bounds(Point::new(10.0, 40.1)));
    }

    #[test]
    fn added_obstacles_follow_walls() {
        let mut env = Environment::new(60.0, 60.0).unwrap();
        let id = env.add_obstacle(Obstacle::new(Point::new(20.0, 20.0), 0.0, 40.0, 40.0, "box"));
        assert_eq!(id.index(), 4);
        assert_eq!(env.obstacle(id).unwrap().name, "box");
        assert!(env.is_point_in_obstacle(Point::new(40.0, 40.0)));
    }

    #[test]
    fn random_point_is_free() {
        let env = Environment::with_obstacles(
            60.0,
            60.0,
            [Obstacle::new(Point::new(5.0, 5.0), 0.0, 50.0, 50.0, "big")],
        )
        .unwrap();
        let mut rng = SimRng::new(3);
        for _ in 0..50 {
            let p = env.random_point(&mut rng).unwrap();
            assert!(!env.is_point_in_obstacle(p));
            assert!(!env.out_of_bounds(p));
        }
    }

    #[test]
    fn walls_block_every_exit() {
        let env = Environment::new(60.0, 60.0).unwrap();
        assert!(!env.blocks_motion(Point::new(30.0, 30.0), Point::new(30.5, 30.0)));
        assert!(env.blocks_motion(Point::new(59.9, 30.0), Point::new(60.4, 30.0)));
        assert!(env.blocks_motion(Point::new(30.0, 0.2), Point::new(30.1, -0.3)));
        // Through the corner where two walls meet.
        assert!(env.blocks_motion(Point::new(0.1, 0.1), Point::new(-0.2, -0.2)));
        // Stopping exactly on the boundary counts as running into the wall.
        assert!(env.blocks_motion(Point::new(0.5, 10.0), Point::new(0.0, 10.0)));
    }

    #[test]
    fn thin_obstacles_cannot_be_stepped_over() {
        let slab = Obstacle::new(Point::new(10.0, 0.0), 0.0, 0.2, 20.0, "slab");
        let env = Environment::with_obstacles(60.0, 60.0, [slab]).unwrap();
        let (from, to) = (Point::new(9.8, 5.0), Point::new(10.4, 5.0));
        assert!(!env.is_point_in_obstacle(to));
        assert!(env.blocks_motion(from, to));
        assert!(!env.blocks_motion(Point::new(9.8, 25.0), Point::new(10.4, 25.0)));
    }

    #[test]
    fn leaving_an_obstacle_is_free() {
        let block = Obstacle::new(Point::new(20.0, 20.0), 0.0, 20.0, 20.0, "block");
        let env = Environment::with_obstacles(60.0, 60.0, [block]).unwrap();
        assert!(!env.blocks_motion(Point::new(30.0, 30.0), Point::new(30.5, 30.0)));
        assert!(!env.blocks_motion(Point::new(39.9, 30.0), Point::new(40.4, 30.0)));
        assert!(env.blocks_motion(Point::new(40.4, 30.0), Point::new(39.9, 30.0)));
    }

    #[test]
    fn random_point_gives_up_when_covered() {
        let env = Environment::with_obstacles(
            10.0,
            10.0,
            [Obstacle::new(Point::new(-1.0, -1.0), 0.0, 12.0, 12.0, "all")],
        )
        .unwrap();
        let mut rng = SimRng::new(3);
        assert!(matches!(env.random_point(&mut rng), Err(WorldError::NoFreeSpace { .. })));
    }
}

#[cfg(test)]
mod rays {
    use slam_core::{ObstacleId, Point, Pose, RayId};

    use crate::{ray_fan, Environment, Obstacle, Ray};

    #[test]
    fn no_obstacles_no_contact() {
        let mut ray = Ray::new(RayId(0), 0.0, 12.0);
        for heading in [0.0, 45.0, 90.0, 270.0] {
            assert!(ray.scan(Pose::new(5.0, 5.0, heading), &[]).is_none());
            assert!(ray.contact().is_none());
        }
    }

    #[test]
    fn perpendicular_hit_on_edge_centre() {
        // Edge AB of this box is the segment x = 10, y ∈ [0, 10].
        let wall = Obstacle::new(Point::new(10.0, 0.0), 0.0, 2.0, 10.0, "w");
        let ray = Ray::new(RayId(0), 0.0, 12.0);
        let c = ray.cast(Pose::new(3.0, 5.0, 0.0), std::slice::from_ref(&wall)).unwrap();
        assert!((c.distance - 7.0).abs() < 1e-6, "got {}", c.distance);
        assert!((c.point.x - 10.0).abs() < 1e-6 && (c.point.y - 5.0).abs() < 1e-6);
        assert_eq!(c.obstacle, ObstacleId(0));
        // Straight ahead in the sensor frame.
        assert!((c.egocentric.x - 7.0).abs() < 1e-6 && c.egocentric.y.abs() < 1e-6);
    }

    #[test]
    fn out_of_range_is_no_contact() {
        let wall = Obstacle::new(Point::new(20.0, 0.0), 0.0, 2.0, 10.0, "w");
        let ray = Ray::new(RayId(0), 0.0, 12.0);
        assert!(ray.cast(Pose::new(3.0, 5.0, 0.0), &[wall]).is_none());
    }

    #[test]
    fn nearest_obstacle_wins() {
        let near = Obstacle::new(Point::new(8.0, 0.0), 0.0, 1.0, 10.0, "near");
        let far = Obstacle::new(Point::new(11.0, 0.0), 0.0, 1.0, 10.0, "far");
        let ray = Ray::new(RayId(0), 0.0, 12.0);
        let c = ray.cast(Pose::new(3.0, 5.0, 0.0), &[far, near]).unwrap();
        assert_eq!(c.obstacle, ObstacleId(1));
        assert!((c.distance - 5.0).abs() < 1e-9);
    }

    #[test]
    fn offset_rotates_ray() {
        let wall = Obstacle::new(Point::new(0.0, 10.0), 0.0, 10.0, 1.0, "top");
        let ray = Ray::new(RayId(0), 90.0, 12.0);
        let c = ray.cast(Pose::new(5.0, 5.0, 0.0), &[wall]).unwrap();
        assert!((c.distance - 5.0).abs() < 1e-9);
        // Hit lies to the agent's left: egocentric +y.
        assert!(c.egocentric.x.abs() < 1e-9 && (c.egocentric.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn walls_stop_every_ray() {
        let env = Environment::new(20.0, 20.0).unwrap();
        let pose = Pose::new(10.0, 10.0, 0.0);
        for deg in (0..360).step_by(10) {
            let ray = Ray::new(RayId(0), deg as f64, 30.0);
            let c = ray.cast(pose, env.obstacles()).expect("wall hit");
            assert!(c.distance <= 10.0 * 2f64.sqrt() + 1e-6);
        }
    }

    #[test]
    fn scenario_geometry_from_body_centre() {
        let obstacle = Obstacle::new(Point::new(30.0, 30.0), 20.0, 5.0, 10.0, "test");
        let env = Environment::with_obstacles(60.0, 60.0, [obstacle]).unwrap();
        let sensor = Pose::new(30.0, 25.0, 90.0);
        let rays = ray_fan(&[-40.0, -20.0, 0.0, 20.0, 40.0], 12.0);
        let hits: Vec<_> = rays.iter().map(|r| r.cast(sensor, env.obstacles())).collect();
        let centre = hits[2].expect("centre ray hits corner A");
        assert!((centre.distance - 5.0).abs() < 1e-6);
        assert!(hits[0].is_none());
        assert!(hits[4].is_none());
    }

    #[test]
    fn samples_are_evenly_spaced_and_restartable() {
        let ray = Ray::new(RayId(0), 0.0, 10.0);
        let samples = ray.sample(Pose::new(0.0, 0.0, 0.0), 11);
        assert_eq!(samples.len(), 11);
        let again = samples.clone();
        let d: Vec<f64> = samples.map(|s| s.distance).collect();
        assert_eq!(d.len(), 11);
        for (i, di) in d.iter().enumerate() {
            assert!((di - i as f64).abs() < 1e-12);
        }
        let last = again.last().unwrap();
        assert!((last.point.x - 10.0).abs() < 1e-12);
    }

    #[test]
    fn single_sample_is_origin() {
        let ray = Ray::new(RayId(0), 0.0, 10.0);
        let s: Vec<_> = ray.sample(Pose::new(1.0, 2.0, 0.0), 1).collect();
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].point, Point::new(1.0, 2.0));
        assert_eq!(s[0].distance, 0.0);
        assert_eq!(ray.sample(Pose::default(), 0).count(), 0);
    }

    #[test]
    fn fan_ids_follow_offsets() {
        let fan = ray_fan(&[-40.0, 0.0, 40.0], 12.0);
        assert_eq!(fan.len(), 3);
        assert_eq!(fan[2].id(), RayId(2));
        assert_eq!(fan[0].offset(), -40.0);
    }
}
