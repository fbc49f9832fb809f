//! Random obstacle field generation.

use serde::{Deserialize, Serialize};
use slam_core::{Point, SimRng};
use slam_world::{Environment, Obstacle, WorldResult};

/// Parameters of the generated environment.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width:     f64,
    pub height:    f64,
    pub obstacles: usize,
    /// Obstacle pivots stay this far inside the bounds.
    pub margin:    f64,
    pub min_size:  f64,
    pub max_size:  f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width:     100.0,
            height:    100.0,
            obstacles: 10,
            margin:    10.0,
            min_size:  5.0,
            max_size:  20.0,
        }
    }
}

/// Scatter `config.obstacles` rotated rectangles over the environment.
///
/// Candidates that come within `clearance` of `keep_clear` are skipped, so
/// the result may hold fewer obstacles than requested.
pub fn build_environment(
    config:     &WorldConfig,
    keep_clear: Point,
    clearance:  f64,
    rng:        &mut SimRng,
) -> WorldResult<Environment> {
    let mut env = Environment::new(config.width, config.height)?;
    for i in 0..config.obstacles {
        let pivot = Point::new(
            rng.uniform(config.margin, config.width - config.margin),
            rng.uniform(config.margin, config.height - config.margin),
        );
        let obstacle = Obstacle::new(
            pivot,
            rng.uniform(0.0, 360.0),
            rng.uniform(config.min_size, config.max_size),
            rng.uniform(config.min_size, config.max_size),
            format!("obstacle-{i}"),
        );
        if distance_to_obstacle(&obstacle, keep_clear) < clearance {
            continue;
        }
        env.add_obstacle(obstacle);
    }
    Ok(env)
}

/// Distance from `point` to the nearest point of `obstacle`; zero inside.
fn distance_to_obstacle(obstacle: &Obstacle, point: Point) -> f64 {
    if obstacle.contains(point) {
        return 0.0;
    }
    obstacle
        .edges()
        .map(|(_, a, b)| {
            let ab = b - a;
            let len2 = ab.dot(ab);
            let t = if len2 > 0.0 { ((point - a).dot(ab) / len2).clamp(0.0, 1.0) } else { 0.0 };
            point.distance_to(a + ab * t)
        })
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacles_keep_their_distance_from_the_spawn() {
        let config = WorldConfig { obstacles: 40, ..WorldConfig::default() };
        let spawn = Point::new(50.0, 50.0);
        for seed in 0..50 {
            let env = build_environment(&config, spawn, 4.0, &mut SimRng::new(seed)).unwrap();
            let placed = &env.obstacles()[env.walls().len()..];
            assert!(!placed.is_empty(), "seed {seed} placed nothing");
            for obstacle in placed {
                assert!(distance_to_obstacle(obstacle, spawn) >= 4.0, "seed {seed}: {obstacle} crowds the spawn");
                for heading in (0..360).step_by(15) {
                    let ahead = spawn + slam_core::Vector::from_angle(heading as f64, 3.9);
                    assert!(!obstacle.contains(ahead), "seed {seed}: {obstacle} covers {ahead:?}");
                }
            }
        }
    }

    #[test]
    fn distance_to_an_axis_aligned_box() {
        let block = Obstacle::new(Point::new(0.0, 0.0), 0.0, 10.0, 4.0, "block");
        assert_eq!(distance_to_obstacle(&block, Point::new(5.0, 2.0)), 0.0);
        assert!((distance_to_obstacle(&block, Point::new(5.0, 7.0)) - 3.0).abs() < 1e-9);
        assert!((distance_to_obstacle(&block, Point::new(13.0, 8.0)) - 5.0).abs() < 1e-9);
    }
}
