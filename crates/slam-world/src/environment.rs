//! Bounded environment: an obstacle list framed by four boundary walls.

use slam_core::{segments_intersection, ObstacleId, Point, SimRng};

use crate::{Obstacle, WorldError, WorldResult};

/// Thickness of the boundary walls, in world units.
pub const WALL_THICKNESS: f64 = 4.0;

/// Upper bound on rejection-sampling attempts in [`Environment::random_point`].
const MAX_SAMPLE_ATTEMPTS: usize = 10_000;

/// Number of boundary walls; they always occupy the first slots of the list.
const WALL_COUNT: usize = 4;

/// The ground-truth world: bounds `[0, width] × [0, height]` plus obstacles.
///
/// The four boundary walls are created by the constructor and are always
/// present.  They sit just outside the bounds and overlap at the corners, so
/// no ray can escape.  Additional obstacles are appended after the walls.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Environment {
    width:     f64,
    height:    f64,
    obstacles: Vec<Obstacle>,
}

impl Environment {
    /// An empty environment with boundary walls only.
    pub fn new(width: f64, height: f64) -> WorldResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(WorldError::InvalidBounds { width, height });
        }
        let t = WALL_THICKNESS;
        let walls = vec![
            Obstacle::new(Point::new(0.0, -t), 0.0, width, t, "south"),
            Obstacle::new(Point::new(width, -t), 0.0, t, height + 2.0 * t, "east"),
            Obstacle::new(Point::new(0.0, height), 0.0, width, t, "north"),
            Obstacle::new(Point::new(-t, -t), 0.0, t, height + 2.0 * t, "west"),
        ];
        Ok(Self { width, height, obstacles: walls })
    }

    /// Walls plus the given obstacles.
    pub fn with_obstacles(
        width:     f64,
        height:    f64,
        obstacles: impl IntoIterator<Item = Obstacle>,
    ) -> WorldResult<Self> {
        let mut env = Self::new(width, height)?;
        env.obstacles.extend(obstacles);
        Ok(env)
    }

    /// Append an obstacle and return its id.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(obstacle);
        id
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Every obstacle, walls first.  `ObstacleId(i)` is `obstacles()[i]`.
    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[inline]
    pub fn walls(&self) -> &[Obstacle] {
        &self.obstacles[..WALL_COUNT]
    }

    #[inline]
    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.index())
    }

    /// `true` iff any obstacle, walls included, contains `point`.
    pub fn is_point_in_obstacle(&self, point: Point) -> bool {
        self.obstacles.iter().any(|o| o.contains(point))
    }

    /// `true` iff a straight move from `from` to `to` runs into an obstacle:
    /// it crosses an edge of, or ends inside, any obstacle that does not
    /// already contain `from`.  Moving within or out of an obstacle is free.
    pub fn blocks_motion(&self, from: Point, to: Point) -> bool {
        self.obstacles.iter().filter(|o| !o.contains(from)).any(|o| {
            o.contains(to) || o.edges().any(|(_, q0, q1)| segments_intersection(from, to, q0, q1).is_some())
        })
    }

    /// Coarse bounds check, independent of the walls.
    #[inline]
    pub fn out_of_bounds(&self, point: Point) -> bool {
        point.x < 0.0 || point.x > self.width || point.y < 0.0 || point.y > self.height
    }

    /// Rejection-sample a uniform point inside the bounds that is not inside
    /// any obstacle.
    ///
    /// # Errors
    ///
    /// [`WorldError::NoFreeSpace`] if no free point turns up within a bounded
    /// number of attempts.
    pub fn random_point(&self, rng: &mut SimRng) -> WorldResult<Point> {
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let p = Point::new(rng.uniform(0.0, self.width), rng.uniform(0.0, self.height));
            if !self.is_point_in_obstacle(p) {
                return Ok(p);
            }
        }
        Err(WorldError::NoFreeSpace { attempts: MAX_SAMPLE_ATTEMPTS })
    }
}
