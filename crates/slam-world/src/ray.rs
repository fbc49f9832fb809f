//! LIDAR-like rays: nearest-hit casting against obstacle edges and sampling
//! along the ray for free-space evidence.
//!
//! A [`Ray`] stores only its angular offset from the agent heading and its
//! length.  Its absolute angle and end points are derived from the sensor
//! pose passed to each call, so the owning agent's live pose is always the
//! one used.

use slam_core::{segments_intersection, Line, ObstacleId, Point, Pose, RayId, Vector};

use crate::Obstacle;

// ── Contact ───────────────────────────────────────────────────────────────────

/// A resolved ray–obstacle intersection.  Immutable once produced.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contact {
    /// The ray that produced the contact.
    pub ray:        RayId,
    /// The obstacle that was hit.
    pub obstacle:   ObstacleId,
    /// Hit point in world (allocentric) coordinates.
    pub point:      Point,
    /// Hit point relative to the sensor, +x along the agent heading.
    pub egocentric: Vector,
    /// Distance from the sensor origin to `point`.
    pub distance:   f64,
}

// ── Ray ───────────────────────────────────────────────────────────────────────

/// One ray of the sensor fan.
#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    id:      RayId,
    offset:  f64,
    length:  f64,
    contact: Option<Contact>,
}

impl Ray {
    pub fn new(id: RayId, offset: f64, length: f64) -> Self {
        Self { id, offset, length, contact: None }
    }

    #[inline]
    pub fn id(&self) -> RayId {
        self.id
    }

    /// Angular offset from the agent heading, degrees.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Absolute angle: sensor heading plus offset.
    #[inline]
    pub fn angle(&self, sensor: Pose) -> f64 {
        sensor.heading + self.offset
    }

    /// Start and end of the ray segment.
    #[inline]
    pub fn endpoints(&self, sensor: Pose) -> (Point, Point) {
        let p0 = sensor.position();
        (p0, p0 + Vector::from_angle(self.angle(sensor), self.length))
    }

    /// The infinite line through the ray; `None` for a zero-length ray.
    pub fn line(&self, sensor: Pose) -> Option<Line> {
        let (p0, p1) = self.endpoints(sensor);
        Line::from_points(p0, p1)
    }

    /// Nearest intersection with any obstacle edge within range.
    ///
    /// Obstacles whose centre is further than `size + length` from the origin
    /// are skipped without testing their edges.  Ties keep the earlier
    /// obstacle / edge.
    pub fn cast(&self, sensor: Pose, obstacles: &[Obstacle]) -> Option<Contact> {
        let (p0, p1) = self.endpoints(sensor);
        let mut best: Option<Contact> = None;

        for (i, obstacle) in obstacles.iter().enumerate() {
            if p0.distance_to(obstacle.center()) - obstacle.size() > self.length {
                continue;
            }

            let nearest = obstacle
                .edges()
                .filter_map(|(_, q0, q1)| segments_intersection(p0, p1, q0, q1))
                .map(|p| (p, p0.distance_to(p)))
                .min_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((point, distance)) = nearest {
                if best.is_none_or(|c| distance < c.distance) {
                    best = Some(Contact {
                        ray: self.id,
                        obstacle: ObstacleId(i as u32),
                        point,
                        egocentric: sensor.to_egocentric(point),
                        distance,
                    });
                }
            }
        }
        best
    }

    /// [`cast`](Self::cast) and remember the result as this ray's contact.
    pub fn scan(&mut self, sensor: Pose, obstacles: &[Obstacle]) -> Option<&Contact> {
        self.contact = self.cast(sensor, obstacles);
        self.contact.as_ref()
    }

    /// Contact from the most recent [`scan`](Self::scan).
    #[inline]
    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    /// `n` evenly spaced points from the origin to the end point, inclusive.
    ///
    /// The iterator is lazy and finite; clone it (or call `sample` again) to
    /// restart.
    pub fn sample(&self, sensor: Pose, n: usize) -> RaySamples {
        let (origin, end) = self.endpoints(sensor);
        RaySamples { origin, end, length: self.length, n, next: 0 }
    }
}

/// Build a fan of rays with the given offsets, ids assigned in order.
pub fn ray_fan(offsets: &[f64], length: f64) -> Vec<Ray> {
    offsets
        .iter()
        .enumerate()
        .map(|(i, &offset)| Ray::new(RayId(i as u16), offset, length))
        .collect()
}

// ── Sampling ──────────────────────────────────────────────────────────────────

/// A point along a ray tagged with its distance from the ray origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaySample {
    pub point:    Point,
    pub distance: f64,
}

/// Iterator returned by [`Ray::sample`].
#[derive(Clone, Debug)]
pub struct RaySamples {
    origin: Point,
    end:    Point,
    length: f64,
    n:      usize,
    next:   usize,
}

impl Iterator for RaySamples {
    type Item = RaySample;

    fn next(&mut self) -> Option<RaySample> {
        if self.next >= self.n {
            return None;
        }
        let t = if self.n > 1 { self.next as f64 / (self.n - 1) as f64 } else { 0.0 };
        self.next += 1;
        Some(RaySample {
            point:    self.origin.lerp(self.end, t),
            distance: self.length * t,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.n.saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for RaySamples {}
