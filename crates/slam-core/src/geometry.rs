//! 2D geometry kernel: points, vectors, poses, lines and segment intersection.
//!
//! # Conventions
//!
//! - World frame is right-handed: +x to the right, +y up.
//! - Angles are **degrees**, counter-clockwise positive.  They are converted to
//!   radians only at the trig call sites.
//! - All functions are pure.  Degenerate inputs (zero-length segments,
//!   coincident points, parallel lines) yield `None`, never NaN or a panic.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Determinant guard for [`segments_intersection`], relative to `|d|·|e|`.
const DET_EPS: f64 = 1e-12;

/// Slack on the segment parameters so hits exactly on a vertex or endpoint
/// survive floating-point rounding.
const PARAM_EPS: f64 = 1e-9;

/// Slope difference below which two sloped lines count as parallel.
const SLOPE_EPS: f64 = 1e-12;

// ── Vector ────────────────────────────────────────────────────────────────────

/// A 2D displacement.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of `length` pointing at `degrees`.
    #[inline]
    pub fn from_angle(degrees: f64, length: f64) -> Self {
        let r = degrees.to_radians();
        Self { x: length * r.cos(), y: length * r.sin() }
    }

    /// Rotate counter-clockwise by `degrees`.
    #[inline]
    pub fn rotate(self, degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self {
            x: self.x * c - self.y * s,
            y: self.x * s + self.y * c,
        }
    }

    #[inline]
    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3D cross product.
    #[inline]
    pub fn cross(self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Orientation in degrees, in `(-180, 180]`.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

impl Add for Vector {
    type Output = Vector;
    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector {
    type Output = Vector;
    #[inline]
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    #[inline]
    fn mul(self, k: f64) -> Vector {
        Vector::new(self.x * k, self.y * k)
    }
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// A 2D position in the world frame.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).magnitude()
    }

    /// Displacement from the origin to `self`.
    #[inline]
    pub fn to_vector(self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + (other - self) * t
    }
}

impl Sub for Point {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Vector) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance_to(b)
}

/// Wrap an angle in degrees into `(-180, 180]`.
#[inline]
pub fn wrap_degrees(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    if r > 180.0 { r - 360.0 } else { r }
}

// ── Pose ──────────────────────────────────────────────────────────────────────

/// Position plus heading (degrees, counter-clockwise from +x).
///
/// The heading is not wrapped; it accumulates exactly as commanded so that a
/// replayed command log reproduces the same sequence of poses bit for bit.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub x:       f64,
    pub y:       f64,
    pub heading: f64,
}

impl Pose {
    #[inline]
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    #[inline]
    pub fn position(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The point `distance` ahead of the pose along its heading.
    #[inline]
    pub fn forward(self, distance: f64) -> Point {
        self.position() + Vector::from_angle(self.heading, distance)
    }

    /// Forward-Euler step: rotate by `omega` degrees, then advance `speed`
    /// along the new heading.
    ///
    /// This is the single integration rule shared by the agent's true motion
    /// and the map's dead-reckoning replay.
    #[inline]
    pub fn integrate(self, speed: f64, omega: f64) -> Pose {
        let heading = self.heading + omega;
        let r = heading.to_radians();
        Pose {
            x: self.x + speed * r.cos(),
            y: self.y + speed * r.sin(),
            heading,
        }
    }

    /// Express a world point in this pose's egocentric frame
    /// (+x along the heading).
    #[inline]
    pub fn to_egocentric(self, point: Point) -> Vector {
        (point - self.position()).rotate(-self.heading)
    }

    /// Inverse of [`to_egocentric`](Self::to_egocentric).
    #[inline]
    pub fn to_allocentric(self, local: Vector) -> Point {
        self.position() + local.rotate(self.heading)
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}) @ {:.2}°", self.x, self.y, self.heading)
    }
}

// ── Line ──────────────────────────────────────────────────────────────────────

/// An infinite line, classified by slope.
///
/// Kept as an analytic helper; ray casting uses [`segments_intersection`],
/// which is authoritative.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Line {
    /// `x = x`.
    Vertical { x: f64 },
    /// `y = y`.
    Horizontal { y: f64 },
    /// `y = slope * x + intercept`.
    Sloped { slope: f64, intercept: f64 },
}

impl Line {
    /// The line through `p1` and `p2`, or `None` if the points coincide.
    pub fn from_points(p1: Point, p2: Point) -> Option<Line> {
        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;
        match (dx == 0.0, dy == 0.0) {
            (true, true) => None,
            (true, false) => Some(Line::Vertical { x: p1.x }),
            (false, true) => Some(Line::Horizontal { y: p1.y }),
            (false, false) => {
                let slope = dy / dx;
                Some(Line::Sloped { slope, intercept: p1.y - slope * p1.x })
            }
        }
    }

    /// Intersection of two infinite lines; `None` when parallel.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        use Line::*;
        match (*self, *other) {
            (Vertical { .. }, Vertical { .. }) | (Horizontal { .. }, Horizontal { .. }) => None,
            (Vertical { x }, Horizontal { y }) | (Horizontal { y }, Vertical { x }) => {
                Some(Point::new(x, y))
            }
            (Vertical { x }, Sloped { slope, intercept })
            | (Sloped { slope, intercept }, Vertical { x }) => {
                Some(Point::new(x, slope * x + intercept))
            }
            (Horizontal { y }, Sloped { slope, intercept })
            | (Sloped { slope, intercept }, Horizontal { y }) => {
                Some(Point::new((y - intercept) / slope, y))
            }
            (Sloped { slope: m1, intercept: b1 }, Sloped { slope: m2, intercept: b2 }) => {
                if (m1 - m2).abs() < SLOPE_EPS {
                    return None;
                }
                let x = (b2 - b1) / (m1 - m2);
                Some(Point::new(x, m1 * x + b1))
            }
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Vertical { x } => write!(f, "x = {x:.2}"),
            Line::Horizontal { y } => write!(f, "y = {y:.2}"),
            Line::Sloped { slope, intercept } => write!(f, "y = {slope:.2}x + {intercept:.2}"),
        }
    }
}

// ── Segment intersection ──────────────────────────────────────────────────────

/// Intersection of the finite segments `p0→p1` and `q0→q1`.
///
/// Parametrises both segments as `p0 + t·d` and `q0 + s·e` and solves the
/// 2×2 system with Cramer's rule.  Returns the point only when both `t` and
/// `s` lie in `[0, 1]` (with a small slack for vertex hits).  Parallel,
/// collinear and zero-length segments return `None`.
pub fn segments_intersection(p0: Point, p1: Point, q0: Point, q1: Point) -> Option<Point> {
    let d = p1 - p0;
    let e = q1 - q0;

    let det = d.cross(e);
    let scale = d.magnitude() * e.magnitude();
    if scale == 0.0 || det.abs() <= DET_EPS * scale {
        return None;
    }

    let w = q0 - p0;
    let t = w.cross(e) / det;
    let s = w.cross(d) / det;

    let inside = |u: f64| (-PARAM_EPS..=1.0 + PARAM_EPS).contains(&u);
    if inside(t) && inside(s) {
        Some(p0 + d * t.clamp(0.0, 1.0))
    } else {
        None
    }
}
