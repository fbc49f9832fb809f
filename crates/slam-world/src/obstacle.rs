//! Oriented rectangular obstacles.
//!
//! An obstacle is defined by a pivot corner, a rotation (degrees,
//! counter-clockwise about the pivot), a width and a height.  The four
//! corners are labelled `A..D` going around the rectangle:
//!
//! ```text
//!   B ────────── C        offsets before rotation:
//!   │            │          A = (0, 0)   B = (0, h)
//!   │            │          C = (w, h)   D = (w, 0)
//!   A ────────── D
//! ```
//!
//! The edges `AB, BC, CD, DA` close the polygon.  Both ray casting and the
//! containment test use exactly these corners, so they always agree.

use std::fmt;

use slam_core::{Point, Vector};

/// Absolute slack on the containment test, in world units.
const CONTAINS_TOL: f64 = 1e-9;

// ── Corner / Edge labels ──────────────────────────────────────────────────────

/// Corner label.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    A,
    B,
    C,
    D,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::A, Corner::B, Corner::C, Corner::D];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Edge label, named after the two corners it joins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    AB,
    BC,
    CD,
    DA,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::AB, Edge::BC, Edge::CD, Edge::DA];

    /// The corners at either end of this edge, in polygon order.
    #[inline]
    pub fn corners(self) -> (Corner, Corner) {
        match self {
            Edge::AB => (Corner::A, Corner::B),
            Edge::BC => (Corner::B, Corner::C),
            Edge::CD => (Corner::C, Corner::D),
            Edge::DA => (Corner::D, Corner::A),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

/// An oriented rectangle.
///
/// Derived geometry (corners, centre, size) is computed once at construction;
/// obstacles are immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub name:   String,
    pivot:      Point,
    angle:      f64,
    width:      f64,
    height:     f64,
    corners:    [Point; 4],
    center:     Point,
    size:       f64,
}

impl Obstacle {
    /// Build an obstacle from its pivot corner `A`, rotation in degrees, and
    /// dimensions.
    pub fn new(pivot: Point, angle: f64, width: f64, height: f64, name: impl Into<String>) -> Self {
        let offsets = [
            Vector::new(0.0, 0.0),
            Vector::new(0.0, height),
            Vector::new(width, height),
            Vector::new(width, 0.0),
        ]
        .map(|v| v.rotate(angle));

        let corners = offsets.map(|o| pivot + o);
        let diagonal = offsets[Corner::C.index()];

        Self {
            name: name.into(),
            pivot,
            angle,
            width,
            height,
            corners,
            center: pivot + diagonal * 0.5,
            size: diagonal.magnitude(),
        }
    }

    #[inline]
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Centre of mass.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Diagonal length.  Twice the circumradius, so `distance(p, centre) -
    /// size` under-estimates the distance from `p` to any point of the
    /// obstacle and is a safe reject test.
    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[inline]
    pub fn area(&self) -> f64 {
        (self.width * self.height).abs()
    }

    #[inline]
    pub fn corner(&self, corner: Corner) -> Point {
        self.corners[corner.index()]
    }

    /// All four corners in `A, B, C, D` order.
    #[inline]
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// End points of a named edge.
    #[inline]
    pub fn edge(&self, edge: Edge) -> (Point, Point) {
        let (a, b) = edge.corners();
        (self.corner(a), self.corner(b))
    }

    /// Iterator over `(label, start, end)` for the four edges.
    pub fn edges(&self) -> impl Iterator<Item = (Edge, Point, Point)> + '_ {
        Edge::ALL.into_iter().map(move |e| {
            let (p0, p1) = self.edge(e);
            (e, p0, p1)
        })
    }

    /// `true` iff `point` lies inside the rectangle or on its boundary.
    ///
    /// Rotates `point` into the obstacle's own frame and tests against the
    /// axis-aligned `[0, w] × [0, h]` box.  Equivalent to the
    /// sum-of-triangle-areas test without its sensitivity to rounding.
    pub fn contains(&self, point: Point) -> bool {
        let local = (point - self.pivot).rotate(-self.angle);
        let within = |v: f64, extent: f64| {
            let (lo, hi) = if extent >= 0.0 { (0.0, extent) } else { (extent, 0.0) };
            v >= lo - CONTAINS_TOL && v <= hi + CONTAINS_TOL
        };
        within(local.x, self.width) && within(local.y, self.height)
    }
}

impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Obstacle '{}' [A {} B {} C {} D {}]",
            self.name, self.corners[0], self.corners[1], self.corners[2], self.corners[3],
        )
    }
}
