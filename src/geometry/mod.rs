//! Points, segments and the obstacles built from them.
//!
//! All intersection tests are exact on the stored `f64` values: two segments that merely touch,
//! or that overlap while being collinear, intersect.

mod obstacle;
pub use self::obstacle::{Obstacle, Shape};

use crate::Coordinate;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

/// A point on a [`Plane`](crate::Plane).
///
/// Equality, ordering and hashing are based on the bit patterns of the coordinates, so that
/// Positions can be used as keys in maps and sets. `-0.0` and `0.0` are treated as the same value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Position {
    /// the horizontal coordinate, bounded by the rows of the workspace
    pub x: f64,
    /// the vertical coordinate, bounded by the columns of the workspace
    pub y: f64,
}

impl Position {
    /// Creates a new Position
    pub const fn new(x: f64, y: f64) -> Position {
        Position { x, y }
    }

    /// the Euclidean distance between two Positions
    pub fn distance(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// the length of this Position interpreted as a vector
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// the unit vector pointing in the same direction, or the zero vector for the zero vector
    pub fn normalized(self) -> Position {
        let len = self.length();
        if len == 0.0 {
            Position::default()
        } else {
            Position::new(self.x / len, self.y / len)
        }
    }

    /// the z component of the cross product of two vectors
    pub fn cross(self, other: Position) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// `true` if both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn normalized_bits(self) -> (u64, u64) {
        // adding 0.0 turns -0.0 into 0.0
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Position) -> bool {
        self.normalized_bits() == other.normalized_bits()
    }
}
impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized_bits().hash(state)
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Position) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Position {
    fn cmp(&self, other: &Position) -> Ordering {
        (self.x + 0.0)
            .total_cmp(&(other.x + 0.0))
            .then_with(|| (self.y + 0.0).total_cmp(&(other.y + 0.0)))
    }
}

impl Add for Position {
    type Output = Position;
    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Sub for Position {
    type Output = Position;
    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl Mul<f64> for Position {
    type Output = Position;
    fn mul(self, rhs: f64) -> Position {
        Position::new(self.x * rhs, self.y * rhs)
    }
}
impl Neg for Position {
    type Output = Position;
    fn neg(self) -> Position {
        Position::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Position {
        Position::new(x, y)
    }
}
impl From<Coordinate> for Position {
    fn from((x, y): Coordinate) -> Position {
        Position::new(x as f64, y as f64)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "({}, {})", self.x, self.y)
    }
}

/// A straight line segment between two Positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    /// the first endpoint
    pub a: Position,
    /// the second endpoint
    pub b: Position,
}

impl Segment {
    /// Creates a new Segment from `a` to `b`
    pub const fn new(a: Position, b: Position) -> Segment {
        Segment { a, b }
    }

    /// the length of the Segment
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// the point halfway between both endpoints
    pub fn midpoint(&self) -> Position {
        Position::new((self.a.x + self.b.x) / 2.0, (self.a.y + self.b.y) / 2.0)
    }

    /// `true` if both endpoints are the same point
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    /// `true` if `point` lies on the Segment, endpoints included
    pub fn contains(&self, point: Position) -> bool {
        area(self.a, self.b, point) == 0.0 && in_box(self.a, self.b, point)
    }

    /// `true` if the two Segments share at least one point
    pub fn intersects(&self, other: &Segment) -> bool {
        segments_intersect(self, other)
    }
}

/// twice the signed area of the triangle `p1`, `p2`, `p3`.
///
/// Positive if the points turn counter-clockwise, negative if clockwise and zero if collinear.
pub fn area(p1: Position, p2: Position, p3: Position) -> f64 {
    (p2 - p1).cross(p3 - p1)
}

fn in_box(p1: Position, p2: Position, p3: Position) -> bool {
    p1.x.min(p2.x) <= p3.x
        && p3.x <= p1.x.max(p2.x)
        && p1.y.min(p2.y) <= p3.y
        && p3.y <= p1.y.max(p2.y)
}

/// `true` iff the two Segments share any point.
///
/// Collinear Segments that touch or overlap intersect.
///
/// ```
/// # use incremental_pathfinding::geometry::{segments_intersect, Segment};
/// # use incremental_pathfinding::Position;
/// let diagonal = Segment::new(Position::new(0.0, 0.0), Position::new(4.0, 4.0));
/// let crossing = Segment::new(Position::new(0.0, 4.0), Position::new(4.0, 0.0));
/// let touching = Segment::new(Position::new(4.0, 4.0), Position::new(6.0, 4.0));
/// let apart = Segment::new(Position::new(5.0, 0.0), Position::new(6.0, 0.0));
///
/// assert!(segments_intersect(&diagonal, &crossing));
/// assert!(segments_intersect(&diagonal, &touching));
/// assert!(!segments_intersect(&diagonal, &apart));
/// ```
pub fn segments_intersect(s: &Segment, t: &Segment) -> bool {
    if s.is_degenerate() {
        return t.contains(s.a);
    }
    if t.is_degenerate() {
        return s.contains(t.a);
    }
    let (p1, p2, p3, p4) = (s.a, s.b, t.a, t.b);

    let a1 = area(p1, p2, p3);
    if a1 == 0.0 {
        if in_box(p1, p2, p3) {
            return true;
        }
        if area(p1, p2, p4) == 0.0 {
            // both Segments lie on the same line
            return in_box(p3, p4, p1) || in_box(p3, p4, p2);
        }
        return false;
    }
    let a2 = area(p1, p2, p4);
    if a2 == 0.0 {
        return in_box(p1, p2, p4);
    }

    let a3 = area(p3, p4, p1);
    if a3 == 0.0 {
        return in_box(p3, p4, p1);
    }
    let a4 = area(p3, p4, p2);
    if a4 == 0.0 {
        return in_box(p3, p4, p2);
    }

    ((a1 > 0.0) != (a2 > 0.0)) && ((a3 > 0.0) != (a4 > 0.0))
}
