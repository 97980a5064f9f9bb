//! Points on the plane and the Euclidean metric.

use std::fmt;

/// A bare coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Coord {
    /// Create a coordinate pair.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn squared_distance(self, other: Coord) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        self.squared_distance(other).sqrt()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "({:.*}, {:.*})", p, self.x, p, self.y),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// A named point, optionally assigned to a group by clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Identity of the point; unique among live points of a dataset.
    pub name: String,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Index into the current group set, if any.
    pub group: Option<usize>,
}

impl Point {
    /// Create an ungrouped point.
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            group: None,
        }
    }

    /// The point's coordinates.
    #[inline]
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

impl From<&Point> for Coord {
    fn from(p: &Point) -> Self {
        p.coord()
    }
}

/// Euclidean distance between two points (or anything that has coordinates).
///
/// ```
/// use plano::{distance, Point};
///
/// let a = Point::new("A", 0.0, 0.0);
/// let b = Point::new("B", 3.0, 4.0);
/// assert_eq!(distance(&a, &b), 5.0);
/// ```
#[inline]
pub fn distance(a: impl Into<Coord>, b: impl Into<Coord>) -> f64 {
    a.into().distance(b.into())
}
