//! Geometric primitives and predicates shared by the sweep, the clipper and
//! the polygon builder.
//!
//! All coordinates are screen-oriented: x grows to the right, y grows
//! downward. "Clockwise" throughout the crate means clockwise as displayed in
//! that convention.

use std::ops::{Add, Mul, Sub};

/// Coordinate tolerance. Two coordinates closer than this are considered
/// equal everywhere in the crate: endpoint matching, duplicate-site
/// detection, breakpoint hit tests and degenerate-edge removal.
pub const EPSILON: f64 = 1e-9;

/// Tolerance on the doubled convergence determinant used when scheduling
/// circle events. This is the only tolerance not applied to a coordinate;
/// it rejects collinear and diverging arc triples.
pub const CONVERGENCE_EPSILON: f64 = 2e-12;

/// A point in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn dist_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn dist(&self, other: &Point) -> f64 {
        self.dist_sq(other).sqrt()
    }

    /// Cross product of `self` and `other` seen as vectors.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Whether two coordinates are equal under [`EPSILON`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Whether two points coincide, both coordinates within [`EPSILON`].
pub fn points_coincide(a: &Point, b: &Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// Turn direction of the path `a -> b -> c` in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

/// Orientation predicate. With y growing downward, a positive cross product
/// of `(b - a)` and `(c - a)` is a clockwise turn on screen.
pub fn orientation(a: &Point, b: &Point, c: &Point) -> Orientation {
    let cross = (*b - *a).cross(&(*c - *a));
    if cross > EPSILON {
        Orientation::Clockwise
    } else if cross < -EPSILON {
        Orientation::CounterClockwise
    } else {
        Orientation::Collinear
    }
}

/// Center of the circle through three points, or `None` when they are
/// (nearly) collinear.
pub fn circumcenter(a: &Point, b: &Point, c: &Point) -> Option<Point> {
    let ab = *b - *a;
    let ac = *c - *a;
    let d = 2.0 * ab.cross(&ac);
    if d.abs() < CONVERGENCE_EPSILON {
        return None;
    }
    let ab_sq = ab.dot(&ab);
    let ac_sq = ac.dot(&ac);
    let ux = (ac.y * ab_sq - ab.y * ac_sq) / d;
    let uy = (ab.x * ac_sq - ac.x * ab_sq) / d;
    Some(Point::new(a.x + ux, a.y + uy))
}

/// Evaluates the parabola of points equidistant from `focus` and the
/// horizontal line `y = directrix` at abscissa `x`. The focus must not lie
/// on the directrix.
pub fn parabola_y(focus: &Point, directrix: f64, x: f64) -> f64 {
    let dx = x - focus.x;
    dx * dx / (2.0 * (focus.y - directrix)) + (focus.y + directrix) / 2.0
}
