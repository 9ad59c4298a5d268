//! Small vector helpers for stereo perception.
//!
//! Every test here is scale free: collinearity compares a sine, coplanarity
//! compares an out-of-plane distance against the mean focus-ligand distance.

use crate::stereo::SquarePlanarShape;

pub(crate) type Point = [f64; 3];

fn sub(a: Point, b: Point) -> Point {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: Point, b: Point) -> Point {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: Point, b: Point) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(a: Point) -> f64 {
    dot(a, a).sqrt()
}

fn distance(a: Point, b: Point) -> f64 {
    norm(sub(a, b))
}

/// Unit normal of the plane through three points, `None` if they are
/// (nearly) on one line.
pub(crate) fn plane_normal(p0: Point, p1: Point, p2: Point) -> Option<Point> {
    let n = cross(sub(p1, p0), sub(p2, p0));
    let len = norm(n);
    let span = distance(p1, p0) * distance(p2, p0);
    if span == 0.0 || len <= f64::EPSILON * span {
        return None;
    }
    Some([n[0] / len, n[1] / len, n[2] / len])
}

/// `a`, `focus` and `b` lie on one line with `focus` between the two.
pub(crate) fn is_collinear(a: Point, focus: Point, b: Point, tolerance: f64) -> bool {
    let u = sub(a, focus);
    let v = sub(b, focus);
    let lengths = norm(u) * norm(v);
    if lengths == 0.0 {
        return false;
    }
    norm(cross(u, v)) / lengths < tolerance && dot(u, v) < 0.0
}

/// The focus and all `points` lie in the plane through the first three
/// points.
///
/// The out-of-plane distance of each point is measured against the mean
/// distance from the focus to `points`.
pub(crate) fn is_coplanar(focus: Point, points: &[Point], tolerance: f64) -> bool {
    let [p0, p1, p2, ..] = points else {
        return false;
    };
    let Some(normal) = plane_normal(*p0, *p1, *p2) else {
        return false;
    };
    let scale = points.iter().map(|&p| distance(p, focus)).sum::<f64>() / points.len() as f64;
    let limit = tolerance * scale;
    points
        .iter()
        .chain(std::iter::once(&focus))
        .all(|&q| dot(normal, sub(q, *p0)).abs() <= limit)
}

/// Signed volume `(b - a) · ((c - a) × (d - a))`, six times the volume of
/// the tetrahedron `abcd`.
pub(crate) fn signed_volume(a: Point, b: Point, c: Point, d: Point) -> f64 {
    dot(sub(b, a), cross(sub(c, a), sub(d, a)))
}

/// Path traced by four coplanar points in the given order.
///
/// The normals of the consecutive triangles `abc`, `bcd` and `cda` all
/// agree for a walk around the square (U). A crossing between `b` and `c`
/// flips the `cda` normal only (4); anything else is a crossing between `c`
/// and `d` (Z).
pub(crate) fn square_planar_shape(a: Point, b: Point, c: Point, d: Point) -> SquarePlanarShape {
    let na = cross(sub(b, a), sub(c, a));
    let nb = cross(sub(c, b), sub(d, b));
    let nc = cross(sub(d, c), sub(a, c));
    let ab = dot(na, nb);
    let ac = dot(na, nc);
    let bc = dot(nb, nc);
    if ab > 0.0 && ac > 0.0 && bc > 0.0 {
        SquarePlanarShape::U
    } else if ab > 0.0 && ac < 0.0 && bc < 0.0 {
        SquarePlanarShape::Four
    } else {
        SquarePlanarShape::Z
    }
}
