//! Orientation and containment predicates on 2D points.
//!
//! Points are plain `[x, y]` arrays. Polygons are slices of points in
//! counter-clockwise order; none of the predicates check that precondition.
//!
//! # Examples
//! ```rust
//! use quadmesh::geometry::predicates::{contains_point, orient2d};
//!
//! assert!(orient2d([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]) > 0.0);
//! let square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
//! assert!(contains_point([0.5, 0.5], &square));
//! assert!(contains_point([1.0, 0.5], &square)); // boundary counts as inside
//! assert!(!contains_point([1.5, 0.5], &square));
//! ```

/// A point (or vector) in the plane.
pub type Point2 = [f64; 2];

/// Twice the signed area of triangle `(a, b, c)`.
///
/// Positive iff the triangle is counter-clockwise; zero for collinear points.
#[inline]
pub fn orient2d(a: Point2, b: Point2, c: Point2) -> f64 {
    (b[0] * c[1] - c[0] * b[1]) + (c[0] * a[1] - a[0] * c[1]) + (a[0] * b[1] - b[0] * a[1])
}

/// Signed area of triangle `(a, b, c)`.
#[inline]
pub fn triangle_area(a: Point2, b: Point2, c: Point2) -> f64 {
    0.5 * orient2d(a, b, c)
}

/// `true` iff `point` lies on the non-negative side of every edge of the
/// counter-clockwise polygon `vertices`. Points on the boundary are inside.
///
/// An empty polygon contains nothing.
pub fn contains_point(point: Point2, vertices: &[Point2]) -> bool {
    let Some(&last) = vertices.last() else {
        return false;
    };
    let mut prev = last;
    for &v in vertices {
        if orient2d(point, prev, v) < 0.0 {
            return false;
        }
        prev = v;
    }
    true
}

/// Shoelace signed area of the closed polygon `vertices`.
pub fn polygon_area(vertices: &[Point2]) -> f64 {
    let Some(&last) = vertices.last() else {
        return 0.0;
    };
    let mut prev = last;
    let mut twice = 0.0;
    for &v in vertices {
        twice += prev[0] * v[1] - prev[1] * v[0];
        prev = v;
    }
    0.5 * twice
}

/// Arithmetic mean of `vertices` (the vertex centroid, not the area centroid).
pub fn centroid(vertices: &[Point2]) -> Point2 {
    if vertices.is_empty() {
        return [0.0, 0.0];
    }
    let n = vertices.len() as f64;
    let (sx, sy) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), v| (sx + v[0], sy + v[1]));
    [sx / n, sy / n]
}
