//! Corner ordering for raw quadrilaterals.
//!
//! Topology and point location expect every cell to be counter-clockwise,
//! split along its Delaunay diagonal (`n1`–`n3`, whose opposite corners have
//! interior angles summing to less than π), and rotated so the vertex
//! centroid falls inside triangle `(n1, n2, n3)`. [`normalize_quad`] applies
//! all three rules and computes the cell and corner-triangle areas on the way.

use crate::geometry::predicates::{Point2, triangle_area};
use crate::mesh_error::MeshError;

/// A quad after normalization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedQuad {
    /// Node ids in normalized corner order.
    pub cell: [usize; 4],
    /// Area of the triangle at each corner, aligned with `cell`.
    pub corner_areas: [f64; 4],
    /// Cell area, `corner_areas[0] + corner_areas[2]`.
    pub area: f64,
}

/// Dot product of `a - c` and `b - c`.
#[inline]
fn dot_at(a: Point2, b: Point2, c: Point2) -> f64 {
    (a[0] - c[0]) * (b[0] - c[0]) + (a[1] - c[1]) * (b[1] - c[1])
}

/// Reorder the corners of `quad` and compute its areas.
///
/// Fails on node ids outside `nodes` and on quads with zero or non-finite
/// area. The quad itself must be simple; self-intersecting input is not
/// detected.
pub fn normalize_quad(nodes: &[Point2], quad: [usize; 4]) -> Result<NormalizedQuad, MeshError> {
    let corner = |n: usize| {
        nodes.get(n).copied().ok_or_else(|| {
            MeshError::invalid_geometry(format!(
                "quad {quad:?} references node {n}, but only {} nodes exist",
                nodes.len()
            ))
        })
    };
    let [n1, mut n2, n3, mut n4] = quad;
    let a1 = corner(n1)?;
    let mut a2 = corner(n2)?;
    let a3 = corner(n3)?;
    let mut a4 = corner(n4)?;

    let mut s1 = triangle_area(a4, a1, a2);
    let mut s3 = triangle_area(a2, a3, a4);
    if s1 + s3 < 0.0 {
        std::mem::swap(&mut n2, &mut n4);
        std::mem::swap(&mut a2, &mut a4);
        s1 = -s1;
        s3 = -s3;
    }

    // Proportional to sin(angle_1 + angle_3).
    let turn = s1 * dot_at(a2, a4, a3) + s3 * dot_at(a2, a4, a1);
    let (mut cell, mut corner_areas) = if turn > 0.0 {
        (
            [n4, n1, n2, n3],
            [
                triangle_area(a3, a4, a1),
                s1,
                triangle_area(a1, a2, a3),
                s3,
            ],
        )
    } else {
        (
            [n1, n2, n3, n4],
            [
                s1,
                triangle_area(a1, a2, a3),
                s3,
                triangle_area(a3, a4, a1),
            ],
        )
    };

    // The larger half of the split holds the vertex centroid.
    if corner_areas[1] < corner_areas[3] {
        cell.rotate_left(2);
        corner_areas.rotate_left(2);
    }

    let area = corner_areas[0] + corner_areas[2];
    if !area.is_finite() || area <= 0.0 {
        return Err(MeshError::invalid_geometry(format!(
            "degenerate quad {quad:?}: area = {area}"
        )));
    }
    Ok(NormalizedQuad {
        cell,
        corner_areas,
        area,
    })
}
