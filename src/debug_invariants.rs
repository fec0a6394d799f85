//! Opt-in validation of mesh construction preconditions.
//!
//! Construction only checks structure. The geometric rules every cell must
//! follow (counter-clockwise corners, positive area, vertex centroid inside
//! triangle `(n1, n2, n3)`) and the symmetry of the neighbour table are
//! checked here, on request.

use crate::geometry::predicates::{Point2, centroid, orient2d, polygon_area};
use crate::io::MeshData;
use crate::mesh_error::MeshError;
use crate::topology::QuadMesh;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

/// Relative slack for centroids lying on the `n1`–`n3` diagonal, as in
/// rectangles.
const CENTROID_SLACK: f64 = 1e-9;

fn check_cell(cell: usize, corners: &[Point2; 4], area: f64) -> Result<(), MeshError> {
    if !(area.is_finite() && area > 0.0) {
        return Err(MeshError::invalid_geometry(format!(
            "cell {cell} has non-positive area {area}"
        )));
    }
    let signed = polygon_area(corners);
    if signed <= 0.0 {
        return Err(MeshError::invalid_geometry(format!(
            "cell {cell} is not counter-clockwise (signed area {signed})"
        )));
    }
    let c = centroid(corners);
    let slack = -CENTROID_SLACK * signed;
    let inside = orient2d(corners[0], corners[1], c) >= slack
        && orient2d(corners[1], corners[2], c) >= slack
        && orient2d(corners[2], corners[0], c) >= slack;
    if !inside {
        return Err(MeshError::invalid_geometry(format!(
            "centroid of cell {cell} lies outside its first triangle"
        )));
    }
    Ok(())
}

/// Every link `c --e--> n` must have a link `n --> c` back.
pub(crate) fn check_adjacency(neighbours: &[[usize; 4]]) -> Result<(), MeshError> {
    let none = neighbours.len();
    for (cell, row) in neighbours.iter().enumerate() {
        for (edge, &neighbour) in row.iter().enumerate() {
            if neighbour == none {
                continue;
            }
            let back = neighbours
                .get(neighbour)
                .is_some_and(|other| other.contains(&cell));
            if !back {
                return Err(MeshError::AsymmetricAdjacency {
                    cell,
                    edge,
                    neighbour,
                });
            }
        }
    }
    Ok(())
}

impl DebugInvariants for MeshData {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "MeshData");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        for (field, found) in [
            ("areas", self.areas.len()),
            ("corner_areas", self.corner_areas.len()),
        ] {
            if found != self.cells.len() {
                return Err(MeshError::LengthMismatch {
                    field,
                    expected: self.cells.len(),
                    found,
                });
            }
        }
        for (cell, ids) in self.cells.iter().enumerate() {
            if let Some(&node) = ids.iter().find(|&&n| n >= self.nodes.len()) {
                return Err(MeshError::NodeIndexOutOfRange {
                    cell,
                    node,
                    node_count: self.nodes.len(),
                });
            }
            check_cell(cell, &ids.map(|n| self.nodes[n]), self.areas[cell])?;
        }
        Ok(())
    }
}

impl DebugInvariants for QuadMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "QuadMesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        for (cell, corners) in self.coords().iter().enumerate() {
            check_cell(cell, corners, self.areas()[cell])?;
        }
        check_adjacency(self.neighbours())
    }
}
