//! Structured quadrilateral mesh generators.
//!
//! Both generators emit normalized [`MeshData`] (corner order, `S` and `trS`
//! filled in) ready for [`QuadMesh::new`](crate::topology::QuadMesh::new).
//! Nodes are numbered row by row, `n(i, j) = j * (n_i + 1) + i`, and cell
//! `(i, j)` gets index `j * n_i + i`.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::geometry::predicates::Point2;
use crate::io::MeshData;
use crate::mesh_error::MeshError;

/// Corner node ids of every cell of an `ni`×`nj` structured block.
fn block_quads(ni: usize, nj: usize) -> Vec<[usize; 4]> {
    let row_stride = ni + 1;
    let mut quads = Vec::with_capacity(ni * nj);
    for j in 0..nj {
        for i in 0..ni {
            let v0 = j * row_stride + i;
            let v1 = v0 + 1;
            let v3 = v0 + row_stride;
            let v2 = v3 + 1;
            quads.push([v0, v1, v2, v3]);
        }
    }
    quads
}

#[inline]
fn lerp(a: Point2, b: Point2, t: f64) -> Point2 {
    [a[0] + (b[0] - a[0]) * t, a[1] + (b[1] - a[1]) * t]
}

/// Generate a structured grid over `[min, max]` with `nx`×`ny` cells.
pub fn quad_grid(nx: usize, ny: usize, min: Point2, max: Point2) -> Result<MeshData, MeshError> {
    if nx == 0 || ny == 0 {
        return Err(MeshError::invalid_geometry("nx and ny must be positive"));
    }
    if !(max[0] > min[0] && max[1] > min[1]) {
        return Err(MeshError::invalid_geometry(format!(
            "empty or inverted box {min:?}..{max:?}"
        )));
    }

    let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        let y = min[1] + (max[1] - min[1]) * j as f64 / ny as f64;
        for i in 0..=nx {
            let x = min[0] + (max[0] - min[0]) * i as f64 / nx as f64;
            nodes.push([x, y]);
        }
    }

    let data = MeshData::from_quads(nodes, &block_quads(nx, ny))?;
    data.debug_assert_invariants();
    Ok(data)
}

/// Quarter of a square plate with a circular hole at the origin.
///
/// The domain is `[0, side]²` minus the disc of `radius`. Node rows run
/// radially from the hole (`i = 0`) to the outer square (`i = n_radial`),
/// one row per angle `θ_j = (π/2)·j/n_angular`, so `j = 0` lies on the x
/// axis and `j = n_angular` on the y axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateWithHole {
    pub radius: f64,
    pub side: f64,
    pub n_radial: usize,
    pub n_angular: usize,
}

impl Default for PlateWithHole {
    fn default() -> Self {
        Self {
            radius: 0.3,
            side: 1.0,
            n_radial: 10,
            n_angular: 10,
        }
    }
}

impl PlateWithHole {
    pub fn generate(&self) -> Result<MeshData, MeshError> {
        let &Self {
            radius,
            side,
            n_radial,
            n_angular,
        } = self;
        if n_radial == 0 || n_angular == 0 {
            return Err(MeshError::invalid_geometry(
                "n_radial and n_angular must be positive",
            ));
        }
        if !(radius > 0.0 && radius < side) {
            return Err(MeshError::invalid_geometry(format!(
                "hole radius {radius} must lie in (0, {side})"
            )));
        }

        let mut nodes = Vec::with_capacity((n_radial + 1) * (n_angular + 1));
        for j in 0..=n_angular {
            // exact axis directions at both ends
            let (sin, cos) = match j {
                0 => (0.0, 1.0),
                j if j == n_angular => (1.0, 0.0),
                j => (FRAC_PI_2 * j as f64 / n_angular as f64).sin_cos(),
            };
            let inner = [radius * cos, radius * sin];
            // ray hits the right side below the diagonal, the top side above
            let outer = if 2 * j <= n_angular {
                [side, side * sin / cos]
            } else {
                [side * cos / sin, side]
            };
            for i in 0..=n_radial {
                nodes.push(lerp(inner, outer, i as f64 / n_radial as f64));
            }
        }

        let data = MeshData::from_quads(nodes, &block_quads(n_radial, n_angular))?;
        data.debug_assert_invariants();
        log::debug!(
            "plate with hole: r = {radius}, side = {side}, {} cells",
            data.cell_count()
        );
        Ok(data)
    }
}

/// Shorthand for [`PlateWithHole::generate`].
pub fn plate_with_hole(
    radius: f64,
    side: f64,
    n_radial: usize,
    n_angular: usize,
) -> Result<MeshData, MeshError> {
    PlateWithHole {
        radius,
        side,
        n_radial,
        n_angular,
    }
    .generate()
}
