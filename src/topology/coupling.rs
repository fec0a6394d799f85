//! Symmetric area-coupling matrix over mesh nodes.
//!
//! Each cell contributes a 4×4 block `K[i][j] * (S + trS[i] + trS[j])` to the
//! rows and columns of its four nodes, where `K` is
//! [`AREA_COUPLING_KERNEL`]. Collaborators use the assembled matrix for
//! consistent nodal projection of cell-wise values.
//!
//! Storage is CSR (`row_ptr[i]..row_ptr[i + 1]` indexes the sorted columns of
//! row `i`), so memory scales with mesh connectivity instead of N².

use std::collections::BTreeMap;

/// Per-cell kernel; already divided by 6.
pub const AREA_COUPLING_KERNEL: [[f64; 4]; 4] = [
    [2.0 / 6.0, 1.0 / 6.0, 0.5 / 6.0, 1.0 / 6.0],
    [1.0 / 6.0, 2.0 / 6.0, 1.0 / 6.0, 0.5 / 6.0],
    [0.5 / 6.0, 1.0 / 6.0, 2.0 / 6.0, 1.0 / 6.0],
    [1.0 / 6.0, 0.5 / 6.0, 1.0 / 6.0, 2.0 / 6.0],
];

/// Square sparse matrix in CSR layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingMatrix {
    dim: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl CouplingMatrix {
    /// Number of rows (= columns = mesh nodes).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Entry `(row, col)`; zero when not stored or out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let (cols, vals) = self.row(row);
        match cols.binary_search(&col) {
            Ok(k) => vals[k],
            Err(_) => 0.0,
        }
    }

    /// Column indices and values of `row`; empty when out of range.
    pub fn row(&self, row: usize) -> (&[usize], &[f64]) {
        if row >= self.dim {
            return (&self.col_idx[..0], &self.values[..0]);
        }
        let range = self.row_ptr[row]..self.row_ptr[row + 1];
        (&self.col_idx[range.clone()], &self.values[range])
    }

    /// Stored entries as `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.dim).flat_map(move |r| {
            let (cols, vals) = self.row(r);
            cols.iter().zip(vals).map(move |(&c, &v)| (r, c, v))
        })
    }

    /// Matrix-vector product. `x` must have length [`dim`](Self::dim).
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.dim);
        (0..self.dim)
            .map(|r| {
                let (cols, vals) = self.row(r);
                cols.iter().zip(vals).map(|(&c, &v)| v * x[c]).sum()
            })
            .collect()
    }

    /// Dense row-major copy; intended for small meshes and tests.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let mut dense = vec![vec![0.0; self.dim]; self.dim];
        for (r, c, v) in self.iter() {
            dense[r][c] = v;
        }
        dense
    }

    /// `true` if every stored `(i, j)` matches `(j, i)` within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.iter().all(|(r, c, v)| (v - self.get(c, r)).abs() <= tol)
    }
}

/// Assemble the area-coupling matrix of a mesh.
///
/// Entries touched by several cells accumulate. Node ids must be
/// `< node_count`, and the three per-cell slices must have equal length.
pub fn assemble_area_coupling(
    node_count: usize,
    cells: &[[usize; 4]],
    areas: &[f64],
    corner_areas: &[[f64; 4]],
) -> CouplingMatrix {
    let mut rows: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); node_count];
    for ((cell, &area), tr) in cells.iter().zip(areas).zip(corner_areas) {
        for i in 0..4 {
            for j in 0..4 {
                let value = AREA_COUPLING_KERNEL[i][j] * (area + tr[i] + tr[j]);
                *rows[cell[i]].entry(cell[j]).or_insert(0.0) += value;
            }
        }
    }

    let mut row_ptr = Vec::with_capacity(node_count + 1);
    let mut col_idx = Vec::new();
    let mut values = Vec::new();
    row_ptr.push(0);
    for row in rows {
        for (col, value) in row {
            col_idx.push(col);
            values.push(value);
        }
        row_ptr.push(col_idx.len());
    }
    log::debug!(
        "area coupling matrix: {node_count}x{node_count}, {} stored entries",
        values.len()
    );

    CouplingMatrix {
        dim: node_count,
        row_ptr,
        col_idx,
        values,
    }
}
