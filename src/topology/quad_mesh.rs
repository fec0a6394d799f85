//! [`QuadMesh`]: immutable quadrilateral mesh with memoized derived data.
//!
//! Node and cell arrays never change after construction, so every derived
//! structure is computed at most once and kept for the mesh's lifetime.
//! The caches sit in `once_cell::sync::OnceCell`, which makes lazy
//! population safe even when the mesh is shared between threads; callers
//! that prefer paying up front can call [`QuadMesh::precompute`].
//!
//! # Examples
//! ```rust
//! use quadmesh::io::MeshData;
//! use quadmesh::topology::quad_mesh::QuadMesh;
//!
//! // 3---2---5
//! // | 0 | 1 |
//! // 0---1---4
//! let nodes = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [2.0, 0.0], [2.0, 1.0]];
//! let data = MeshData::from_quads(nodes, &[[0, 1, 2, 3], [1, 4, 5, 2]])?;
//! let mesh = QuadMesh::new(data)?;
//!
//! assert_eq!(mesh.centers()[1], [1.5, 0.5]);
//! assert_eq!(mesh.max_diff_bound(), [0.5, 0.5]);
//! let across: Vec<_> = (0..4).filter_map(|e| mesh.neighbour(0, e)).collect();
//! assert_eq!(across, vec![1]);
//! # Ok::<(), quadmesh::mesh_error::MeshError>(())
//! ```

use once_cell::sync::OnceCell;
use static_assertions::assert_impl_all;

use super::coupling::{CouplingMatrix, assemble_area_coupling};
use super::neighbours::compute_neighbours;
use crate::geometry::predicates::{Point2, centroid, orient2d};
use crate::io::MeshData;
use crate::mesh_error::MeshError;

/// A 2D mesh of quadrilateral cells.
#[derive(Clone, Debug)]
pub struct QuadMesh {
    nodes: Vec<Point2>,
    cells: Vec<[usize; 4]>,
    areas: Vec<f64>,
    corner_areas: Vec<[f64; 4]>,

    coords: OnceCell<Vec<[Point2; 4]>>,
    centers: OnceCell<Vec<Point2>>,
    max_diff: OnceCell<Point2>,
    neighbours: OnceCell<Vec<[usize; 4]>>,
    coupling: OnceCell<CouplingMatrix>,
}

assert_impl_all!(QuadMesh: Send, Sync);

impl QuadMesh {
    /// Take ownership of a construction record.
    ///
    /// Only structural consistency is checked: the per-cell arrays must have
    /// equal length and every node id must exist. Geometry (orientation,
    /// corner order, positive area) is the caller's responsibility.
    pub fn new(data: MeshData) -> Result<Self, MeshError> {
        let MeshData {
            nodes,
            cells,
            areas,
            corner_areas,
        } = data;
        Self::from_parts(nodes, cells, areas, corner_areas)
    }

    pub fn from_parts(
        nodes: Vec<Point2>,
        cells: Vec<[usize; 4]>,
        areas: Vec<f64>,
        corner_areas: Vec<[f64; 4]>,
    ) -> Result<Self, MeshError> {
        if areas.len() != cells.len() {
            return Err(MeshError::LengthMismatch {
                field: "areas",
                expected: cells.len(),
                found: areas.len(),
            });
        }
        if corner_areas.len() != cells.len() {
            return Err(MeshError::LengthMismatch {
                field: "corner_areas",
                expected: cells.len(),
                found: corner_areas.len(),
            });
        }
        for (cell, ids) in cells.iter().enumerate() {
            if let Some(&node) = ids.iter().find(|&&n| n >= nodes.len()) {
                return Err(MeshError::NodeIndexOutOfRange {
                    cell,
                    node,
                    node_count: nodes.len(),
                });
            }
        }
        log::debug!("QuadMesh: {} nodes, {} cells", nodes.len(), cells.len());
        Ok(Self {
            nodes,
            cells,
            areas,
            corner_areas,
            coords: OnceCell::new(),
            centers: OnceCell::new(),
            max_diff: OnceCell::new(),
            neighbours: OnceCell::new(),
            coupling: OnceCell::new(),
        })
    }

    /// Give the raw arrays back.
    pub fn into_data(self) -> MeshData {
        MeshData::new(self.nodes, self.cells, self.areas, self.corner_areas)
    }

    // --- raw data ----------------------------------------------------------

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &[Point2] {
        &self.nodes
    }

    #[inline]
    pub fn cells(&self) -> &[[usize; 4]] {
        &self.cells
    }

    /// Cell areas (`S`).
    #[inline]
    pub fn areas(&self) -> &[f64] {
        &self.areas
    }

    /// Corner-triangle areas (`trS`).
    #[inline]
    pub fn corner_areas(&self) -> &[[f64; 4]] {
        &self.corner_areas
    }

    /// Sentinel stored in [`neighbours`](Self::neighbours) for boundary
    /// edges: the cell count, one past the last valid index.
    #[inline]
    pub fn no_neighbour(&self) -> usize {
        self.cells.len()
    }

    // --- derived data ------------------------------------------------------

    /// Corner coordinates of every cell.
    pub fn coords(&self) -> &[[Point2; 4]] {
        self.coords.get_or_init(|| {
            log::trace!("gathering corner coordinates");
            self.cells
                .iter()
                .map(|cell| cell.map(|n| self.nodes[n]))
                .collect()
        })
    }

    pub fn cell_coords(&self, cell: usize) -> Result<&[Point2; 4], MeshError> {
        self.check_cell(cell)?;
        Ok(&self.coords()[cell])
    }

    /// Vertex centroid of every cell.
    pub fn centers(&self) -> &[Point2] {
        self.centers.get_or_init(|| {
            log::trace!("computing cell centers");
            self.coords().iter().map(|c| centroid(c)).collect()
        })
    }

    /// Per-axis maximum distance from any cell's center to its own corners.
    ///
    /// One bound for the whole mesh: for every cell, all corners lie within
    /// `center ± bound`. Zero for an empty mesh.
    pub fn max_diff_bound(&self) -> Point2 {
        *self.max_diff.get_or_init(|| {
            let bound = self
                .centers()
                .iter()
                .zip(self.coords())
                .flat_map(|(c, corners)| corners.iter().map(move |p| (c, p)))
                .fold([0.0_f64, 0.0_f64], |acc, (c, p)| {
                    [
                        acc[0].max((c[0] - p[0]).abs()),
                        acc[1].max((c[1] - p[1]).abs()),
                    ]
                });
            log::trace!("max center-to-corner offset: {bound:?}");
            bound
        })
    }

    /// Cell across each edge, or [`no_neighbour`](Self::no_neighbour).
    ///
    /// Edge `e` joins corner `e` to corner `(e + 1) % 4`.
    pub fn neighbours(&self) -> &[[usize; 4]] {
        self.neighbours
            .get_or_init(|| compute_neighbours(&self.cells, self.nodes.len()))
    }

    /// Cell across edge `edge` of `cell`; `None` on the boundary or for
    /// out-of-range arguments.
    pub fn neighbour(&self, cell: usize, edge: usize) -> Option<usize> {
        let next = *self.neighbours().get(cell)?.get(edge)?;
        (next != self.no_neighbour()).then_some(next)
    }

    pub fn area_coupling_matrix(&self) -> &CouplingMatrix {
        self.coupling.get_or_init(|| {
            assemble_area_coupling(
                self.nodes.len(),
                &self.cells,
                &self.areas,
                &self.corner_areas,
            )
        })
    }

    /// Populate every cache now.
    pub fn precompute(&self) {
        self.coords();
        self.centers();
        self.max_diff_bound();
        self.neighbours();
        self.area_coupling_matrix();
    }

    // --- queries -----------------------------------------------------------

    /// Corner slots of the half of `cell` (split on the corner 0–2 diagonal)
    /// that contains `point`: `[0, 2, 3]` or `[0, 1, 2]`.
    ///
    /// `point` is assumed to lie in `cell`; that is not re-checked.
    pub fn triangle_corners(&self, point: Point2, cell: usize) -> Result<[usize; 3], MeshError> {
        let corners = self.cell_coords(cell)?;
        if orient2d(point, corners[0], corners[2]) > 0.0 {
            Ok([0, 2, 3])
        } else {
            Ok([0, 1, 2])
        }
    }

    /// Node ids of the triangle from [`triangle_corners`](Self::triangle_corners).
    pub fn triangle(&self, point: Point2, cell: usize) -> Result<[usize; 3], MeshError> {
        let slots = self.triangle_corners(point, cell)?;
        let ids = self.cells[cell];
        Ok(slots.map(|s| ids[s]))
    }

    fn check_cell(&self, cell: usize) -> Result<(), MeshError> {
        if cell < self.cells.len() {
            Ok(())
        } else {
            Err(MeshError::CellIndexOutOfRange {
                cell,
                cell_count: self.cells.len(),
            })
        }
    }
}
