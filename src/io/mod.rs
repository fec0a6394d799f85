//! Construction record handed over by mesh readers.
//!
//! File parsing lives outside this crate; readers produce a [`MeshData`]
//! (optionally through [`NodeIdMap`] and [`normalize_quad`]) and the
//! topology layer takes it from there.

pub mod node_ids;
pub mod normalize;

pub use node_ids::NodeIdMap;
pub use normalize::{NormalizedQuad, normalize_quad};

use crate::geometry::predicates::Point2;
use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};

/// Raw node/cell arrays of a quadrilateral mesh.
///
/// Every cell lists its 4 node ids counter-clockwise, with the vertex
/// centroid inside triangle `(n1, n2, n3)`. `areas[c]` is the cell area and
/// `corner_areas[c][i]` the area of the triangle at corner `i`. None of this
/// is checked here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub nodes: Vec<Point2>,
    pub cells: Vec<[usize; 4]>,
    pub areas: Vec<f64>,
    pub corner_areas: Vec<[f64; 4]>,
}

impl MeshData {
    pub fn new(
        nodes: Vec<Point2>,
        cells: Vec<[usize; 4]>,
        areas: Vec<f64>,
        corner_areas: Vec<[f64; 4]>,
    ) -> Self {
        Self {
            nodes,
            cells,
            areas,
            corner_areas,
        }
    }

    /// Build a record from raw quads in arbitrary corner order.
    ///
    /// Each quad goes through [`normalize_quad`], which fixes orientation,
    /// picks the diagonal split and fills in the area arrays.
    pub fn from_quads(nodes: Vec<Point2>, quads: &[[usize; 4]]) -> Result<Self, MeshError> {
        let mut cells = Vec::with_capacity(quads.len());
        let mut areas = Vec::with_capacity(quads.len());
        let mut corner_areas = Vec::with_capacity(quads.len());
        for (cell, quad) in quads.iter().enumerate() {
            if let Some(&node) = quad.iter().find(|&&n| n >= nodes.len()) {
                return Err(MeshError::NodeIndexOutOfRange {
                    cell,
                    node,
                    node_count: nodes.len(),
                });
            }
            let normalized = normalize_quad(&nodes, *quad)?;
            cells.push(normalized.cell);
            areas.push(normalized.area);
            corner_areas.push(normalized.corner_areas);
        }
        log::debug!(
            "normalized {} quads over {} nodes",
            cells.len(),
            nodes.len()
        );
        Ok(Self::new(nodes, cells, areas, corner_areas))
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
