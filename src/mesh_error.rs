//! MeshError: unified error type for quadmesh public APIs.
//!
//! Construction only performs structural checks (lengths and node ranges);
//! geometric preconditions are reported by
//! [`DebugInvariants`](crate::debug_invariants::DebugInvariants) on request.

use thiserror::Error;

/// Unified error type for quadmesh operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Two construction arrays disagree on the number of cells.
    #[error("length mismatch for `{field}`: expected {expected}, got {found}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// A cell references a node id outside `0..node_count`.
    #[error("cell {cell} references node {node}, but the mesh has {node_count} nodes")]
    NodeIndexOutOfRange {
        cell: usize,
        node: usize,
        node_count: usize,
    },
    /// A cell index outside `0..cell_count` was passed to a query.
    #[error("cell index {cell} out of range (mesh has {cell_count} cells)")]
    CellIndexOutOfRange { cell: usize, cell_count: usize },
    /// An external node identifier was registered twice.
    #[error("duplicate external node id `{0}`")]
    DuplicateNodeId(String),
    /// An external node identifier was never registered.
    #[error("unknown external node id `{0}`")]
    UnknownNodeId(String),
    /// Degenerate, inverted or otherwise unusable geometry.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Neighbour table is not symmetric across an edge.
    #[error("asymmetric adjacency: cell {cell} edge {edge} points to {neighbour}, which does not point back")]
    AsymmetricAdjacency {
        cell: usize,
        edge: usize,
        neighbour: usize,
    },
    /// The directed walk exhausted its step or restart budget.
    #[error("point location did not converge after {steps} steps and {restarts} restarts")]
    NonConvergentSearch { steps: usize, restarts: usize },
}

impl MeshError {
    pub(crate) fn invalid_geometry(message: impl Into<String>) -> Self {
        MeshError::InvalidGeometry(message.into())
    }
}
