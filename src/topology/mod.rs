//! Quadrilateral mesh topology.
//!
//! This module provides:
//! - [`QuadMesh`], the immutable node/cell arrays plus memoized geometry
//! - Edge adjacency between cells (`neighbours`)
//! - The symmetric area-coupling matrix used for nodal projection (`coupling`)

pub mod coupling;
pub mod neighbours;
pub mod quad_mesh;

pub use coupling::CouplingMatrix;
pub use quad_mesh::QuadMesh;
