#![cfg_attr(docsrs, feature(doc_cfg))]
//! # quadmesh
//!
//! quadmesh holds the topology of 2D quadrilateral meshes and answers the
//! question "which cell contains this point?" for finite-element codes that
//! interpolate fields at arbitrary locations.
//!
//! ## Features
//! - [`QuadMesh`](topology::QuadMesh): immutable node/cell arrays with lazily
//!   memoized corner coordinates, cell centers, edge adjacency and the nodal
//!   area-coupling matrix
//! - Three interchangeable point locators behind
//!   [`PointLocator`](locate::PointLocator): exhaustive scan, bounding-box
//!   preselection and a directed walk through neighbouring cells
//! - Quad normalization, external node-id remapping and structured generators
//!   for building meshes
//! - Opt-in validation of the geometric construction preconditions
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! quadmesh = "0.1"
//! # Optional features:
//! # features = ["rayon", "check-invariants"]
//! ```
//!
//! ## Conventions
//! Cells list their 4 node ids counter-clockwise; edge `e` joins corner `e`
//! to corner `(e + 1) % 4`. Boundary edges store the cell count as their
//! neighbour. Searches report a miss as `Ok(None)`; points on shared edges
//! may resolve to any incident cell.
//!
//! The library logs through the `log` facade and never installs a logger.

pub mod debug_invariants;
pub mod geometry;
pub mod io;
pub mod locate;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::predicates::{Point2, contains_point, orient2d};
    pub use crate::io::{MeshData, NodeIdMap};
    pub use crate::locate::{
        BruteForceLocator, Locator, LocatorConfig, PointLocator, PreselectionLocator,
        StepsLocator, Strategy, WalkConfig,
    };
    pub use crate::mesh_error::MeshError;
    pub use crate::mesh_generation::{PlateWithHole, quad_grid};
    pub use crate::topology::{CouplingMatrix, QuadMesh};
}
