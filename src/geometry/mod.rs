//! Geometry utilities for quadmesh.
//!
//! Orientation and containment predicates shared by topology and point
//! location.

pub mod predicates;

pub use predicates::Point2;
