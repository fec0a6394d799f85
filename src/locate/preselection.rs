//! Scan with a bounding-box pre-filter.
//!
//! Every corner of every cell lies within `center ± max_diff_bound` of its
//! own cell center, so a cell can only contain `p` if `|center - p|` is within
//! the bound on both axes. Cells that pass this cheap test get the exact
//! containment test, in index order.

use super::{PointLocator, Strategy, is_finite_point, map_points};
use crate::geometry::predicates::{Point2, contains_point};
use crate::mesh_error::MeshError;
use crate::topology::QuadMesh;

#[derive(Debug, Clone, Copy)]
pub struct PreselectionLocator<'m> {
    coords: &'m [[Point2; 4]],
    centers: &'m [Point2],
    bound: Point2,
}

impl<'m> PreselectionLocator<'m> {
    pub fn new(mesh: &'m QuadMesh) -> Self {
        Self {
            coords: mesh.coords(),
            centers: mesh.centers(),
            bound: mesh.max_diff_bound(),
        }
    }

    /// Cells whose center lies within the bound of `point`, in index order.
    pub fn candidates(&self, point: Point2) -> impl Iterator<Item = usize> + '_ {
        let bound = self.bound;
        self.centers.iter().enumerate().filter_map(move |(i, c)| {
            ((c[0] - point[0]).abs() <= bound[0] && (c[1] - point[1]).abs() <= bound[1])
                .then_some(i)
        })
    }

    pub fn locate(&self, point: Point2) -> Option<usize> {
        if !is_finite_point(point) {
            return None;
        }
        self.candidates(point)
            .find(|&i| contains_point(point, &self.coords[i]))
    }

    pub fn search_many(&self, points: &[Point2]) -> Vec<Option<usize>> {
        map_points(points, |p| self.locate(p))
    }
}

impl PointLocator for PreselectionLocator<'_> {
    #[inline]
    fn search(&mut self, point: Point2) -> Result<Option<usize>, MeshError> {
        Ok(self.locate(point))
    }

    fn strategy(&self) -> Strategy {
        Strategy::Preselection
    }
}
