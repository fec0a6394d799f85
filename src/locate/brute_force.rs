//! Exhaustive scan: test every cell in index order.

use super::{PointLocator, Strategy, is_finite_point, map_points};
use crate::geometry::predicates::{Point2, contains_point};
use crate::mesh_error::MeshError;
use crate::topology::QuadMesh;

/// Returns the first cell (by index) whose corners contain the point.
#[derive(Debug, Clone, Copy)]
pub struct BruteForceLocator<'m> {
    coords: &'m [[Point2; 4]],
}

impl<'m> BruteForceLocator<'m> {
    pub fn new(mesh: &'m QuadMesh) -> Self {
        Self {
            coords: mesh.coords(),
        }
    }

    pub fn locate(&self, point: Point2) -> Option<usize> {
        if !is_finite_point(point) {
            return None;
        }
        self.coords
            .iter()
            .position(|corners| contains_point(point, corners))
    }

    pub fn search_many(&self, points: &[Point2]) -> Vec<Option<usize>> {
        map_points(points, |p| self.locate(p))
    }
}

impl PointLocator for BruteForceLocator<'_> {
    #[inline]
    fn search(&mut self, point: Point2) -> Result<Option<usize>, MeshError> {
        Ok(self.locate(point))
    }

    fn strategy(&self) -> Strategy {
        Strategy::BruteForce
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MeshData;

    #[test]
    fn first_match_wins_on_shared_edge() {
        // 3---2---5
        // | 0 | 1 |
        // 0---1---4
        let nodes = vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [2.0, 0.0],
            [2.0, 1.0],
        ];
        let data = MeshData::from_quads(nodes, &[[0, 1, 2, 3], [1, 4, 5, 2]]).unwrap();
        let mesh = QuadMesh::new(data).unwrap();
        let locator = BruteForceLocator::new(&mesh);
        assert_eq!(locator.locate([1.0, 0.5]), Some(0));
        assert_eq!(
            locator.search_many(&[[0.5, 0.5], [1.5, 0.5], [3.0, 0.5]]),
            vec![Some(0), Some(1), None]
        );
    }

    #[test]
    fn empty_mesh_finds_nothing() {
        let mesh = QuadMesh::new(MeshData::default()).unwrap();
        let mut locator = BruteForceLocator::new(&mesh);
        assert_eq!(locator.search([0.0, 0.0]).unwrap(), None);
    }
}
