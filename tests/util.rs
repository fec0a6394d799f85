#![allow(dead_code)]
use quadmesh::geometry::predicates::{Point2, orient2d};
use quadmesh::io::MeshData;
use quadmesh::mesh_generation::plate_with_hole;
use quadmesh::topology::QuadMesh;

/// Three quads fanned around the origin: the unit square `0-1-2-3`, a
/// parallelogram below it and a trapezoid to the left.
pub fn fan() -> QuadMesh {
    let nodes = vec![
        [0.0, 0.0],
        [1.0, 0.0],
        [1.0, 1.0],
        [0.0, 1.0],
        [-1.0, 1.0],
        [-1.0, -1.0],
        [0.0, -1.0],
    ];
    let quads = [[0, 1, 2, 3], [0, 5, 6, 1], [0, 3, 4, 5]];
    QuadMesh::new(MeshData::from_quads(nodes, &quads).unwrap()).unwrap()
}

/// 10×10 quarter plate with a hole of radius 0.3 in the unit square.
pub fn plate() -> QuadMesh {
    QuadMesh::new(plate_with_hole(0.3, 1.0, 10, 10).unwrap()).unwrap()
}

/// Cells having `node` as a corner.
pub fn cells_at_node(mesh: &QuadMesh, node: usize) -> Vec<usize> {
    (0..mesh.cell_count())
        .filter(|&c| mesh.cells()[c].contains(&node))
        .collect()
}

/// Smallest distance from `point` to the supporting line of any cell edge.
pub fn edge_clearance(mesh: &QuadMesh, point: Point2) -> f64 {
    mesh.coords()
        .iter()
        .flat_map(|corners| (0..4).map(move |e| (corners[e], corners[(e + 1) % 4])))
        .map(|(a, b)| {
            let len = ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2)).sqrt();
            orient2d(a, b, point).abs() / len
        })
        .fold(f64::INFINITY, f64::min)
}

/// Every consecutive pair of `path` must be edge neighbours.
pub fn assert_walk(mesh: &QuadMesh, path: &[usize]) {
    for w in path.windows(2) {
        assert!(
            mesh.neighbours()[w[0]].contains(&w[1]),
            "{} -> {} is not a neighbour step in {path:?}",
            w[0],
            w[1]
        );
    }
}
