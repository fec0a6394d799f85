//! Edge adjacency between quadrilateral cells.
//
// Edge `i` of a cell joins corner `i` to corner `(i + 1) % 4`. Two cells share
// an edge when, at a common node, the node *after* it in one cell is the node
// *before* it in the other (consistent CCW orientation makes shared edges run
// in opposite directions). Only incidences of the same node are compared, so
// the cost is Σ d² over node degrees d.

use itertools::Itertools;

#[inline]
pub(crate) fn next_slot(slot: usize) -> usize {
    (slot + 1) % 4
}

#[inline]
pub(crate) fn prev_slot(slot: usize) -> usize {
    (slot + 3) % 4
}

/// Build the per-cell neighbour table.
///
/// `neighbours[c][e]` is the cell across edge `e` of cell `c`, or
/// `cells.len()` when that edge is on the boundary.
///
/// # Panics
/// Panics if a cell references a node id `>= node_count`.
/// [`QuadMesh`](super::quad_mesh::QuadMesh) validates ids before calling this.
pub fn compute_neighbours(cells: &[[usize; 4]], node_count: usize) -> Vec<[usize; 4]> {
    let none = cells.len();

    // node → (cell, corner slot) incidences, in cell order
    let mut incident: Vec<Vec<(usize, usize)>> = vec![Vec::new(); node_count];
    for (cell_id, cell) in cells.iter().enumerate() {
        for (slot, &node) in cell.iter().enumerate() {
            incident[node].push((cell_id, slot));
        }
    }

    let mut neighbours = vec![[none; 4]; cells.len()];
    for incidences in &incident {
        for (&first, &second) in incidences.iter().tuple_combinations() {
            link_if_shared(cells, &mut neighbours, first, second);
            link_if_shared(cells, &mut neighbours, second, first);
        }
    }

    log::debug!(
        "neighbour table: {} cells, {} boundary edges",
        cells.len(),
        neighbours.iter().flatten().filter(|&&n| n == none).count()
    );
    neighbours
}

/// Link `a` and `b` if the edge leaving the shared node in `a` is the edge
/// entering it in `b`.
fn link_if_shared(
    cells: &[[usize; 4]],
    neighbours: &mut [[usize; 4]],
    (cell_a, slot_a): (usize, usize),
    (cell_b, slot_b): (usize, usize),
) {
    if cell_a == cell_b {
        return;
    }
    let edge_b = prev_slot(slot_b);
    if cells[cell_a][next_slot(slot_a)] == cells[cell_b][edge_b] {
        neighbours[cell_a][slot_a] = cell_b;
        neighbours[cell_b][edge_b] = cell_a;
    }
}
