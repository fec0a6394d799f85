mod util;

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use quadmesh::locate::{BruteForceLocator, PreselectionLocator, StepsLocator};
use quadmesh::mesh_generation::quad_grid;
use quadmesh::topology::QuadMesh;
use util::{assert_walk, edge_clearance, plate};

/// Points closer than this to an edge line may legitimately resolve
/// differently per strategy.
const CLEARANCE: f64 = 1e-5;

proptest! {
    #[test]
    fn strategies_agree_off_edges(
        x in -0.1f64..1.1,
        y in -0.1f64..1.1,
        start in 0usize..100,
    ) {
        let mesh = plate();
        let p = [x, y];
        prop_assume!(edge_clearance(&mesh, p) > CLEARANCE);

        let brute = BruteForceLocator::new(&mesh).locate(p);
        let pre = PreselectionLocator::new(&mesh).locate(p);
        let mut steps = StepsLocator::new(&mesh);
        steps.set_anchor(start).unwrap();
        let walked = steps.search(p).unwrap();

        prop_assert_eq!(brute, pre);
        prop_assert_eq!(brute, walked);
        if let Some(cell) = walked {
            prop_assert_eq!(steps.path().last(), Some(&cell));
            assert_walk(&mesh, steps.path());
        }
    }

    #[test]
    fn grid_cells_hold_their_interior(
        nx in 1usize..8,
        ny in 1usize..8,
        u in 0.01f64..0.99,
        v in 0.01f64..0.99,
    ) {
        let mesh = QuadMesh::new(quad_grid(nx, ny, [-1.0, 2.0], [3.0, 2.5]).unwrap()).unwrap();
        let (i, j) = (nx / 2, ny / 2);
        let p = [
            -1.0 + 4.0 * (i as f64 + u) / nx as f64,
            2.0 + 0.5 * (j as f64 + v) / ny as f64,
        ];
        let cell = j * nx + i;
        prop_assert_eq!(BruteForceLocator::new(&mesh).locate(p), Some(cell));
        prop_assert_eq!(StepsLocator::new(&mesh).search(p).unwrap(), Some(cell));
    }
}

#[test]
fn walking_stream_matches_scan() {
    let mesh = plate();
    let brute = BruteForceLocator::new(&mesh);
    let mut steps = StepsLocator::new(&mesh);
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let mut checked = 0;
    for _ in 0..2000 {
        let p = [rng.gen_range(-0.1..1.1), rng.gen_range(-0.1..1.1)];
        if edge_clearance(&mesh, p) <= CLEARANCE {
            continue;
        }
        // the anchor carries over between queries
        assert_eq!(steps.search(p).unwrap(), brute.locate(p), "at {p:?}");
        checked += 1;
    }
    assert!(checked > 1900);
}
