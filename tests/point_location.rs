mod util;

use quadmesh::locate::{
    BruteForceLocator, Locator, LocatorConfig, NOT_FOUND, PointLocator, PreselectionLocator,
    StepsLocator, Strategy, WalkConfig, cross_check, raw_index,
};
use quadmesh::mesh_error::MeshError;
use quadmesh::topology::QuadMesh;
use util::{assert_walk, cells_at_node, fan, plate};

const STRATEGIES: [Strategy; 3] = [Strategy::BruteForce, Strategy::Preselection, Strategy::Steps];

fn locator(mesh: &QuadMesh, strategy: Strategy) -> Locator<'_> {
    Locator::new(
        mesh,
        &LocatorConfig {
            strategy,
            ..Default::default()
        },
    )
}

#[test]
fn plate_centroids_resolve_to_their_cell() {
    let mesh = plate();
    for strategy in STRATEGIES {
        let mut loc = locator(&mesh, strategy);
        for c in [5, 36, 17] {
            assert_eq!(loc.search(mesh.centers()[c]).unwrap(), Some(c), "{strategy:?}");
        }
    }
}

#[test]
fn every_centroid_under_every_strategy() {
    for mesh in [fan(), plate()] {
        for strategy in STRATEGIES {
            let mut loc = locator(&mesh, strategy);
            // reverse order so the walk has to travel
            for c in (0..mesh.cell_count()).rev() {
                assert_eq!(loc.search(mesh.centers()[c]).unwrap(), Some(c));
            }
        }
    }
}

#[test]
fn perturbed_centroid_stays_in_cell() {
    let mesh = plate();
    let [x, y] = mesh.centers()[20];
    for strategy in STRATEGIES {
        let mut loc = locator(&mesh, strategy);
        assert_eq!(loc.search([x * 1.1, y * 1.1]).unwrap(), Some(20));
    }
}

#[test]
fn points_outside_the_plate() {
    let mesh = plate();
    for strategy in STRATEGIES {
        let mut loc = locator(&mesh, strategy);
        // inside the hole, then beyond either side of the square
        for p in [[0.0, 0.0], [1.1, 0.0], [0.0, 1.1], [0.1, 0.1], [-5.0, 40.0]] {
            let found = loc.search(p).unwrap();
            assert_eq!(found, None, "{strategy:?} at {p:?}");
            assert_eq!(raw_index(found), NOT_FOUND);
        }
    }
}

#[test]
fn nodes_resolve_to_an_incident_cell() {
    let mesh = plate();
    for strategy in STRATEGIES {
        let mut loc = locator(&mesh, strategy);
        for (node, &p) in mesh.nodes().iter().enumerate() {
            let incident = cells_at_node(&mesh, node);
            let found = loc.search(p).unwrap().expect("mesh nodes are inside");
            assert!(
                incident.contains(&found),
                "{strategy:?}: node {node} -> {found}, expected one of {incident:?}"
            );
        }
    }
}

#[test]
fn shared_edge_midpoints_resolve_to_either_side() {
    let mesh = plate();
    let none = mesh.no_neighbour();
    for strategy in STRATEGIES {
        let mut loc = locator(&mesh, strategy);
        for c in 0..mesh.cell_count() {
            let corners = mesh.coords()[c];
            for e in 0..4 {
                let other = mesh.neighbours()[c][e];
                if other == none {
                    continue;
                }
                let (a, b) = (corners[e], corners[(e + 1) % 4]);
                let mid = [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0];
                let found = loc.search(mid).unwrap();
                assert!(
                    found == Some(c) || found == Some(other),
                    "{strategy:?}: edge {c}/{e} -> {found:?}"
                );
            }
        }
    }
}

#[test]
fn fan_lookup() {
    let mesh = fan();
    for strategy in STRATEGIES {
        let mut loc = locator(&mesh, strategy);
        assert_eq!(loc.search([0.9, 0.1]).unwrap(), Some(0));
        assert_eq!(loc.search([0.2, -0.5]).unwrap(), Some(1));
        assert_eq!(loc.search([-0.9, 0.9]).unwrap(), Some(2));
        // right of the parallelogram, below the square
        assert_eq!(loc.search([0.9, -0.5]).unwrap(), None);
    }
}

#[test]
fn walk_path_follows_neighbours() {
    let mesh = plate();
    let mut steps = StepsLocator::new(&mesh);
    steps.set_anchor(0).unwrap();
    assert_eq!(steps.search(mesh.centers()[99]).unwrap(), Some(99));
    let path = steps.path();
    assert_eq!(path.first(), Some(&0));
    assert_eq!(path.last(), Some(&99));
    assert_walk(&mesh, path);
    assert_eq!(steps.last_stats().restarts, 0);
    assert_eq!(steps.last_stats().steps, path.len() - 1);
}

#[test]
fn walk_around_the_hole() {
    let mesh = plate();
    let mut steps = StepsLocator::new(&mesh);
    // cell 0 sits on the x axis at the hole, cell 90 on the y axis: the
    // straight line between them crosses the hole, the walk goes around it
    steps.set_anchor(0).unwrap();
    assert_eq!(steps.search(mesh.centers()[90]).unwrap(), Some(90));
    assert_walk(&mesh, steps.path());
    assert_eq!(steps.path().first(), Some(&0));
    assert_eq!(steps.last_stats().restarts, 0);
}

#[test]
fn set_area_matches_preselection() {
    let mesh = plate();
    let pre = PreselectionLocator::new(&mesh);
    let mut steps = StepsLocator::new(&mesh);
    for p in [[0.5, 0.5], [0.95, 0.05], [0.0, 0.0]] {
        assert_eq!(steps.set_area(p), pre.locate(p));
        assert_eq!(steps.anchor(), pre.locate(p));
    }
}

#[test]
fn search_along_a_line() {
    let mesh = plate();
    let points: Vec<_> = (0..200)
        .map(|k| {
            let t = k as f64 / 199.0;
            [0.35 + 0.6 * t, 0.9 - 0.85 * t]
        })
        .collect();
    let mut steps = StepsLocator::new(&mesh);
    let walked = steps.search_along(&points).unwrap();
    let scanned = BruteForceLocator::new(&mesh).search_many(&points);
    let mismatches: Vec<_> = walked
        .iter()
        .zip(&scanned)
        .enumerate()
        .filter(|(_, (w, s))| w != s)
        .map(|(k, _)| points[k])
        .collect();
    assert!(mismatches.is_empty(), "{mismatches:?}");
}

#[test]
fn batch_search_matches_single_queries() {
    let mesh = plate();
    let coord = |k: usize| k as f64 / 29.0 * 1.2 - 0.1;
    let points: Vec<_> = (0..30)
        .flat_map(|i| (0..30).map(move |j| [coord(i), coord(j)]))
        .collect();
    let pre = PreselectionLocator::new(&mesh);
    let single: Vec<_> = points.iter().map(|&p| pre.locate(p)).collect();
    assert_eq!(pre.search_many(&points), single);
}

#[test]
fn cross_check_reports_agreement() {
    let mesh = plate();
    for c in [0, 20, 55, 99] {
        let report = cross_check(&mesh, mesh.centers()[c]).unwrap();
        assert!(report.agrees());
        assert_eq!(report.brute_force, Some(c));
    }
    let report = cross_check(&mesh, [2.0, 2.0]).unwrap();
    assert!(report.agrees());
    assert_eq!(report.steps, None);
}

#[test]
fn empty_mesh_finds_nothing() {
    let mesh = QuadMesh::new(Default::default()).unwrap();
    for strategy in STRATEGIES {
        assert_eq!(locator(&mesh, strategy).search([0.0, 0.0]).unwrap(), None);
    }
}

#[test]
fn exhausted_walk_is_an_error() {
    let mesh = plate();
    let config = LocatorConfig {
        strategy: Strategy::Steps,
        walk: WalkConfig {
            max_steps: Some(3),
            max_restarts: 0,
            ..WalkConfig::default()
        },
    };
    let mut loc = Locator::new(&mesh, &config);
    let err = loc.search(mesh.centers()[99]).unwrap_err();
    assert_eq!(
        err,
        MeshError::NonConvergentSearch {
            steps: 3,
            restarts: 0
        }
    );
    // a short hop still fits the budget
    assert_eq!(loc.search(mesh.centers()[1]).unwrap(), Some(1));
}
