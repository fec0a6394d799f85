//! Point location: which cell of a [`QuadMesh`] contains a point?
//!
//! Three strategies share the [`PointLocator`] capability:
//!
//! | strategy | cost per query | state |
//! |---|---|---|
//! | [`BruteForceLocator`] | exact test of every cell | none |
//! | [`PreselectionLocator`] | cheap box filter, exact test of survivors | none |
//! | [`StepsLocator`] | walk from the previous answer through neighbours | anchor + path |
//!
//! `Ok(None)` means no cell contains the point (the raw encoding is `-1`, see
//! [`raw_index`]). Points on an edge or vertex shared by several cells may be
//! reported in any of them, and different strategies may disagree there.
//!
//! # Examples
//! ```rust
//! use quadmesh::locate::{Locator, LocatorConfig, PointLocator, Strategy};
//! use quadmesh::mesh_generation::quad_grid;
//! use quadmesh::topology::QuadMesh;
//!
//! let mesh = QuadMesh::new(quad_grid(4, 4, [0.0, 0.0], [1.0, 1.0])?)?;
//! let config = LocatorConfig { strategy: Strategy::Steps, ..Default::default() };
//! let mut locator = Locator::new(&mesh, &config);
//! let cell = locator.search([0.6, 0.1])?.expect("inside the grid");
//! assert!(mesh.cells()[cell].iter().any(|&n| mesh.nodes()[n] == [0.75, 0.0]));
//! assert_eq!(locator.search([2.0, 2.0])?, None);
//! # Ok::<(), quadmesh::mesh_error::MeshError>(())
//! ```

pub mod brute_force;
pub mod preselection;
pub mod steps;

pub use brute_force::BruteForceLocator;
pub use preselection::PreselectionLocator;
pub use steps::{StepsLocator, WalkConfig, WalkStats};

use crate::geometry::predicates::Point2;
use crate::mesh_error::MeshError;
use crate::topology::QuadMesh;
use serde::{Deserialize, Serialize};

/// Raw "not found" index.
pub const NOT_FOUND: i64 = -1;

/// Convert a search result to the raw index encoding (`-1` for not found).
#[inline]
pub fn raw_index(found: Option<usize>) -> i64 {
    found.map_or(NOT_FOUND, |c| c as i64)
}

/// Shared capability of all point-location strategies.
pub trait PointLocator {
    /// Cell containing `point`, `Ok(None)` if there is none.
    fn search(&mut self, point: Point2) -> Result<Option<usize>, MeshError>;

    /// Which strategy this is.
    fn strategy(&self) -> Strategy;
}

impl<L: PointLocator + ?Sized> PointLocator for Box<L> {
    #[inline]
    fn search(&mut self, point: Point2) -> Result<Option<usize>, MeshError> {
        (**self).search(point)
    }

    #[inline]
    fn strategy(&self) -> Strategy {
        (**self).strategy()
    }
}

/// Point-location strategy selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    BruteForce,
    #[default]
    Preselection,
    Steps,
}

/// Locator construction options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub strategy: Strategy,
    /// Only used by [`Strategy::Steps`].
    pub walk: WalkConfig,
}

/// One of the three strategies, chosen at runtime.
#[derive(Debug, Clone)]
pub enum Locator<'m> {
    BruteForce(BruteForceLocator<'m>),
    Preselection(PreselectionLocator<'m>),
    Steps(StepsLocator<'m>),
}

impl<'m> Locator<'m> {
    pub fn new(mesh: &'m QuadMesh, config: &LocatorConfig) -> Self {
        match config.strategy {
            Strategy::BruteForce => Locator::BruteForce(BruteForceLocator::new(mesh)),
            Strategy::Preselection => Locator::Preselection(PreselectionLocator::new(mesh)),
            Strategy::Steps => Locator::Steps(StepsLocator::with_config(mesh, config.walk)),
        }
    }
}

impl PointLocator for Locator<'_> {
    fn search(&mut self, point: Point2) -> Result<Option<usize>, MeshError> {
        match self {
            Locator::BruteForce(l) => l.search(point),
            Locator::Preselection(l) => l.search(point),
            Locator::Steps(l) => l.search(point),
        }
    }

    fn strategy(&self) -> Strategy {
        match self {
            Locator::BruteForce(_) => Strategy::BruteForce,
            Locator::Preselection(_) => Strategy::Preselection,
            Locator::Steps(_) => Strategy::Steps,
        }
    }
}

/// Results of all three strategies for one point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrategyReport {
    pub brute_force: Option<usize>,
    pub preselection: Option<usize>,
    pub steps: Option<usize>,
}

impl StrategyReport {
    pub fn agrees(&self) -> bool {
        self.brute_force == self.preselection && self.preselection == self.steps
    }
}

/// Locate `point` with every strategy (the walk starts from a fresh
/// locator) and report what each one found.
///
/// Disagreement is expected only for points on shared cell boundaries; it
/// is logged at debug level.
pub fn cross_check(mesh: &QuadMesh, point: Point2) -> Result<StrategyReport, MeshError> {
    let report = StrategyReport {
        brute_force: BruteForceLocator::new(mesh).locate(point),
        preselection: PreselectionLocator::new(mesh).locate(point),
        steps: StepsLocator::new(mesh).search(point)?,
    };
    if !report.agrees() {
        log::debug!("strategies disagree at {point:?}: {report:?}");
    }
    Ok(report)
}

#[inline]
pub(crate) fn is_finite_point(point: Point2) -> bool {
    point[0].is_finite() && point[1].is_finite()
}

/// Apply a stateless lookup to many points, in parallel with `rayon`.
#[cfg(feature = "rayon")]
pub(crate) fn map_points<F>(points: &[Point2], f: F) -> Vec<Option<usize>>
where
    F: Fn(Point2) -> Option<usize> + Sync + Send,
{
    use rayon::prelude::*;
    points.par_iter().map(|&p| f(p)).collect()
}

#[cfg(not(feature = "rayon"))]
pub(crate) fn map_points<F>(points: &[Point2], f: F) -> Vec<Option<usize>>
where
    F: Fn(Point2) -> Option<usize>,
{
    points.iter().map(|&p| f(p)).collect()
}
