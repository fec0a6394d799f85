//! Incremental point location by walking across cell edges.
//!
//! The walk keeps an *anchor*: the cell of the previous answer. To locate a
//! new point it looks at the ray from the anchor's center to the point, finds
//! the edge that ray leaves through, and either stops (the point is on the
//! near side of that edge) or steps into the neighbour behind it. For query
//! sequences with spatial locality, such as samples along a curve, this costs
//! a few steps per query instead of a scan over the whole mesh.
//!
//! # Dead ends and budgets
//! A walk that reaches a boundary edge re-anchors with a global
//! [`PreselectionLocator`] scan and continues from its answer (or reports
//! `None` if the scan finds nothing). Non-convex domains and disconnected
//! regions are handled this way. Each walk leg is limited to
//! [`WalkConfig::max_steps`] transitions and each query to
//! [`WalkConfig::max_restarts`] re-anchors; running out of either returns
//! [`MeshError::NonConvergentSearch`] instead of looping.
//!
//! Cells must be star-shaped with respect to their center (true for convex
//! cells) for the walk to be exact.

use super::{PointLocator, PreselectionLocator, Strategy, is_finite_point};
use crate::geometry::predicates::{Point2, orient2d};
use crate::mesh_error::MeshError;
use crate::topology::QuadMesh;
use serde::{Deserialize, Serialize};

/// Walk limits and tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Transitions allowed per walk leg. `None` uses the cell count: a
    /// deterministic walk that takes more steps than there are cells must be
    /// cycling.
    pub max_steps: Option<usize>,
    /// Preselection re-anchors allowed per query.
    pub max_restarts: usize,
    /// Relative slack on the inside-edge test, so points on an edge stop the
    /// walk instead of bouncing between the two cells.
    pub edge_tolerance: f64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_steps: None,
            max_restarts: 2,
            edge_tolerance: 1e-5,
        }
    }
}

/// Counters of the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Edge crossings, summed over all legs.
    pub steps: usize,
    /// Preselection re-anchors.
    pub restarts: usize,
}

enum Step {
    Inside,
    Cross(usize),
    DeadEnd,
}

/// Stateful walking locator. One instance serves one query stream; create
/// one per thread, they only borrow the mesh.
#[derive(Debug, Clone)]
pub struct StepsLocator<'m> {
    coords: &'m [[Point2; 4]],
    centers: &'m [Point2],
    neighbours: &'m [[usize; 4]],
    fallback: PreselectionLocator<'m>,
    config: WalkConfig,
    anchor: Option<usize>,
    path: Vec<usize>,
    stats: WalkStats,
}

impl<'m> StepsLocator<'m> {
    pub fn new(mesh: &'m QuadMesh) -> Self {
        Self::with_config(mesh, WalkConfig::default())
    }

    pub fn with_config(mesh: &'m QuadMesh, config: WalkConfig) -> Self {
        Self {
            coords: mesh.coords(),
            centers: mesh.centers(),
            neighbours: mesh.neighbours(),
            fallback: PreselectionLocator::new(mesh),
            config,
            anchor: None,
            path: Vec::new(),
            stats: WalkStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Current anchor cell. `None` before the first hit; the next walk then
    /// starts from cell 0.
    #[inline]
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Start the next walk from `cell`.
    pub fn set_anchor(&mut self, cell: usize) -> Result<(), MeshError> {
        if cell >= self.centers.len() {
            return Err(MeshError::CellIndexOutOfRange {
                cell,
                cell_count: self.centers.len(),
            });
        }
        self.anchor = Some(cell);
        Ok(())
    }

    /// Re-anchor on the cell containing `point`, found by a global
    /// preselection scan, and return it. A miss clears the anchor.
    pub fn set_area(&mut self, point: Point2) -> Option<usize> {
        self.anchor = self.fallback.locate(point);
        self.anchor
    }

    /// Cells visited by the latest [`search`](Self::search), starting at the
    /// cell the final walk leg started from. Consecutive entries are edge
    /// neighbours; the last one is the answer when a cell was found.
    #[inline]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    #[inline]
    pub fn last_stats(&self) -> WalkStats {
        self.stats
    }

    /// Locate `point` by walking from the anchor; on success the answer
    /// becomes the new anchor.
    pub fn search(&mut self, point: Point2) -> Result<Option<usize>, MeshError> {
        self.path.clear();
        self.stats = WalkStats::default();
        if self.centers.is_empty() || !is_finite_point(point) {
            self.anchor = None;
            return Ok(None);
        }

        let max_steps = self.config.max_steps.unwrap_or(self.centers.len());
        let mut current = self.anchor.unwrap_or(0);
        let mut leg_steps = 0;
        self.path.push(current);

        loop {
            let blocked = match self.step(current, point) {
                Step::Inside => {
                    self.anchor = Some(current);
                    return Ok(Some(current));
                }
                Step::Cross(next) if leg_steps < max_steps => {
                    leg_steps += 1;
                    self.stats.steps += 1;
                    current = next;
                    self.path.push(current);
                    continue;
                }
                Step::Cross(_) => "step budget exhausted",
                Step::DeadEnd => "boundary reached",
            };

            if self.stats.restarts >= self.config.max_restarts {
                log::warn!(
                    "walk to {point:?} gave up at cell {current} ({blocked}) after {} steps and {} restarts",
                    self.stats.steps,
                    self.stats.restarts
                );
                self.anchor = None;
                return Err(MeshError::NonConvergentSearch {
                    steps: self.stats.steps,
                    restarts: self.stats.restarts,
                });
            }
            self.stats.restarts += 1;
            log::debug!("walk to {point:?} at cell {current}: {blocked}; re-anchoring");

            self.path.clear();
            match self.set_area(point) {
                Some(cell) => {
                    current = cell;
                    leg_steps = 0;
                    self.path.push(cell);
                }
                None => return Ok(None),
            }
        }
    }

    /// Locate a sequence of nearby points: anchor on the first with a
    /// global scan, then walk from answer to answer.
    pub fn search_along(&mut self, points: &[Point2]) -> Result<Vec<Option<usize>>, MeshError> {
        if let Some(&first) = points.first() {
            self.set_area(first);
        }
        points.iter().map(|&p| self.search(p)).collect()
    }

    /// One decision of the walk at `cell`.
    fn step(&self, cell: usize, point: Point2) -> Step {
        let center = self.centers[cell];
        if point == center {
            return Step::Inside;
        }
        let corners = &self.coords[cell];
        let (edge, s1, s2) = sector(center, corners, point);

        // s1 - s2 = span - orient2d(point, corner_e, corner_{e+1}), so this
        // holds iff the point is on the inner side of edge `e`.
        let span = orient2d(center, corners[edge], corners[(edge + 1) % 4])
            * (1.0 + self.config.edge_tolerance);
        if s1 - s2 < span {
            return Step::Inside;
        }
        match self.neighbours[cell][edge] {
            next if next < self.centers.len() => Step::Cross(next),
            _ => Step::DeadEnd,
        }
    }
}

/// Edge `e` whose angular sector (between the rays from `center` through
/// corners `e` and `e + 1`) holds `point`, with
/// `s1 = orient2d(center, corner_e, point)` and
/// `s2 = orient2d(center, corner_{e+1}, point)`.
///
/// Scans forward from edge 0 while the point stays left of the next corner
/// ray, or backward while it stays right of the previous one. Each scan
/// covers at most the four edges.
fn sector(center: Point2, corners: &[Point2; 4], point: Point2) -> (usize, f64, f64) {
    let side = |i: usize| orient2d(center, corners[i % 4], point);
    let mut s1 = side(0);
    if s1 > 0.0 {
        let mut edge = 0;
        let mut s2 = side(1);
        while s2 > 0.0 && edge < 3 {
            edge += 1;
            s1 = s2;
            s2 = side(edge + 1);
        }
        (edge, s1, s2)
    } else {
        let mut edge = 3;
        let mut s2 = s1;
        s1 = side(3);
        while s1 < 0.0 && edge > 0 {
            edge -= 1;
            s2 = s1;
            s1 = side(edge);
        }
        (edge, s1, s2)
    }
}

impl PointLocator for StepsLocator<'_> {
    #[inline]
    fn search(&mut self, point: Point2) -> Result<Option<usize>, MeshError> {
        StepsLocator::search(self, point)
    }

    fn strategy(&self) -> Strategy {
        Strategy::Steps
    }
}
