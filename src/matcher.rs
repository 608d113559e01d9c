//! Nearest cosine-neighbour matchers
//!
//! Both matchers look for the globally closest `(row in A, row in B)` pair.
//! [`LoopMatcher`] calls [`cosine_distance`] once per row of A;
//! [`VectorisedMatcher`] makes one call over the whole of A.

use ndarray::{Array1, Axis};

use crate::config::MatcherConfig;
use crate::distance::{argmin, cosine_distance};
use crate::error::Result;
use crate::generator::MatrixPair;

/// The closest pair found by a matcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPair {
    /// Row index in matrix A
    pub row_a: usize,
    /// Row index in matrix B
    pub row_b: usize,
    /// Cosine distance between the two rows
    pub distance: f64,
}

/// Matcher kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// One distance call per row of A
    Loop,
    /// One distance call over all of A
    Vectorised,
}

/// Nearest-neighbour matcher trait
pub trait Matcher {
    /// Label used in progress output
    fn name(&self) -> &str;

    /// Find the closest pair, or `None` when no rows were scanned
    fn find_closest(&self, data: &MatrixPair) -> Result<Option<ClosestPair>>;
}

/// Create a matcher based on configuration
pub fn create_matcher(kind: MatcherKind, config: &MatcherConfig) -> Box<dyn Matcher> {
    match kind {
        MatcherKind::Loop if config.scan_from_first_row => Box::new(LoopMatcher::corrected()),
        MatcherKind::Loop => Box::new(LoopMatcher::new()),
        MatcherKind::Vectorised => Box::new(VectorisedMatcher),
    }
}

/// Row-by-row matcher.
///
/// By default the scan starts at row 1, so row 0 of A is never considered
/// and a single-row A yields no match. [`LoopMatcher::corrected`] starts at
/// row 0 and agrees with [`VectorisedMatcher`].
#[derive(Debug, Clone, Copy)]
pub struct LoopMatcher {
    start_row: usize,
}

impl LoopMatcher {
    pub fn new() -> Self {
        Self { start_row: 1 }
    }

    pub fn corrected() -> Self {
        Self { start_row: 0 }
    }

    /// First row of A the scan visits
    pub fn start_row(&self) -> usize {
        self.start_row
    }

    /// Distances from row `row` of A to every row of B
    pub fn row_distances(&self, data: &MatrixPair, row: usize) -> Result<Array1<f64>> {
        let view = data.row_view(row).ok_or_else(|| {
            crate::BenchError::Internal(format!(
                "row {} out of range for {} rows",
                row,
                data.rows()
            ))
        })?;

        let distances = cosine_distance(view, data.two.view())?;
        Ok(distances.index_axis_move(Axis(0), 0))
    }
}

impl Default for LoopMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher for LoopMatcher {
    fn name(&self) -> &str {
        "loop"
    }

    fn find_closest(&self, data: &MatrixPair) -> Result<Option<ClosestPair>> {
        let mut best: Option<ClosestPair> = None;

        for row_a in self.start_row..data.rows() {
            let distances = self.row_distances(data, row_a)?;
            let Some(row_b) = argmin(distances.view()) else {
                continue;
            };
            let distance = distances[row_b];

            // Strictly smaller only, so the earliest row keeps a tie
            if best.map_or(true, |b| b.distance > distance) {
                best = Some(ClosestPair {
                    row_a,
                    row_b,
                    distance,
                });
            }
        }

        Ok(best)
    }
}

/// Whole-matrix matcher
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorisedMatcher;

impl VectorisedMatcher {
    /// Full `N x M` distance matrix flattened in row-major order
    pub fn flattened_distances(&self, data: &MatrixPair) -> Result<Array1<f64>> {
        let distances = cosine_distance(data.one.view(), data.two.view())?;
        Ok(distances.iter().copied().collect())
    }
}

impl Matcher for VectorisedMatcher {
    fn name(&self) -> &str {
        "vectorised"
    }

    fn find_closest(&self, data: &MatrixPair) -> Result<Option<ClosestPair>> {
        let columns = data.two.nrows();
        if columns == 0 {
            return Ok(None);
        }

        let flat = self.flattened_distances(data)?;
        Ok(argmin(flat.view()).map(|index| ClosestPair {
            row_a: index / columns,
            row_b: index % columns,
            distance: flat[index],
        }))
    }
}
