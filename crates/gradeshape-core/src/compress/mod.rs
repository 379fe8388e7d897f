//! Grade compression
//!
//! Re-expresses a detailed grade under a coarser target structure while
//! keeping its total points. The detailed grade is walked along a
//! *frontier*: the set of its paths that currently stand for one node of the
//! target.
//!
//! - at a target leaf, every grade leaf below the frontier collapses into a
//!   single mark
//! - otherwise a covering search finds the grade nodes whose children carry
//!   the target node's criteria, and each criterion is compressed
//!   recursively from the matching children
//!
//! Sub-grade weights in the result are sums of the cumulative leaf weights
//! of the original, so the top-level weights of a result sum to one. Below a
//! zero-weight ancestor those sums are all zero; siblings are then weighted
//! by the cumulative weights they would have if the zero factors were left
//! out, which keeps the ratios of the original.

mod collapse;
mod cover;
mod validation;

pub use cover::MAX_SUBSET_SEARCH;
pub use validation::validate_compression;

use std::collections::BTreeSet;
use std::time::Instant;

use crate::criterion::GradePath;
use crate::error::Result;
use crate::grade::{Composite, CumulativeWeight, Grade, Mark, WeightedGrade};
use crate::structure::GradeStructure;
use crate::trace_time;

/// Tolerance on points and weight sums used by the post-condition checks
pub const POINTS_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compressor {
    tolerance: f64,
}

impl Default for Compressor {
    fn default() -> Self {
        Compressor {
            tolerance: POINTS_TOLERANCE,
        }
    }
}

impl Compressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tolerance used when checking post-conditions in debug builds
    pub fn with_tolerance(tolerance: f64) -> Self {
        Compressor { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Compress `grade` to the shape of `target`.
    ///
    /// Fails with `UncoverableStructure` when some target node asks for
    /// criteria that cannot be found as siblings in the grade.
    #[tracing::instrument(skip(self, grade, target), fields(depth = grade.depth(), target_nodes = target.node_count()))]
    pub fn compress(&self, grade: &Grade, target: &GradeStructure) -> Result<Grade> {
        let start = Instant::now();
        let frontier = BTreeSet::from([GradePath::root()]);
        let (compressed, _) = self.compress_at(grade, &frontier, target)?;

        if cfg!(debug_assertions) {
            let violations = validate_compression(grade, target, &compressed, self.tolerance);
            debug_assert!(
                violations.is_empty(),
                "compression post-conditions violated: {:?}",
                violations
            );
        }

        trace_time!(start, "compress");
        Ok(compressed)
    }

    /// Flatten `grade` to one mark; same as compressing to the root-only
    /// structure.
    pub fn to_mark(&self, grade: &Grade) -> Result<Mark> {
        let (mark, _) = collapse::collapse(&grade.weighted_leaves())?;
        Ok(mark)
    }

    /// Compress the part of `grade` below `frontier` to `target`, a
    /// sub-structure relativized to the current target node. Returns the
    /// compressed grade with the summed cumulative weight of its leaves.
    fn compress_at(
        &self,
        grade: &Grade,
        frontier: &BTreeSet<GradePath>,
        target: &GradeStructure,
    ) -> Result<(Grade, CumulativeWeight)> {
        let next = target.successor_criteria(&GradePath::root())?;
        if next.is_empty() {
            let mut leaves = Vec::new();
            for path in frontier {
                leaves.extend(grade.weighted_leaves_below(path)?);
            }
            let (mark, weight) = collapse::collapse(&leaves)?;
            return Ok((Grade::Mark(mark), weight));
        }

        let covers = cover::find_cover(grade, frontier, next)?;

        let mut compressed = Vec::with_capacity(next.len());
        for criterion in next {
            let child_frontier: BTreeSet<GradePath> = covers
                .iter()
                .map(|path| path.with_suffix(criterion.clone()))
                .filter(|path| grade.get(path).is_some())
                .collect();
            if child_frontier.is_empty() {
                tracing::debug!(criterion = %criterion, "no grade paths for criterion, skipping");
                continue;
            }

            let sub_target = target.get_structure_of(criterion)?;
            let (sub_grade, weight) = self.compress_at(grade, &child_frontier, &sub_target)?;
            compressed.push((criterion.clone(), sub_grade, weight));
        }

        let total: CumulativeWeight = compressed.iter().map(|(_, _, weight)| *weight).sum();
        let composite = Composite::new(compressed.into_iter().map(|(criterion, sub_grade, weight)| {
            (
                criterion,
                WeightedGrade::new(sub_grade, weight.relative_to(&total)),
            )
        }))?;
        Ok((Grade::Composite(composite), total))
    }
}

/// Compress `grade` to the shape of `target` with the default compressor
pub fn compress(grade: &Grade, target: &GradeStructure) -> Result<Grade> {
    Compressor::default().compress(grade, target)
}

/// Flatten `grade` to a single mark with the default compressor
pub fn to_mark(grade: &Grade) -> Result<Mark> {
    Compressor::default().to_mark(grade)
}
