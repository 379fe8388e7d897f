//! Leaf collapse: many weighted marks become one

use crate::criterion::GradePath;
use crate::error::Result;
use crate::grade::{CumulativeWeight, Mark, WeightedMark};

/// Combine leaves into a single mark, returned with the sum of their
/// cumulative weights.
///
/// Points are the weight-normalized average over the leaves that dominate
/// the sum, so leaves below a zero-weight ancestor still average by their
/// own ratios. When the factors underflow to zero the dominant leaves count
/// equally. A single leaf keeps its comment as is, otherwise each non-empty
/// comment becomes a `path: comment` line.
pub(crate) fn collapse(leaves: &[(GradePath, WeightedMark)]) -> Result<(Mark, CumulativeWeight)> {
    let total: CumulativeWeight = leaves.iter().map(|(_, leaf)| leaf.cumulative()).sum();
    let share = |leaf: &WeightedMark| leaf.cumulative().relative_to(&total);
    let mass = total.relative_to(&total);

    let points = if mass > 0.0 {
        leaves
            .iter()
            .map(|(_, leaf)| share(leaf) * leaf.mark().points())
            .sum::<f64>()
            / mass
    } else {
        let dominant: Vec<f64> = leaves
            .iter()
            .filter(|(_, leaf)| leaf.cumulative().zeros() == total.zeros())
            .map(|(_, leaf)| leaf.mark().points())
            .collect();
        if dominant.is_empty() {
            0.0
        } else {
            dominant.iter().sum::<f64>() / dominant.len() as f64
        }
    };

    let comment = match leaves {
        [(_, only)] => only.mark().comment().to_string(),
        _ => leaves
            .iter()
            .filter(|(_, leaf)| !leaf.mark().comment().is_empty())
            .map(|(path, leaf)| format!("{}: {}", path, leaf.mark().comment()))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    Ok((Mark::new(points, comment)?, total))
}
