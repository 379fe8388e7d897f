//! Compression post-conditions

use crate::grade::Grade;
use crate::structure::GradeStructure;

/// Check a compression result against its inputs.
/// Returns a list of violations (empty if the result is sound).
///
/// - total points match the original within `tolerance`
/// - top-level weights sum to one within `tolerance`
/// - every parent -> child edge of the result is declared by `target`,
///   which also makes each criterion of the result a declared successor
///   of its parent
pub fn validate_compression(
    original: &Grade,
    target: &GradeStructure,
    compressed: &Grade,
    tolerance: f64,
) -> Vec<String> {
    let mut errors = Vec::new();

    let expected = original.points();
    let actual = compressed.points();
    if (expected - actual).abs() > tolerance {
        errors.push(format!(
            "points changed from {} to {} during compression",
            expected, actual
        ));
    }

    if let Some(composite) = compressed.as_composite() {
        let total: f64 = composite.sub_grades().values().map(|w| w.weight()).sum();
        if (total - 1.0).abs() > tolerance {
            errors.push(format!("top-level weights sum to {} instead of 1", total));
        }
    }

    for (from, to) in compressed.to_structure().edges() {
        if !target.has_edge(&from, &to) {
            let criterion = to.tail().map(ToString::to_string).unwrap_or_default();
            errors.push(format!(
                "criterion {} under {} is not declared by the target",
                criterion, from
            ));
        }
    }

    errors
}
