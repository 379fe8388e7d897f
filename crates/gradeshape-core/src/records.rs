//! Utilities for records output format
//!
//! One line per item, prefixed by a record type:
//! - `H` header with the mode and overall points
//! - `G` one grade node (path, points, weight, kind)
//! - `C` a comment attached to the previous mark
//! - `S` one leaf path of a structure

use crate::criterion::GradePath;
use crate::grade::Grade;
use crate::structure::GradeStructure;

/// Escape double quotes and newlines in a string for records format.
pub fn escape_quotes(s: &str) -> String {
    s.replace('\"', r#"\""#).replace('\n', r"\n")
}

/// Format a records header line
pub fn format_header(mode: &str, points: Option<f64>) -> String {
    match points {
        Some(points) => format!("H gradeshape=1 records=1 mode={} points={:.6}", mode, points),
        None => format!("H gradeshape=1 records=1 mode={}", mode),
    }
}

/// Records lines for every node of a grade, parents first
pub fn format_grade_records(mode: &str, grade: &Grade) -> Vec<String> {
    let mut lines = vec![format_header(mode, Some(grade.points()))];
    push_node(&mut lines, grade, &GradePath::root(), 1.0);
    lines
}

fn push_node(lines: &mut Vec<String>, grade: &Grade, path: &GradePath, weight: f64) {
    let kind = if grade.is_mark() { "mark" } else { "composite" };
    lines.push(format!(
        "G path={} points={:.6} weight={:.6} kind={}",
        path,
        grade.points(),
        weight,
        kind
    ));
    if let Some(mark) = grade.as_mark() {
        if !mark.comment().is_empty() {
            lines.push(format!("C path={} \"{}\"", path, escape_quotes(mark.comment())));
        }
    }
    for (criterion, weighted) in grade.sub_grades() {
        push_node(
            lines,
            weighted.grade(),
            &path.with_suffix(criterion.clone()),
            weighted.weight(),
        );
    }
}

/// Records lines for the leaves of a structure
pub fn format_structure_records(mode: &str, structure: &GradeStructure) -> Vec<String> {
    let mut lines = vec![format_header(mode, None)];
    lines.extend(structure.leaves().iter().map(|leaf| format!("S path={}", leaf)));
    lines
}
