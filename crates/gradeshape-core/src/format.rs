//! Output format handling for gradeshape
//!
//! Supports three output formats:
//! - human: Readable, indented output for terminal use
//! - json: Stable, machine-readable JSON
//! - records: Line-oriented format for scripts

use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::criterion::GradePath;
use crate::error::GradeError;
use crate::grade::Grade;

/// Output format for gradeshape commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
    /// Line-oriented records
    Records,
}

impl FromStr for OutputFormat {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "records" => Ok(OutputFormat::Records),
            other => Err(GradeError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Records => write!(f, "records"),
        }
    }
}

/// Render a grade as an indented tree:
///
/// ```text
/// total 0.625
/// code 0.750 (weight 0.500)
///   style 0.000 (weight 0.250)
///     # comment line
/// ```
pub fn render_grade_human(grade: &Grade) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "total {:.3}", grade.points());
    if let Some(mark) = grade.as_mark() {
        push_comment(&mut out, mark.comment(), 1);
    }
    render_children(&mut out, grade, &GradePath::root());
    out
}

fn render_children(out: &mut String, grade: &Grade, path: &GradePath) {
    let indent = path.size() * 2;
    for (criterion, weighted) in grade.sub_grades() {
        let child = weighted.grade();
        let _ = writeln!(
            out,
            "{:indent$}{} {:.3} (weight {:.3})",
            "",
            criterion,
            child.points(),
            weighted.weight(),
            indent = indent
        );
        if let Some(mark) = child.as_mark() {
            push_comment(out, mark.comment(), path.size() + 1);
        }
        render_children(out, child, &path.with_suffix(criterion.clone()));
    }
}

fn push_comment(out: &mut String, comment: &str, depth: usize) {
    for line in comment.lines().filter(|l| !l.trim().is_empty()) {
        let _ = writeln!(out, "{:indent$}# {}", "", line, indent = depth * 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::Criterion;

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "records".parse::<OutputFormat>().unwrap(),
            OutputFormat::Records
        );
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(GradeError::UnknownFormat(_))
        ));
        assert_eq!(OutputFormat::default().to_string(), "human");
    }

    #[test]
    fn test_render_grade_human() {
        let grade = Grade::composite([
            (Criterion::new("a"), Grade::mark(1.0, "fine").unwrap(), 3.0),
            (Criterion::new("b"), Grade::mark(0.0, "").unwrap(), 1.0),
        ])
        .unwrap();
        assert_eq!(
            render_grade_human(&grade),
            "total 0.750\na 1.000 (weight 3.000)\n  # fine\nb 0.000 (weight 1.000)\n"
        );
    }

    #[test]
    fn test_render_mark_human() {
        let grade = Grade::mark(0.5, "late").unwrap();
        assert_eq!(render_grade_human(&grade), "total 0.500\n  # late\n");
    }
}
