//! Reading grade files

use std::fs;
use std::path::Path;

use tracing::debug;

use gradeshape_core::error::{GradeError, Result};
use gradeshape_core::Grade;

/// Load a grade from a JSON file. Construction rules are checked while
/// deserializing, so an invalid grade surfaces as a JSON error.
pub fn load_grade(path: &Path) -> Result<Grade> {
    let content = fs::read_to_string(path)
        .map_err(|e| GradeError::io_operation("read", path.display(), e))?;
    let grade: Grade = serde_json::from_str(&content)?;
    debug!(path = %path.display(), depth = grade.depth(), "grade_loaded");
    Ok(grade)
}
