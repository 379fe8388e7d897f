//! `gradeshape shape` command - report the structure of grades

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::Cli;
use crate::commands::input::load_grade;
use crate::output_by_format_result;
use gradeshape_core::config::ReportConfig;
use gradeshape_core::error::{GradeError, Result};
use gradeshape_core::format::OutputFormat;
use gradeshape_core::records::format_structure_records;
use gradeshape_core::GradeStructure;

/// Execute the shape command
pub fn execute(
    cli: &Cli,
    grade_paths: &[PathBuf],
    save: Option<&Path>,
    name: Option<String>,
) -> Result<()> {
    let structures = grade_paths
        .iter()
        .map(|path| load_grade(path).map(|grade| grade.to_structure()))
        .collect::<Result<Vec<_>>>()?;
    let merged = GradeStructure::merge(&structures);
    debug!(grades = structures.len(), nodes = merged.node_count(), "shape_merged");

    if let Some(path) = save {
        ReportConfig::from_structure(name, &merged).save(path)?;
        if !cli.quiet && cli.format == OutputFormat::Human {
            eprintln!("saved report shape to {}", path.display());
        }
    }

    output_by_format_result!(cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&merged)?);
            Ok::<(), GradeError>(())
        },
        human => {
            print!("{}", merged);
        },
        records => {
            for line in format_structure_records("shape", &merged) {
                println!("{}", line);
            }
        }
    )
}
