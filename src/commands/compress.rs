//! `gradeshape compress` command - re-express a grade in a report shape

use std::path::Path;

use tracing::debug;

use crate::cli::Cli;
use crate::commands::input::load_grade;
use crate::output_by_format_result;
use gradeshape_core::config::ReportConfig;
use gradeshape_core::error::{GradeError, Result};
use gradeshape_core::format::render_grade_human;
use gradeshape_core::records::format_grade_records;
use gradeshape_core::Compressor;

/// Execute the compress command
pub fn execute(cli: &Cli, grade_path: &Path, target_path: &Path) -> Result<()> {
    let grade = load_grade(grade_path)?;
    let config = ReportConfig::load(target_path)?;
    let target = config.target();
    debug!(
        report = config.report.name.as_deref().unwrap_or(""),
        target_nodes = target.node_count(),
        "target_loaded"
    );

    let compressed = Compressor::new().compress(&grade, &target)?;

    output_by_format_result!(cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&compressed)?);
            Ok::<(), GradeError>(())
        },
        human => {
            if let Some(name) = config.report.name.as_deref().filter(|_| !cli.quiet) {
                println!("report {}", name);
            }
            print!("{}", render_grade_human(&compressed));
        },
        records => {
            for line in format_grade_records("compress", &compressed) {
                println!("{}", line);
            }
        }
    )
}
