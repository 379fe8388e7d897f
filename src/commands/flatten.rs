//! `gradeshape flatten` command - collapse a grade to one mark

use std::path::Path;

use crate::cli::Cli;
use crate::commands::input::load_grade;
use crate::output_by_format_result;
use gradeshape_core::error::{GradeError, Result};
use gradeshape_core::format::render_grade_human;
use gradeshape_core::records::format_grade_records;
use gradeshape_core::{to_mark, Grade};

/// Execute the flatten command
pub fn execute(cli: &Cli, grade_path: &Path) -> Result<()> {
    let grade = load_grade(grade_path)?;
    let flat = Grade::Mark(to_mark(&grade)?);

    output_by_format_result!(cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&flat)?);
            Ok::<(), GradeError>(())
        },
        human => {
            print!("{}", render_grade_human(&flat));
        },
        records => {
            for line in format_grade_records("flatten", &flat) {
                println!("{}", line);
            }
        }
    )
}
