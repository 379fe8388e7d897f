//! Format output dispatch helpers

/// Macro for format dispatch that wraps result handling.
/// Use when the json branch returns Result and human/records return ().
///
/// ```rust,ignore
/// output_by_format_result!(cli.format,
///     json => { print_json(&grade) },
///     human => { print!("{}", render_grade_human(&grade)); },
///     records => { print_records(&grade); }
/// )
/// ```
#[macro_export]
macro_rules! output_by_format_result {
    ($format:expr, json => $json:expr, human => $human:block, records => $records:block) => {
        match $format {
            gradeshape_core::format::OutputFormat::Json => $json,
            gradeshape_core::format::OutputFormat::Human => {
                $human;
                Ok(())
            }
            gradeshape_core::format::OutputFormat::Records => {
                $records;
                Ok(())
            }
        }
    };
}
