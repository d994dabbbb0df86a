//! Diff command handler.
//!
//! Implements the default command: compare two exports and write the discrepancy log.

use crate::config::{DiffConfig, Validatable};
use crate::diff::DiffResult;
use crate::pipeline::{compute_diff, exit_codes, output_report, parse_document_with_context};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// Fatal problems (invalid configuration, unreadable exports, documents that
/// cannot be aligned) are returned as errors; nothing is written in that case.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }

    let quiet = config.behavior.quiet;
    let left = parse_document_with_context(&config.paths.left, &config.schema, quiet)?;
    let right = parse_document_with_context(&config.paths.right, &config.schema, quiet)?;

    let result = compute_diff(&config, &left, &right)?;
    let exit_code = determine_exit_code(&config, &result);

    output_report(&config, &result)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on diff results and config flags.
const fn determine_exit_code(config: &DiffConfig, result: &DiffResult) -> i32 {
    if config.behavior.fail_on_warning && !result.warnings.is_empty() {
        return exit_codes::WARNINGS;
    }
    if config.behavior.fail_on_change && !result.rows.is_empty() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
