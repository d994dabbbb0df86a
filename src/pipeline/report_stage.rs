//! Report output stage.

use crate::config::DiffConfig;
use crate::diff::DiffResult;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use anyhow::{Context, Result};

use super::{should_use_color, write_output, OutputTarget};

fn report_config(config: &DiffConfig) -> ReportConfig {
    ReportConfig {
        delimiter: config.output.delimiter,
        absent_marker: config.output.absent_marker.clone(),
        header_file_names: config.output.header_file_names,
        metadata: ReportMetadata {
            left_path: Some(config.paths.left.to_string_lossy().to_string()),
            right_path: Some(config.paths.right.to_string_lossy().to_string()),
            ..ReportMetadata::new()
        },
        ..ReportConfig::default()
    }
}

/// Render the report for the configured format without writing it.
pub fn render_report(config: &DiffConfig, result: &DiffResult, use_color: bool) -> Result<String> {
    let reporter = create_reporter_with_options(config.output.format, use_color);
    reporter
        .generate(result, &report_config(config))
        .with_context(|| format!("Failed to generate {} report", config.output.format))
}

/// Output a diff report to the configured destination.
///
/// The report is rendered in full before anything is written, so a failed
/// run never leaves a partial log behind.
pub fn output_report(config: &DiffConfig, result: &DiffResult) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color) && target.is_terminal();
    let report = render_report(config, result, use_color)?;
    write_output(&report, &target, config.behavior.quiet)
}
