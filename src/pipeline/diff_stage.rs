//! Diff computation stage.
//!
//! Builds the engine from the comparison settings, runs it, and logs what it found.

use crate::config::DiffConfig;
use crate::diff::{DiffEngine, DiffResult};
use crate::model::Document;
use anyhow::{Context, Result};

/// Run the comparison between two parsed exports.
///
/// Alignment failures surface as errors; dangling links are logged as
/// warnings and kept on the result.
pub fn compute_diff(config: &DiffConfig, left: &Document, right: &Document) -> Result<DiffResult> {
    let quiet = config.behavior.quiet;

    if !quiet {
        tracing::info!("Comparing annotations...");
    }

    let engine = DiffEngine::new()
        .with_parallel(config.comparison.parallel)
        .with_parallel_threshold(config.comparison.parallel_threshold)
        .with_identical_shortcut(config.comparison.identical_shortcut);

    let result = engine
        .diff(left, right)
        .context("Failed to compare annotations")?;

    for warning in &result.warnings {
        tracing::warn!("{warning}");
    }

    if !quiet {
        tracing::info!(
            "Diff complete: {} discrepancies across {} sentences ({} frames matched, {} only in file 1, {} only in file 2)",
            result.summary.total_rows,
            result.summary.sentences,
            result.summary.frames_matched,
            result.summary.frames_only_left,
            result.summary.frames_only_right
        );
    }

    Ok(result)
}
