//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::DiffResult;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a table cell may grow before it is truncated.
const MAX_CELL_WIDTH: usize = 32;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn push_table(&self, lines: &mut Vec<String>, result: &DiffResult, config: &ReportConfig) {
        let header = [
            "SENTENCE".to_string(),
            "FRAME".to_string(),
            "KEY".to_string(),
            "FILE 1".to_string(),
            "FILE 2".to_string(),
        ];
        let limit = config.max_rows.unwrap_or(usize::MAX);
        let rows: Vec<[String; 5]> = result
            .rows
            .iter()
            .take(limit)
            .map(|row| {
                [
                    row.sentence.to_string(),
                    truncate(&row.frame, MAX_CELL_WIDTH),
                    truncate(&row.key, MAX_CELL_WIDTH),
                    truncate(&row.left.render(&config.absent_marker), MAX_CELL_WIDTH),
                    truncate(&row.right.render(&config.absent_marker), MAX_CELL_WIDTH),
                ]
            })
            .collect();

        let mut widths = header.clone().map(|h| h.width());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        let header_line = join_padded(&header, &widths);
        lines.push(self.color(&header_line, "bold"));
        lines.push(self.color(&"─".repeat(header_line.width()), "dim"));
        for row in &rows {
            lines.push(join_padded(row, &widths));
        }
        if result.rows.len() > rows.len() {
            lines.push(self.color(
                &format!("... and {} more", result.rows.len() - rows.len()),
                "dim",
            ));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, result: &DiffResult, config: &ReportConfig) -> Result<String, ReportError> {
        let summary = &result.summary;
        let mut lines = Vec::new();

        // Header
        lines.push(self.color("Annotation Diff Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {} ↔ {}",
            self.color("Files:", "cyan"),
            result.left_name,
            result.right_name
        ));
        lines.push(format!(
            "{}  {} sentences, {} matched frames",
            self.color("Size:", "cyan"),
            summary.sentences,
            summary.frames_matched
        ));
        lines.push(String::new());

        lines.push(self.color("Discrepancies:", "bold"));
        if result.has_changes() {
            lines.push(format!("  {} attribute rows", summary.attribute_rows));
            lines.push(format!(
                "  {} link rows ({} with candidates)",
                summary.link_rows, summary.candidate_rows
            ));
            if summary.frames_only_left > 0 {
                lines.push(format!(
                    "  {} frames only in file 1",
                    self.color(&format!("-{}", summary.frames_only_left), "red")
                ));
            }
            if summary.frames_only_right > 0 {
                lines.push(format!(
                    "  {} frames only in file 2",
                    self.color(&format!("+{}", summary.frames_only_right), "green")
                ));
            }
        } else {
            lines.push(format!("  {}", self.color("None, annotations agree", "green")));
        }

        if config.include_warnings && result.has_warnings() {
            lines.push(String::new());
            lines.push(self.color(&format!("Warnings ({}):", result.warnings.len()), "yellow"));
            for warning in &result.warnings {
                lines.push(format!("  {warning}"));
            }
        }

        if result.has_changes() {
            lines.push(String::new());
            self.push_table(&mut lines, result, config);
        }

        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Join cells, padding each to its column's display width.
fn join_padded(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        if i + 1 < cells.len() {
            line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
        }
    }
    line
}

/// Cut `s` to at most `max` display columns, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(1);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
