//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffResult, DiffRow, DiffSummary};
use crate::error::DanglingLinkError;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Whether to only include summary
    summary_only: bool,
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            summary_only: false,
            pretty: true,
        }
    }

    /// Create a summary-only reporter
    #[must_use]
    pub const fn summary_only() -> Self {
        Self {
            summary_only: true,
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &DiffResult, config: &ReportConfig) -> Result<String, ReportError> {
        let warnings = if config.include_warnings {
            result
                .warnings
                .iter()
                .map(|w| JsonWarning {
                    message: w.to_string(),
                    detail: w,
                })
                .collect()
        } else {
            Vec::new()
        };

        let report = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "anno-diff".to_string(),
                    version: config.metadata.tool_version.clone(),
                },
                generated_at: config
                    .metadata
                    .generated_at
                    .clone()
                    .unwrap_or_else(|| Utc::now().to_rfc3339()),
                file_1: FileInfo {
                    name: result.left_name.clone(),
                    path: config.metadata.left_path.clone(),
                },
                file_2: FileInfo {
                    name: result.right_name.clone(),
                    path: config.metadata.right_path.clone(),
                },
            },
            summary: &result.summary,
            rows: if self.summary_only { None } else { Some(&result.rows) },
            warnings,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
        .map_err(|e| ReportError::SerializationError(e.to_string()))?;
        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata,
    summary: &'a DiffSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<&'a Vec<DiffRow>>,
    warnings: Vec<JsonWarning<'a>>,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    file_1: FileInfo,
    file_2: FileInfo,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct FileInfo {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

#[derive(Serialize)]
struct JsonWarning<'a> {
    message: String,
    #[serde(flatten)]
    detail: &'a DanglingLinkError,
}
