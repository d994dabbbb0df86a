//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Marker written for a value that does not exist on one side.
pub const DEFAULT_ABSENT_MARKER: &str = "(absent)";

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Delimited log with one row per discrepancy
    #[default]
    Csv,
    /// Structured JSON output
    Json,
    /// Brief terminal summary with an aligned table
    Summary,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Field delimiter for delimited output
    pub delimiter: char,
    /// Text written for absent values
    pub absent_marker: String,
    /// Label the value columns with the input file names
    pub header_file_names: bool,
    /// Include warnings in the report
    pub include_warnings: bool,
    /// Maximum table rows in terminal output
    pub max_rows: Option<usize>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            absent_marker: DEFAULT_ABSENT_MARKER.to_string(),
            header_file_names: false,
            include_warnings: true,
            max_rows: None,
            metadata: ReportMetadata::new(),
        }
    }
}

impl ReportConfig {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_absent_marker(mut self, marker: impl Into<String>) -> Self {
        self.absent_marker = marker.into();
        self
    }

    #[must_use]
    pub const fn with_file_name_header(mut self, enabled: bool) -> Self {
        self.header_file_names = enabled;
        self
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// File 1 path
    pub left_path: Option<String>,
    /// File 2 path
    pub right_path: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp
    pub generated_at: Option<String>,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
