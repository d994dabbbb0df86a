//! Configuration types for anno-diff operations.
//!
//! Provides structured configuration for a comparison run.

use crate::diff::DEFAULT_PARALLEL_THRESHOLD;
use crate::parsers::XmiSchema;
use crate::reports::{ReportFormat, DEFAULT_ABSENT_MARKER};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default field delimiter of the discrepancy log.
pub const DEFAULT_DELIMITER: char = ',';

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are merged over file settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Element and feature names of the XMI export
    pub schema: XmiSchema,
    /// Comparison engine settings
    pub comparison: ComparisonConfig,
    /// Output configuration (format, delimiter, header)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the XMI schema.
    pub fn schema(mut self, schema: XmiSchema) -> Self {
        self.config.schema = schema;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Set the field delimiter.
    pub const fn delimiter(mut self, delimiter: char) -> Self {
        self.config.output.delimiter = delimiter;
        self
    }

    /// Label value columns with the input file names.
    pub const fn header_file_names(mut self, enabled: bool) -> Self {
        self.config.output.header_file_names = enabled;
        self
    }

    /// Enable or disable parallel sentence processing.
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.config.comparison.parallel = parallel;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable fail-on-warning mode.
    pub const fn fail_on_warning(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_warning = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for diff operations
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Paths to compare
    pub paths: DiffPaths,
    /// XMI element and feature names
    pub schema: XmiSchema,
    /// Comparison engine settings
    pub comparison: ComparisonConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to file 1
    pub left: PathBuf,
    /// Path to file 2
    pub right: PathBuf,
}

impl DiffConfig {
    /// Assemble a run configuration from an application config.
    #[must_use]
    pub fn from_app_config(paths: DiffPaths, config: AppConfig) -> Self {
        Self {
            paths,
            schema: config.schema,
            comparison: config.comparison,
            output: config.output,
            behavior: config.behavior,
        }
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Comparison engine settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Process sentences on multiple threads
    pub parallel: bool,
    /// Sentence count from which parallel processing kicks in
    pub parallel_threshold: usize,
    /// Skip the comparison when both documents hash identically
    pub identical_shortcut: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            identical_shortcut: true,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Field delimiter for the CSV log
    pub delimiter: char,
    /// Text written for values absent on one side
    pub absent_marker: String,
    /// Label the value columns with the input file names instead of "Value File 1/2"
    pub header_file_names: bool,
    /// Disable colored output
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Csv,
            file: None,
            delimiter: DEFAULT_DELIMITER,
            absent_marker: DEFAULT_ABSENT_MARKER.to_string(),
            header_file_names: false,
            no_color: false,
        }
    }
}

/// Behavior flags for diff operations
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any discrepancy is found
    pub fail_on_change: bool,
    /// Exit with code 2 if any dangling link is found
    pub fail_on_warning: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// Builder for DiffConfig
// ============================================================================

/// Builder for `DiffConfig`
#[derive(Debug, Default)]
pub struct DiffConfigBuilder {
    left: Option<PathBuf>,
    right: Option<PathBuf>,
    schema: XmiSchema,
    comparison: ComparisonConfig,
    output: OutputConfig,
    behavior: BehaviorConfig,
}

impl DiffConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn left_path(mut self, path: PathBuf) -> Self {
        self.left = Some(path);
        self
    }

    #[must_use]
    pub fn right_path(mut self, path: PathBuf) -> Self {
        self.right = Some(path);
        self
    }

    #[must_use]
    pub fn schema(mut self, schema: XmiSchema) -> Self {
        self.schema = schema;
        self
    }

    #[must_use]
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.output.format = format;
        self
    }

    #[must_use]
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.output.file = file;
        self
    }

    #[must_use]
    pub const fn delimiter(mut self, delimiter: char) -> Self {
        self.output.delimiter = delimiter;
        self
    }

    #[must_use]
    pub const fn header_file_names(mut self, enabled: bool) -> Self {
        self.output.header_file_names = enabled;
        self
    }

    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.comparison.parallel = parallel;
        self
    }

    #[must_use]
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.behavior.fail_on_change = fail;
        self
    }

    #[must_use]
    pub const fn fail_on_warning(mut self, fail: bool) -> Self {
        self.behavior.fail_on_warning = fail;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.behavior.quiet = quiet;
        self
    }

    pub fn build(self) -> anyhow::Result<DiffConfig> {
        let left = self.left.ok_or_else(|| anyhow::anyhow!("file 1 path is required"))?;
        let right = self.right.ok_or_else(|| anyhow::anyhow!("file 2 path is required"))?;

        Ok(DiffConfig {
            paths: DiffPaths { left, right },
            schema: self.schema,
            comparison: self.comparison,
            output: self.output,
            behavior: self.behavior,
        })
    }
}
