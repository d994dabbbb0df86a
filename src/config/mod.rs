//! Configuration module for anno-diff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use anno_diff::config::AppConfig;
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .delimiter(';')
//!     .header_file_names(true)
//!     .fail_on_change(true)
//!     .build();
//!
//! // Load from file
//! use anno_diff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.anno-diff.yaml` file in your project root or `~/.config/anno-diff/`:
//!
//! ```yaml
//! schema:
//!   span_layers: [Frame, FE]
//! output:
//!   delimiter: ";"
//! behavior:
//!   fail_on_warning: true
//! ```

pub mod file;
mod types;
mod validation;

// Re-export main types
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, ComparisonConfig, DiffConfig, DiffConfigBuilder,
    DiffPaths, OutputConfig, DEFAULT_DELIMITER,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    config_search_dirs, discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.anno-diff.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
