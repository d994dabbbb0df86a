//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::{ReportFormat, DEFAULT_ABSENT_MARKER};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".anno-diff.yaml",
    ".anno-diff.yml",
    "anno-diff.yaml",
    "anno-diff.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/anno-diff/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // 1. Use explicit path if provided
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    config_search_dirs()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Directories searched for a config file after the explicit path, in order.
#[must_use]
pub fn config_search_dirs() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let git_root = cwd.as_deref().and_then(find_git_root);
    [
        cwd,
        git_root,
        dirs::config_dir().map(|dir| dir.join("anno-diff")),
        dirs::home_dir(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Values equal to the defaults in `other` leave `self` untouched.
    pub fn merge(&mut self, other: &Self) {
        // Output config - only override if explicitly set
        if other.output.format != ReportFormat::Csv {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.delimiter != super::DEFAULT_DELIMITER {
            self.output.delimiter = other.output.delimiter;
        }
        if other.output.absent_marker != DEFAULT_ABSENT_MARKER {
            self.output.absent_marker.clone_from(&other.output.absent_marker);
        }
        if other.output.header_file_names {
            self.output.header_file_names = true;
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        // Comparison config - defaults are on, so only false overrides
        if !other.comparison.parallel {
            self.comparison.parallel = false;
        }
        if !other.comparison.identical_shortcut {
            self.comparison.identical_shortcut = false;
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.fail_on_warning {
            self.behavior.fail_on_warning = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# Annotation Diff Configuration
# Place this file at .anno-diff.yaml in your project root or ~/.config/anno-diff/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r#"# Annotation Diff Configuration File
# ===================================
#
# This file configures anno-diff behavior. Place it at:
#   - .anno-diff.yaml in your project root
#   - ~/.config/anno-diff/anno-diff.yaml for global config
#
# CLI arguments always override file settings.

# Names used by the XMI export
schema:
  sofa_element: Sofa
  sentence_element: Sentence
  token_element: Token
  # Span layers whose elements are compared as frames
  span_layers: [Frame, FE]
  # Link layers whose elements connect frames
  link_layers: [FELink]
  # Frame features listing link element ids
  link_features: [FE]
  link_target_feature: target
  link_role_feature: role
  # Features never compared as attributes
  ignored_features: [sofa, begin, end]

# Comparison engine
comparison:
  # Compare sentences on multiple threads
  parallel: true
  # Minimum sentence count for parallel processing
  parallel_threshold: 64
  # Skip work when both files have identical content
  identical_shortcut: true

# Output configuration
output:
  # Format: csv, json, summary
  format: csv
  # Field delimiter for csv output
  delimiter: ","
  # Text for values missing on one side
  absent_marker: "(absent)"
  # Use the input file names as value column headers
  header_file_names: false
  # Disable colored output
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 if any discrepancy is found
  fail_on_change: false
  # Exit with code 2 if any dangling link is found
  fail_on_warning: false
  # Suppress non-essential output
  quiet: false
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
