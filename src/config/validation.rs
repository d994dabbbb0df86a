//! Configuration validation for anno-diff.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, ComparisonConfig, DiffConfig, OutputConfig};
use crate::parsers::XmiSchema;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.schema.validate());
        errors.extend(self.comparison.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.paths.left.as_os_str().is_empty() {
            errors.push(ConfigError::new("paths.left", "File 1 path is empty"));
        }
        if self.paths.right.as_os_str().is_empty() {
            errors.push(ConfigError::new("paths.right", "File 2 path is empty"));
        }
        errors.extend(self.schema.validate());
        errors.extend(self.comparison.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for XmiSchema {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let names = [
            ("schema.sofa_element", &self.sofa_element),
            ("schema.sentence_element", &self.sentence_element),
            ("schema.link_target_feature", &self.link_target_feature),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                errors.push(ConfigError::new(field, "Must not be empty"));
            }
        }

        if self.span_layers.is_empty() {
            errors.push(ConfigError::new(
                "schema.span_layers",
                "At least one span layer is required",
            ));
        }

        for layer in &self.link_layers {
            if self.span_layers.contains(layer) {
                errors.push(ConfigError::new(
                    "schema.link_layers",
                    format!("'{layer}' is listed as both a span layer and a link layer"),
                ));
            }
        }

        errors
    }
}

impl Validatable for ComparisonConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if matches!(self.delimiter, '"' | '\n' | '\r') {
            errors.push(ConfigError::new(
                "output.delimiter",
                format!("{:?} cannot be used as a field delimiter", self.delimiter),
            ));
        }

        // Validate output file path if specified
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}
