//! Parser trait definitions and error types.

use crate::model::Document;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading an annotation export
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("XML parse error: {0}")]
    XmlError(String),

    #[error("No sofa element with document text found")]
    MissingSofa,

    #[error("Invalid offset '{value}' in {element} element")]
    InvalidOffset { element: String, value: String },

    #[error("Span {begin}..{end} of {element} element lies outside the document text ({len} characters)")]
    OffsetOutOfBounds {
        element: String,
        begin: usize,
        end: usize,
        len: usize,
    },
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlError(err.to_string())
    }
}

/// Trait for annotation export parsers
pub trait DocumentParser {
    /// Parse a document from a file path; the file name becomes the document name
    fn parse(&self, path: &Path) -> Result<Document, ParseError> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        self.parse_str(&name, &content)
    }

    /// Parse a document from string content
    fn parse_str(&self, name: &str, content: &str) -> Result<Document, ParseError>;

    /// Get format name
    fn format_name(&self) -> &str;
}
