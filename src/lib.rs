//! **Inter-annotator comparison for WebAnno frame annotations.**
//!
//! `anno-diff` reads two XMI exports of the same source text, annotated
//! independently, and reports every place where the annotators disagree: a
//! differing attribute value, a frame link with a different target or role,
//! or a frame that only one annotator created.
//!
//! Frames carry document-local ids, so the two exports cannot be compared
//! by id. Instead the engine aligns sentences, then pairs frames inside each
//! sentence by anchor text and frame type, and finally resolves each frame
//! link through that pairing.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The in-memory [`Document`] with its sentences, frames and links.
//! - **[`parsers`]**: The XMI reader producing a [`Document`], configurable through [`XmiSchema`].
//! - **[`diff`]**: Home of the [`DiffEngine`] and the aligners, differs and resolver it drives.
//! - **[`reports`]**: CSV, JSON and terminal summary writers.
//! - **[`pipeline`]**: Parse → diff → report stages shared by the CLI.
//!
//! ## Comparing two exports
//!
//! ```no_run
//! use std::path::Path;
//! use anno_diff::{parse_document, DiffEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let left = parse_document(Path::new("annotator-1.xmi"))?;
//!     let right = parse_document(Path::new("annotator-2.xmi"))?;
//!
//!     let result = DiffEngine::new().diff(&left, &right)?;
//!     for row in &result.rows {
//!         println!(
//!             "{} | {} | {} | {} | {}",
//!             row.sentence,
//!             row.frame,
//!             row.key,
//!             row.left.render("(absent)"),
//!             row.right.render("(absent)")
//!         );
//!     }
//!     for warning in &result.warnings {
//!         eprintln!("warning: {warning}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Documents that do not describe the same text fail with an
//! [`AlignmentError`] before any row is produced.
//!
//! ## Writing the discrepancy log
//!
//! ```no_run
//! use anno_diff::diff::DiffResult;
//! use anno_diff::reports::{create_reporter, ReportConfig, ReportFormat};
//!
//! fn write(result: &DiffResult) -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReportConfig::default().with_delimiter(';');
//!     let csv = create_reporter(ReportFormat::Csv).generate(result, &config)?;
//!     std::fs::write("log.csv", csv)?;
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, BehaviorConfig, ComparisonConfig, OutputConfig};
pub use config::{ConfigError, DiffConfig, Validatable};
pub use diff::{DiffEngine, DiffResult, DiffRow, DiffSummary, DiffValue, RowKind};
pub use error::{AlignmentError, AlignmentMismatch, DanglingLinkError, Side};
pub use model::{Document, Frame, FrameId, FrameLink, Sentence};
pub use parsers::{parse_document, parse_document_str, DocumentParser, XmiParser, XmiSchema};
pub use reports::{ReportFormat, ReportGenerator};
