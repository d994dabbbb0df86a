//! Annotation export parsers.
//!
//! Converts WebAnno XMI exports into the in-memory [`Document`] model.
//!
//! ```no_run
//! use anno_diff::parsers::parse_document;
//! use std::path::Path;
//!
//! let doc = parse_document(Path::new("annotator-1.xmi")).unwrap();
//! println!("{} sentences, {} frames", doc.sentence_count(), doc.frame_count());
//! ```

mod traits;
mod xmi;

pub use traits::{DocumentParser, ParseError};
pub use xmi::{XmiParser, XmiSchema};

use crate::model::Document;
use std::path::Path;

/// Maximum export file size (512 MB).
const MAX_DOCUMENT_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Parse an XMI export with the default schema.
///
/// Returns an error if the file exceeds [`MAX_DOCUMENT_FILE_SIZE`] to prevent OOM.
pub fn parse_document(path: &Path) -> Result<Document, ParseError> {
    parse_document_with_schema(path, &XmiSchema::default())
}

/// Parse an XMI export with a custom layer schema.
pub fn parse_document_with_schema(path: &Path, schema: &XmiSchema) -> Result<Document, ParseError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_DOCUMENT_FILE_SIZE {
        return Err(ParseError::IoError(format!(
            "Export file is {} MB, exceeding the {} MB limit",
            metadata.len() / (1024 * 1024),
            MAX_DOCUMENT_FILE_SIZE / (1024 * 1024),
        )));
    }
    XmiParser::with_schema(schema.clone()).parse(path)
}

/// Parse an XMI export from string content with the default schema.
pub fn parse_document_str(name: &str, content: &str) -> Result<Document, ParseError> {
    XmiParser::new().parse_str(name, content)
}
