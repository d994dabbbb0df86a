//! Export parsing stage.

use crate::model::Document;
use crate::parsers::{parse_document_with_schema, XmiSchema};
use anyhow::{Context, Result};
use std::path::Path;

/// Parse an XMI export with context for error messages
pub fn parse_document_with_context(path: &Path, schema: &XmiSchema, quiet: bool) -> Result<Document> {
    if !quiet {
        tracing::info!("Parsing export: {:?}", path);
    }

    let doc = parse_document_with_schema(path, schema)
        .with_context(|| format!("Failed to parse annotation export: {}", path.display()))?;

    if !quiet {
        tracing::info!(
            "Parsed {} sentences, {} frames, {} links",
            doc.sentence_count(),
            doc.frame_count(),
            doc.link_count()
        );
    }

    Ok(doc)
}
