//! Annotation diff engine implementation.

use super::assembler::ReportAssembler;
use super::attributes::AttributeDiffer;
use super::frames::{align_frames, MatchIndex, SentenceAlignment};
use super::links::LinkResolver;
use super::result::FRAME_KEY;
use super::sentences::align_sentences;
use super::traits::{ChangeComputer, PairContext};
use super::{DiffResult, DiffRow, DiffValue, RowKind, SentenceReport};
use crate::error::{AlignmentError, Side};
use crate::model::{Document, Frame};
use rayon::prelude::*;

/// Sentence count from which sentences are processed in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Diff engine comparing two annotations of the same text.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    parallel: bool,
    parallel_threshold: usize,
    identical_shortcut: bool,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            identical_shortcut: true,
        }
    }

    /// Enable or disable parallel sentence processing
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the sentence count from which work is spread over threads
    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Skip the comparison when both documents have the same content hash
    #[must_use]
    pub const fn with_identical_shortcut(mut self, enabled: bool) -> Self {
        self.identical_shortcut = enabled;
        self
    }

    #[must_use]
    pub const fn parallel(&self) -> bool {
        self.parallel
    }

    #[must_use]
    pub const fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Compare two documents and return the diff result.
    ///
    /// Fails without producing any rows when the documents cannot be aligned.
    pub fn diff(&self, left: &Document, right: &Document) -> Result<DiffResult, AlignmentError> {
        let pairs = align_sentences(left, right)?;

        // Equal hashes are only a hint; the sentences must be equal too
        if self.identical_shortcut
            && left.content_hash == right.content_hash
            && left.content_hash != 0
            && left.sentences == right.sentences
        {
            tracing::debug!("Content hashes match, skipping frame comparison");
            let mut result = DiffResult::new(left.source.clone(), right.source.clone());
            result.summary.sentences = pairs.len();
            result.summary.frames_matched = left.frame_count();
            return Ok(result);
        }

        let use_parallel = self.parallel && pairs.len() >= self.parallel_threshold;
        tracing::debug!(sentences = pairs.len(), parallel = use_parallel, "Aligning frames");

        let alignments: Vec<SentenceAlignment<'_>> = if use_parallel {
            pairs.par_iter().map(align_frames).collect()
        } else {
            pairs.iter().map(align_frames).collect()
        };
        let index = MatchIndex::build(&alignments);

        let blocks: Vec<SentenceReport> = if use_parallel {
            alignments
                .par_iter()
                .map(|a| Self::diff_sentence(a, left, right, &index))
                .collect()
        } else {
            alignments
                .iter()
                .map(|a| Self::diff_sentence(a, left, right, &index))
                .collect()
        };

        let result = ReportAssembler::new(left.source.clone(), right.source.clone()).assemble(blocks);
        tracing::debug!(
            rows = result.summary.total_rows,
            warnings = result.summary.warnings,
            "Comparison finished"
        );
        Ok(result)
    }

    /// Compute all rows of one sentence using the change computers.
    fn diff_sentence(
        alignment: &SentenceAlignment<'_>,
        left: &Document,
        right: &Document,
        index: &MatchIndex<'_>,
    ) -> SentenceReport {
        let attribute_differ = AttributeDiffer::new();
        let link_resolver = LinkResolver::new();

        let mut report = SentenceReport {
            index: alignment.index,
            frames_matched: alignment.pairs.len(),
            frames_only_left: alignment.only_left.len(),
            frames_only_right: alignment.only_right.len(),
            ..SentenceReport::default()
        };

        for pair in &alignment.pairs {
            let ctx = PairContext {
                sentence: alignment.index,
                pair: *pair,
                left_doc: left,
                right_doc: right,
                matches: index,
            };
            report.rows.extend(attribute_differ.compute(&ctx));

            let links = link_resolver.compute(&ctx);
            report.rows.extend(links.rows);
            report.warnings.extend(links.warnings);
        }

        for frame in &alignment.only_left {
            report.rows.push(residual_row(alignment.index, frame, Side::Left));
        }
        for frame in &alignment.only_right {
            report.rows.push(residual_row(alignment.index, frame, Side::Right));
        }
        report
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Row for a frame that exists only on `side`.
fn residual_row(sentence: usize, frame: &Frame, side: Side) -> DiffRow {
    let present = DiffValue::Text(describe_frame(frame));
    let (left, right) = match side {
        Side::Left => (present, DiffValue::Absent),
        Side::Right => (DiffValue::Absent, present),
    };
    DiffRow::new(sentence, frame.anchor.clone(), FRAME_KEY, left, right, RowKind::Residual)
}

fn describe_frame(frame: &Frame) -> String {
    if frame.attributes.is_empty() {
        return frame.frame_type.clone();
    }
    let attributes: Vec<String> = frame
        .attributes
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    format!("{} [{}]", frame.frame_type, attributes.join(", "))
}
