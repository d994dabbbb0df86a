//! Annotation diff engine.
//!
//! Compares two annotations of the same tokenized text in stages:
//!
//! 1. [`align_sentences`] pairs sentences by position and fails fast when
//!    the texts differ.
//! 2. [`align_frames`] pairs frames inside each sentence by anchor and type.
//! 3. Change computers ([`AttributeDiffer`], [`LinkResolver`]) report what
//!    differs on each matched pair.
//! 4. [`ReportAssembler`] merges the per-sentence blocks in sentence order.
//!
//! # Example
//!
//! ```ignore
//! use anno_diff::diff::DiffEngine;
//!
//! let engine = DiffEngine::new();
//! let result = engine.diff(&left, &right)?;
//! for row in &result.rows {
//!     println!("{} {} {}", row.sentence, row.frame, row.key);
//! }
//! ```

mod assembler;
mod attributes;
mod engine;
pub mod frames;
mod links;
mod result;
pub mod sentences;
pub mod traits;

pub use assembler::ReportAssembler;
pub use attributes::AttributeDiffer;
pub use engine::{DiffEngine, DEFAULT_PARALLEL_THRESHOLD};
pub use frames::{align_frames, FramePairMatch, MatchIndex, SentenceAlignment};
pub use links::{LinkOutcome, LinkResolver};
pub use result::{
    DiffResult, DiffRow, DiffSummary, DiffValue, RowKind, SentenceReport, FRAME_KEY,
    ROLE_KEY_SUFFIX,
};
pub use sentences::{align_sentences, SentencePair};
pub use traits::{ChangeComputer, LinkChangeSet, PairContext};
