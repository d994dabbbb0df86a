//! Trait definitions for per-pair change computation.
//!
//! Each computer looks at one matched frame pair and reports what differs,
//! so the engine can run attribute and link comparison side by side.

use super::frames::{FramePairMatch, MatchIndex};
use super::DiffRow;
use crate::error::DanglingLinkError;
use crate::model::Document;

/// Everything a change computer may consult about one matched frame pair.
#[derive(Debug, Clone, Copy)]
pub struct PairContext<'a> {
    /// 1-based sentence index
    pub sentence: usize,
    pub pair: FramePairMatch<'a>,
    pub left_doc: &'a Document,
    pub right_doc: &'a Document,
    pub matches: &'a MatchIndex<'a>,
}

/// Trait for computing a specific type of change on a matched frame pair.
pub trait ChangeComputer: Send + Sync {
    /// The type of changes this computer produces.
    type ChangeSet;

    /// Compute changes for one frame pair.
    fn compute(&self, ctx: &PairContext<'_>) -> Self::ChangeSet;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &str;
}

/// Link rows for one frame pair together with the warnings raised on the way.
#[derive(Debug, Clone, Default)]
pub struct LinkChangeSet {
    pub rows: Vec<DiffRow>,
    pub warnings: Vec<DanglingLinkError>,
}

impl LinkChangeSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.warnings.is_empty()
    }

    /// Add a row unless an identical one was already recorded
    pub fn push_row(&mut self, row: DiffRow) {
        if !self.rows.contains(&row) {
            self.rows.push(row);
        }
    }
}
