//! Diff result types.

use crate::error::DanglingLinkError;
use serde::Serialize;

/// Key used for rows reporting a frame present in only one document.
pub const FRAME_KEY: &str = "frame";

/// Suffix appended to the link type for rows comparing role-label sets.
pub const ROLE_KEY_SUFFIX: &str = ".role";

/// One side of a discrepancy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DiffValue {
    /// The key, link or frame does not exist on this side
    Absent,
    /// A single value
    Text(String),
    /// Every plausible counterpart when no unique correspondence exists
    Candidates(Vec<String>),
}

impl DiffValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Render the value as a single report cell
    #[must_use]
    pub fn render(&self, absent_marker: &str) -> String {
        match self {
            Self::Absent => absent_marker.to_string(),
            Self::Text(value) => value.clone(),
            Self::Candidates(candidates) => format!("[{}]", candidates.join(" | ")),
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<Option<&String>> for DiffValue {
    fn from(value: Option<&String>) -> Self {
        value.map_or(Self::Absent, |v| Self::Text(v.clone()))
    }
}

/// What a row reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Attribute values diverge on a matched frame pair
    Attribute,
    /// A uniquely matched link carries different role labels
    LinkRoles,
    /// A uniquely matched link points at a different target
    LinkTarget,
    /// No unique link correspondence; the other side lists all candidates
    LinkCandidates,
    /// A frame without counterpart in the other document
    Residual,
}

impl RowKind {
    #[must_use]
    pub const fn is_link(self) -> bool {
        matches!(self, Self::LinkRoles | Self::LinkTarget | Self::LinkCandidates)
    }
}

/// One discrepancy between the two annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DiffRow {
    /// 1-based sentence index
    pub sentence: usize,
    /// Lexical anchor of the frame
    pub frame: String,
    pub key: String,
    /// Value in file 1
    pub left: DiffValue,
    /// Value in file 2
    pub right: DiffValue,
    pub kind: RowKind,
}

impl DiffRow {
    pub fn new(
        sentence: usize,
        frame: impl Into<String>,
        key: impl Into<String>,
        left: DiffValue,
        right: DiffValue,
        kind: RowKind,
    ) -> Self {
        Self {
            sentence,
            frame: frame.into(),
            key: key.into(),
            left,
            right,
            kind,
        }
    }

    /// The same row with file 1 and file 2 swapped
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            left: self.right.clone(),
            right: self.left.clone(),
            ..self.clone()
        }
    }

    /// (sentence, frame, key) identity of the row
    #[must_use]
    pub fn triple(&self) -> (usize, &str, &str) {
        (self.sentence, &self.frame, &self.key)
    }
}

/// Diff summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub sentences: usize,
    pub frames_matched: usize,
    pub frames_only_left: usize,
    pub frames_only_right: usize,
    pub attribute_rows: usize,
    pub link_rows: usize,
    pub candidate_rows: usize,
    pub residual_rows: usize,
    pub warnings: usize,
    pub total_rows: usize,
}

impl DiffSummary {
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            frames_only_left: self.frames_only_right,
            frames_only_right: self.frames_only_left,
            ..self.clone()
        }
    }
}

/// Rows and warnings produced for one aligned sentence pair.
#[derive(Debug, Clone, Default)]
pub struct SentenceReport {
    /// 1-based sentence index
    pub index: usize,
    pub rows: Vec<DiffRow>,
    pub warnings: Vec<DanglingLinkError>,
    pub frames_matched: usize,
    pub frames_only_left: usize,
    pub frames_only_right: usize,
}

/// Complete result of comparing two documents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiffResult {
    /// Name of file 1
    pub left_name: String,
    /// Name of file 2
    pub right_name: String,
    /// Discrepancies in report order
    pub rows: Vec<DiffRow>,
    /// Data-quality issues found while resolving links
    pub warnings: Vec<DanglingLinkError>,
    pub summary: DiffSummary,
}

impl DiffResult {
    pub fn new(left_name: impl Into<String>, right_name: impl Into<String>) -> Self {
        Self {
            left_name: left_name.into(),
            right_name: right_name.into(),
            ..Self::default()
        }
    }

    /// Check if the documents disagree anywhere
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.rows.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Recompute the row and warning counts of the summary
    pub fn calculate_summary(&mut self) {
        let count = |pred: fn(RowKind) -> bool| self.rows.iter().filter(|r| pred(r.kind)).count();
        let attribute_rows = count(|k| k == RowKind::Attribute);
        let link_rows = count(RowKind::is_link);
        let candidate_rows = count(|k| k == RowKind::LinkCandidates);
        let residual_rows = count(|k| k == RowKind::Residual);

        self.summary.attribute_rows = attribute_rows;
        self.summary.link_rows = link_rows;
        self.summary.candidate_rows = candidate_rows;
        self.summary.residual_rows = residual_rows;
        self.summary.warnings = self.warnings.len();
        self.summary.total_rows = self.rows.len();
    }

    /// The result of comparing the documents in the opposite order
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            left_name: self.right_name.clone(),
            right_name: self.left_name.clone(),
            rows: self.rows.iter().map(DiffRow::mirrored).collect(),
            warnings: self.warnings.iter().map(DanglingLinkError::mirrored).collect(),
            summary: self.summary.mirrored(),
        }
    }
}
