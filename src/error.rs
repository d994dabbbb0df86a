//! Error types for anno-diff.
//!
//! A fatal [`AlignmentError`] aborts the comparison. Recoverable data-quality
//! issues ([`DanglingLinkError`]) are collected alongside the diff instead.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why two documents cannot be aligned sentence by sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AlignmentMismatch {
    /// The documents have a different number of sentences
    SentenceCount { left: usize, right: usize },
    /// A sentence has a different number of tokens
    TokenCount { left: usize, right: usize },
    /// A token differs at the given 1-based position
    Token {
        position: usize,
        left: String,
        right: String,
    },
}

impl fmt::Display for AlignmentMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SentenceCount { left, right } => {
                write!(f, "sentence count differs ({left} vs {right})")
            }
            Self::TokenCount { left, right } => {
                write!(f, "token count differs ({left} vs {right})")
            }
            Self::Token {
                position,
                left,
                right,
            } => write!(f, "token {position} differs ('{left}' vs '{right}')"),
        }
    }
}

/// Fatal precondition failure: the inputs are not comparable at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Documents cannot be aligned{}: {reason}", sentence_suffix(.sentence))]
pub struct AlignmentError {
    /// 1-based sentence index, `None` when the documents disagree globally
    pub sentence: Option<usize>,
    pub reason: AlignmentMismatch,
}

fn sentence_suffix(sentence: &Option<usize>) -> String {
    sentence.map_or_else(String::new, |s| format!(" at sentence {s}"))
}

impl AlignmentError {
    #[must_use]
    pub const fn sentence_count(left: usize, right: usize) -> Self {
        Self {
            sentence: None,
            reason: AlignmentMismatch::SentenceCount { left, right },
        }
    }

    #[must_use]
    pub const fn at(sentence: usize, reason: AlignmentMismatch) -> Self {
        Self {
            sentence: Some(sentence),
            reason,
        }
    }
}

/// Which input a document-local problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// 1-based file number as shown in reports
    #[must_use]
    pub const fn file_number(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Right => 2,
        }
    }
}

/// A frame link whose target id names no frame in its own document.
///
/// Recorded against that one link; the comparison continues.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error(
    "{document} (file {}): sentence {sentence}, frame '{frame}': {link_type} link targets unknown frame '{target}'",
    .side.file_number()
)]
pub struct DanglingLinkError {
    pub side: Side,
    pub document: String,
    pub sentence: usize,
    pub frame: String,
    pub link_type: String,
    pub target: String,
}

impl DanglingLinkError {
    /// The same warning, attributed to the other input
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            side: self.side.flipped(),
            ..self.clone()
        }
    }
}
