//! Sentence alignment.
//!
//! Pairs sentence *i* of file 1 with sentence *i* of file 2 and refuses to
//! go on when the two exports were not built over the same tokenized text.

use crate::error::{AlignmentError, AlignmentMismatch};
use crate::model::{Document, Sentence};

/// Two sentences that share the same ordinal and tokens.
#[derive(Debug, Clone, Copy)]
pub struct SentencePair<'a> {
    /// 1-based sentence index
    pub index: usize,
    pub left: &'a Sentence,
    pub right: &'a Sentence,
}

/// Align the sentences of two documents by position.
///
/// Fails on the first sentence whose token count or token text differs.
/// No pairs are produced in that case.
pub fn align_sentences<'a>(
    left: &'a Document,
    right: &'a Document,
) -> Result<Vec<SentencePair<'a>>, AlignmentError> {
    if left.sentence_count() != right.sentence_count() {
        return Err(AlignmentError::sentence_count(
            left.sentence_count(),
            right.sentence_count(),
        ));
    }

    left.sentences
        .iter()
        .zip(&right.sentences)
        .enumerate()
        .map(|(i, (l, r))| {
            let index = i + 1;
            check_tokens(l, r).map_err(|reason| AlignmentError::at(index, reason))?;
            Ok(SentencePair {
                index,
                left: l,
                right: r,
            })
        })
        .collect()
}

fn check_tokens(left: &Sentence, right: &Sentence) -> Result<(), AlignmentMismatch> {
    if left.tokens.len() != right.tokens.len() {
        return Err(AlignmentMismatch::TokenCount {
            left: left.tokens.len(),
            right: right.tokens.len(),
        });
    }

    match left
        .tokens
        .iter()
        .zip(&right.tokens)
        .position(|(l, r)| l != r)
    {
        Some(pos) => Err(AlignmentMismatch::Token {
            position: pos + 1,
            left: left.tokens[pos].clone(),
            right: right.tokens[pos].clone(),
        }),
        None => Ok(()),
    }
}
