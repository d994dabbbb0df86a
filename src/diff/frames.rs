//! Frame matching within aligned sentences.
//!
//! Frames are paired by lexical anchor and frame type. When several frames
//! share both in one sentence they are paired by order of appearance, so
//! identical inputs always produce identical pairings.

use super::sentences::SentencePair;
use crate::error::Side;
use crate::model::{Frame, FrameId};
use std::collections::HashMap;

/// A frame of file 1 paired with its counterpart in file 2.
#[derive(Debug, Clone, Copy)]
pub struct FramePairMatch<'a> {
    pub left: &'a Frame,
    pub right: &'a Frame,
}

impl<'a> FramePairMatch<'a> {
    #[must_use]
    pub const fn new(left: &'a Frame, right: &'a Frame) -> Self {
        Self { left, right }
    }

    /// The frame on the given side
    #[must_use]
    pub const fn frame(&self, side: Side) -> &'a Frame {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Frame matching outcome for one sentence pair.
#[derive(Debug, Clone, Default)]
pub struct SentenceAlignment<'a> {
    /// 1-based sentence index
    pub index: usize,
    /// Matched frames, in file 1 order
    pub pairs: Vec<FramePairMatch<'a>>,
    /// Frames of file 1 without counterpart, in file 1 order
    pub only_left: Vec<&'a Frame>,
    /// Frames of file 2 without counterpart, in file 2 order
    pub only_right: Vec<&'a Frame>,
}

type GroupKey<'a> = (&'a str, &'a str);

fn group_key(frame: &Frame) -> GroupKey<'_> {
    (frame.anchor.as_str(), frame.frame_type.as_str())
}

/// Pair the frames of two aligned sentences.
#[must_use]
pub fn align_frames<'a>(pair: &SentencePair<'a>) -> SentenceAlignment<'a> {
    let mut right_groups: HashMap<GroupKey<'a>, Vec<&'a Frame>> = HashMap::new();
    for frame in &pair.right.frames {
        right_groups.entry(group_key(frame)).or_default().push(frame);
    }

    let mut alignment = SentenceAlignment {
        index: pair.index,
        ..SentenceAlignment::default()
    };

    // Ordinal of each frame within its group on the left side
    let mut left_seen: HashMap<GroupKey<'a>, usize> = HashMap::new();
    for frame in &pair.left.frames {
        let key = group_key(frame);
        let ordinal = left_seen.entry(key).or_insert(0);
        match right_groups.get(&key).and_then(|group| group.get(*ordinal)) {
            Some(counterpart) => alignment.pairs.push(FramePairMatch::new(frame, counterpart)),
            None => alignment.only_left.push(frame),
        }
        *ordinal += 1;
    }

    let mut right_seen: HashMap<GroupKey<'a>, usize> = HashMap::new();
    for frame in &pair.right.frames {
        let key = group_key(frame);
        let ordinal = right_seen.entry(key).or_insert(0);
        if *ordinal >= left_seen.get(&key).copied().unwrap_or(0) {
            alignment.only_right.push(frame);
        }
        *ordinal += 1;
    }

    tracing::trace!(
        sentence = pair.index,
        matched = alignment.pairs.len(),
        only_left = alignment.only_left.len(),
        only_right = alignment.only_right.len(),
        "Aligned frames"
    );
    alignment
}

/// Run-wide lookup from a frame's local id to its matched counterpart.
///
/// Links may point at frames in other sentences, so the index covers every
/// sentence of the run.
#[derive(Debug, Default)]
pub struct MatchIndex<'a> {
    left_to_right: HashMap<&'a FrameId, &'a Frame>,
    right_to_left: HashMap<&'a FrameId, &'a Frame>,
}

impl<'a> MatchIndex<'a> {
    /// Build the index from all sentence alignments of a run
    #[must_use]
    pub fn build(alignments: &[SentenceAlignment<'a>]) -> Self {
        let mut index = Self::default();
        for pair in alignments.iter().flat_map(|a| &a.pairs) {
            index.left_to_right.entry(&pair.left.id).or_insert(pair.right);
            index.right_to_left.entry(&pair.right.id).or_insert(pair.left);
        }
        index
    }

    /// Counterpart of a frame that lives on side `side`, if it was matched
    #[must_use]
    pub fn counterpart(&self, side: Side, id: &FrameId) -> Option<&'a Frame> {
        let map = match side {
            Side::Left => &self.left_to_right,
            Side::Right => &self.right_to_left,
        };
        map.get(id).copied()
    }

    /// Number of matched frame pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.left_to_right.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left_to_right.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sentence;

    fn pair<'a>(left: &'a Sentence, right: &'a Sentence) -> SentencePair<'a> {
        SentencePair {
            index: 1,
            left,
            right,
        }
    }

    #[test]
    fn test_pairs_by_anchor_and_type() {
        let left = Sentence::new(1, "Wie geht es dir")
            .with_frame(Frame::new("10", "Frame", "geht es"))
            .with_frame(Frame::new("11", "FE", "dir"));
        let right = Sentence::new(1, "Wie geht es dir")
            .with_frame(Frame::new("7", "FE", "dir"))
            .with_frame(Frame::new("3", "Frame", "geht es"));

        let alignment = align_frames(&pair(&left, &right));
        assert_eq!(alignment.pairs.len(), 2);
        assert_eq!(alignment.pairs[0].left.id.as_str(), "10");
        assert_eq!(alignment.pairs[0].right.id.as_str(), "3");
        assert_eq!(alignment.pairs[1].right.id.as_str(), "7");
        assert!(alignment.only_left.is_empty());
        assert!(alignment.only_right.is_empty());
    }

    #[test]
    fn test_same_anchor_different_type_is_not_matched() {
        let left = Sentence::new(1, "Peter sagt").with_frame(Frame::new("1", "FE", "Peter"));
        let right = Sentence::new(1, "Peter sagt").with_frame(Frame::new("1", "Frame", "Peter"));

        let alignment = align_frames(&pair(&left, &right));
        assert!(alignment.pairs.is_empty());
        assert_eq!(alignment.only_left.len(), 1);
        assert_eq!(alignment.only_right.len(), 1);
    }

    #[test]
    fn test_duplicates_pair_in_order_of_appearance() {
        let left = Sentence::new(1, "gut und gut")
            .with_frame(Frame::new("a1", "FE", "gut"))
            .with_frame(Frame::new("a2", "FE", "gut"))
            .with_frame(Frame::new("a3", "FE", "gut"));
        let right = Sentence::new(1, "gut und gut")
            .with_frame(Frame::new("b1", "FE", "gut"))
            .with_frame(Frame::new("b2", "FE", "gut"));

        let alignment = align_frames(&pair(&left, &right));
        let ids: Vec<_> = alignment
            .pairs
            .iter()
            .map(|p| (p.left.id.as_str(), p.right.id.as_str()))
            .collect();
        assert_eq!(ids, vec![("a1", "b1"), ("a2", "b2")]);
        assert_eq!(alignment.only_left[0].id.as_str(), "a3");
        assert!(alignment.only_right.is_empty());
    }

    #[test]
    fn test_matched_frame_appears_in_one_pair_only() {
        let left = Sentence::new(1, "x").with_frame(Frame::new("a", "FE", "x"));
        let right = Sentence::new(1, "x")
            .with_frame(Frame::new("b", "FE", "x"))
            .with_frame(Frame::new("c", "FE", "x"));

        let alignment = align_frames(&pair(&left, &right));
        assert_eq!(alignment.pairs.len(), 1);
        assert_eq!(alignment.only_right.len(), 1);
        assert_eq!(alignment.only_right[0].id.as_str(), "c");
    }

    #[test]
    fn test_match_index_counterparts() {
        let left = Sentence::new(1, "Wie geht es dir").with_frame(Frame::new("11", "FE", "dir"));
        let right = Sentence::new(1, "Wie geht es dir").with_frame(Frame::new("42", "FE", "dir"));
        let alignments = vec![align_frames(&pair(&left, &right))];
        let index = MatchIndex::build(&alignments);

        assert_eq!(index.len(), 1);
        let right_frame = index
            .counterpart(Side::Left, &FrameId::new("11"))
            .expect("11 is matched");
        assert_eq!(right_frame.id.as_str(), "42");
        let left_frame = index
            .counterpart(Side::Right, &FrameId::new("42"))
            .expect("42 is matched");
        assert_eq!(left_frame.id.as_str(), "11");
        assert!(index.counterpart(Side::Left, &FrameId::new("42")).is_none());
    }
}
