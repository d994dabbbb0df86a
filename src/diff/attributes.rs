//! Attribute comparison for matched frame pairs.

use super::traits::{ChangeComputer, PairContext};
use super::{DiffRow, DiffValue, RowKind};
use crate::model::Frame;

/// Reports every attribute key whose value differs between two matched frames.
///
/// Values are compared byte for byte. A key present on one side only is
/// reported against [`DiffValue::Absent`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeDiffer;

impl AttributeDiffer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compare the attributes of two frames
    #[must_use]
    pub fn diff_frames(&self, sentence: usize, left: &Frame, right: &Frame) -> Vec<DiffRow> {
        let right_only = right
            .attributes
            .keys()
            .filter(|key| !left.attributes.contains_key(*key));

        left.attributes
            .keys()
            .chain(right_only)
            .filter_map(|key| {
                let l = left.attributes.get(key);
                let r = right.attributes.get(key);
                (l != r).then(|| {
                    DiffRow::new(
                        sentence,
                        left.anchor.clone(),
                        key.clone(),
                        DiffValue::from(l),
                        DiffValue::from(r),
                        RowKind::Attribute,
                    )
                })
            })
            .collect()
    }
}

impl ChangeComputer for AttributeDiffer {
    type ChangeSet = Vec<DiffRow>;

    fn compute(&self, ctx: &PairContext<'_>) -> Self::ChangeSet {
        self.diff_frames(ctx.sentence, ctx.pair.left, ctx.pair.right)
    }

    fn name(&self) -> &str {
        "AttributeDiffer"
    }
}
