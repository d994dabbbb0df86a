//! Merging of per-sentence results into the final report.

use super::{DiffResult, SentenceReport};

/// Concatenates sentence blocks into one [`DiffResult`].
///
/// Blocks may arrive in any order. The output is ordered by sentence index,
/// and rows within a block keep the order they were produced in.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    left_name: String,
    right_name: String,
}

impl ReportAssembler {
    pub fn new(left_name: impl Into<String>, right_name: impl Into<String>) -> Self {
        Self {
            left_name: left_name.into(),
            right_name: right_name.into(),
        }
    }

    /// Assemble the final result from the blocks of a whole run
    #[must_use]
    pub fn assemble(&self, mut blocks: Vec<SentenceReport>) -> DiffResult {
        blocks.sort_by_key(|b| b.index);

        let mut result = DiffResult::new(self.left_name.clone(), self.right_name.clone());
        result.summary.sentences = blocks.len();
        for block in blocks {
            result.summary.frames_matched += block.frames_matched;
            result.summary.frames_only_left += block.frames_only_left;
            result.summary.frames_only_right += block.frames_only_right;
            result.rows.extend(block.rows);
            result.warnings.extend(block.warnings);
        }
        result.calculate_summary();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffRow, DiffValue, RowKind};

    fn block(index: usize, keys: &[&str]) -> SentenceReport {
        SentenceReport {
            index,
            rows: keys
                .iter()
                .map(|k| {
                    DiffRow::new(index, "x", *k, DiffValue::text("a"), DiffValue::text("b"), RowKind::Attribute)
                })
                .collect(),
            frames_matched: 1,
            ..SentenceReport::default()
        }
    }

    #[test]
    fn test_orders_blocks_by_sentence() {
        let assembler = ReportAssembler::new("a.xmi", "b.xmi");
        let result = assembler.assemble(vec![block(3, &["c"]), block(1, &["a1", "a2"]), block(2, &[])]);

        let order: Vec<_> = result.rows.iter().map(|r| (r.sentence, r.key.as_str())).collect();
        assert_eq!(order, vec![(1, "a1"), (1, "a2"), (3, "c")]);
        assert_eq!(result.summary.sentences, 3);
        assert_eq!(result.summary.frames_matched, 3);
        assert_eq!(result.summary.total_rows, 3);
        assert_eq!(result.left_name, "a.xmi");
    }

    #[test]
    fn test_empty_run() {
        let result = ReportAssembler::new("a", "b").assemble(Vec::new());
        assert!(!result.has_changes());
        assert_eq!(result.summary.sentences, 0);
    }
}
