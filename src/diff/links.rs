//! Link comparison for matched frame pairs.
//!
//! A link is identified by its type and by the frame it points at. Target ids
//! are local to each document, so a link of file 1 is related to a link of
//! file 2 through the frame matching: the file 1 target is looked up in the
//! [`MatchIndex`] and the counterpart frame's links are searched for one that
//! points at the matched target.
//!
//! Resolution runs once from each side so links that exist only in file 2
//! are reported too. Rows found by both passes are reported once.

use super::frames::MatchIndex;
use super::result::ROLE_KEY_SUFFIX;
use super::traits::{ChangeComputer, LinkChangeSet, PairContext};
use super::{DiffRow, DiffValue, RowKind};
use crate::error::{DanglingLinkError, Side};
use crate::model::{Document, Frame, FrameLink};
use std::collections::BTreeSet;

/// How a link relates to the same-type links of the counterpart frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome<'a> {
    /// A single counterpart link; any difference is a plain value difference
    UniqueMatch(&'a FrameLink),
    /// No unique correspondence; every plausible counterpart link
    Candidates(Vec<&'a FrameLink>),
}

/// Frames and documents seen from the side whose links are being resolved.
struct Perspective<'a> {
    side: Side,
    sentence: usize,
    source: &'a Frame,
    other: &'a Frame,
    source_doc: &'a Document,
    other_doc: &'a Document,
    matches: &'a MatchIndex<'a>,
}

/// Compares the outgoing links of matched frame pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkResolver;

impl LinkResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decide which counterpart link corresponds to `link`.
    ///
    /// `candidates` are the counterpart frame's resolvable links of the same
    /// type. `ordinal` and `duplicates` place `link` among the source links
    /// sharing its type and target, so repeated edges pair up positionally.
    #[must_use]
    pub fn classify<'b>(
        counterpart_target: Option<&Frame>,
        candidates: &[&'b FrameLink],
        ordinal: usize,
        duplicates: usize,
    ) -> LinkOutcome<'b> {
        if let Some(target) = counterpart_target {
            let targeted: Vec<&'b FrameLink> = candidates
                .iter()
                .copied()
                .filter(|c| c.target == target.id)
                .collect();
            if targeted.len() == 1 {
                return LinkOutcome::UniqueMatch(targeted[0]);
            }
            if targeted.len() > 1 && targeted.len() == duplicates {
                if let Some(positional) = targeted.get(ordinal) {
                    return LinkOutcome::UniqueMatch(*positional);
                }
            }
        }

        match candidates {
            [only] => LinkOutcome::UniqueMatch(*only),
            _ => LinkOutcome::Candidates(candidates.to_vec()),
        }
    }

    fn resolve_side(&self, view: &Perspective<'_>, out: &mut LinkChangeSet) {
        let source = view.source;
        for (i, link) in source.links.iter().enumerate() {
            if view.source_doc.frame(&link.target).is_none() {
                tracing::debug!(
                    document = %view.source_doc.source,
                    sentence = view.sentence,
                    target = %link.target,
                    "Skipping dangling link"
                );
                out.warnings.push(DanglingLinkError {
                    side: view.side,
                    document: view.source_doc.source.clone(),
                    sentence: view.sentence,
                    frame: source.anchor.clone(),
                    link_type: link.link_type.clone(),
                    target: link.target.to_string(),
                });
                continue;
            }

            let counterpart_target = view.matches.counterpart(view.side, &link.target);
            let candidates: Vec<&FrameLink> = view
                .other
                .links_of_type(&link.link_type)
                .filter(|c| view.other_doc.frame(&c.target).is_some())
                .collect();
            let same_edge = |l: &&FrameLink| l.link_type == link.link_type && l.target == link.target;
            let ordinal = source.links[..i].iter().filter(same_edge).count();
            let duplicates = source.links.iter().filter(same_edge).count();

            let outcome = Self::classify(counterpart_target, &candidates, ordinal, duplicates);
            if let Some(row) = Self::outcome_row(view, link, counterpart_target, &outcome) {
                match view.side {
                    Side::Left => out.push_row(row),
                    Side::Right => out.push_row(row.mirrored()),
                }
            }
        }
    }

    /// Row for an outcome, oriented with the source side as file 1.
    fn outcome_row(
        view: &Perspective<'_>,
        link: &FrameLink,
        counterpart_target: Option<&Frame>,
        outcome: &LinkOutcome<'_>,
    ) -> Option<DiffRow> {
        let row = |key: String, left: DiffValue, right: DiffValue, kind: RowKind| {
            DiffRow::new(view.sentence, view.source.anchor.clone(), key, left, right, kind)
        };

        match outcome {
            LinkOutcome::UniqueMatch(matched) => {
                let same_target = counterpart_target.is_some_and(|t| matched.target == t.id);
                if !same_target {
                    Some(row(
                        link.link_type.clone(),
                        DiffValue::Text(describe(link, view.source_doc)),
                        DiffValue::Text(describe(matched, view.other_doc)),
                        RowKind::LinkTarget,
                    ))
                } else if role_set(link) != role_set(matched) {
                    Some(row(
                        format!("{}{ROLE_KEY_SUFFIX}", link.link_type),
                        DiffValue::Text(link.roles.join(", ")),
                        DiffValue::Text(matched.roles.join(", ")),
                        RowKind::LinkRoles,
                    ))
                } else {
                    None
                }
            }
            LinkOutcome::Candidates(candidates) => Some(row(
                link.link_type.clone(),
                DiffValue::Text(describe(link, view.source_doc)),
                DiffValue::Candidates(
                    candidates
                        .iter()
                        .map(|c| describe(c, view.other_doc))
                        .collect(),
                ),
                RowKind::LinkCandidates,
            )),
        }
    }
}

impl ChangeComputer for LinkResolver {
    type ChangeSet = LinkChangeSet;

    fn compute(&self, ctx: &PairContext<'_>) -> Self::ChangeSet {
        let mut out = LinkChangeSet::default();
        for side in [Side::Left, Side::Right] {
            let (source_doc, other_doc) = match side {
                Side::Left => (ctx.left_doc, ctx.right_doc),
                Side::Right => (ctx.right_doc, ctx.left_doc),
            };
            let view = Perspective {
                side,
                sentence: ctx.sentence,
                source: ctx.pair.frame(side),
                other: ctx.pair.frame(side.flipped()),
                source_doc,
                other_doc,
                matches: ctx.matches,
            };
            self.resolve_side(&view, &mut out);
        }
        out
    }

    fn name(&self) -> &str {
        "LinkResolver"
    }
}

fn role_set(link: &FrameLink) -> BTreeSet<&str> {
    link.roles.iter().map(String::as_str).collect()
}

/// Human-readable form of a link: target anchor plus its roles.
fn describe(link: &FrameLink, doc: &Document) -> String {
    let anchor = doc
        .frame(&link.target)
        .map_or_else(|| format!("#{}", link.target), |f| f.anchor.clone());
    if link.roles.is_empty() {
        anchor
    } else {
        format!("{anchor} ({})", link.roles.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::frames::align_frames;
    use crate::diff::sentences::align_sentences;
    use crate::model::Sentence;

    const TEXT: &str = "Peter sagt Maria und Anna etwas";

    fn resolve(a: &Document, b: &Document) -> LinkChangeSet {
        let pairs = align_sentences(a, b).expect("aligned");
        let alignments: Vec<_> = pairs.iter().map(align_frames).collect();
        let index = MatchIndex::build(&alignments);

        let mut out = LinkChangeSet::default();
        for alignment in &alignments {
            for pair in &alignment.pairs {
                let ctx = PairContext {
                    sentence: alignment.index,
                    pair: *pair,
                    left_doc: a,
                    right_doc: b,
                    matches: &index,
                };
                let set = LinkResolver::new().compute(&ctx);
                out.rows.extend(set.rows);
                out.warnings.extend(set.warnings);
            }
        }
        out
    }

    /// One sentence with a "sagt" frame and three participant frames.
    fn doc(name: &str, links: Vec<FrameLink>) -> Document {
        let mut frame = Frame::new("f", "Frame", "sagt");
        frame.links = links;
        let sentence = Sentence::new(1, TEXT)
            .with_frame(frame)
            .with_frame(Frame::new(format!("{name}-peter"), "FE", "Peter"))
            .with_frame(Frame::new(format!("{name}-maria"), "FE", "Maria"))
            .with_frame(Frame::new(format!("{name}-anna"), "FE", "Anna"));
        Document::new(format!("{name}.xmi"), vec![sentence])
    }

    fn to(name: &str, who: &str, role: &str) -> FrameLink {
        FrameLink::new("FELink", format!("{name}-{who}")).with_role(role)
    }

    #[test]
    fn test_identical_links_produce_nothing() {
        let a = doc("a", vec![to("a", "peter", "Speaker"), to("a", "maria", "Addressee")]);
        let b = doc("b", vec![to("b", "peter", "Speaker"), to("b", "maria", "Addressee")]);
        assert!(resolve(&a, &b).is_empty());
    }

    #[test]
    fn test_role_mismatch_reported_once() {
        let a = doc("a", vec![to("a", "peter", "Speaker")]);
        let b = doc("b", vec![to("b", "peter", "Addressee")]);

        let set = resolve(&a, &b);
        assert_eq!(
            set.rows,
            vec![DiffRow::new(
                1,
                "sagt",
                "FELink.role",
                DiffValue::text("Speaker"),
                DiffValue::text("Addressee"),
                RowKind::LinkRoles,
            )]
        );
    }

    #[test]
    fn test_single_candidate_is_unique_match() {
        let a = doc("a", vec![to("a", "peter", "Speaker")]);
        let b = doc("b", vec![to("b", "maria", "Speaker")]);

        let set = resolve(&a, &b);
        assert_eq!(set.rows.len(), 1);
        let row = &set.rows[0];
        assert_eq!(row.kind, RowKind::LinkTarget);
        assert_eq!(row.key, "FELink");
        assert_eq!(row.left, DiffValue::text("Peter (Speaker)"));
        assert_eq!(row.right, DiffValue::text("Maria (Speaker)"));
    }

    #[test]
    fn test_ambiguous_links_list_candidates() {
        let a = doc("a", vec![to("a", "peter", "Speaker"), to("a", "maria", "Addressee")]);
        let b = doc("b", vec![to("b", "peter", "Speaker"), to("b", "anna", "Addressee")]);

        let set = resolve(&a, &b);
        assert_eq!(set.rows.len(), 2);
        assert!(set.rows.iter().all(|r| r.kind == RowKind::LinkCandidates));
        assert_eq!(set.rows[0].left, DiffValue::text("Maria (Addressee)"));
        assert_eq!(
            set.rows[0].right,
            DiffValue::Candidates(vec!["Peter (Speaker)".into(), "Anna (Addressee)".into()])
        );
        assert_eq!(
            set.rows[1].left,
            DiffValue::Candidates(vec!["Peter (Speaker)".into(), "Maria (Addressee)".into()])
        );
        assert_eq!(set.rows[1].right, DiffValue::text("Anna (Addressee)"));
    }

    #[test]
    fn test_link_only_in_second_file() {
        let a = doc("a", vec![]);
        let b = doc("b", vec![to("b", "anna", "Addressee")]);

        let set = resolve(&a, &b);
        assert_eq!(set.rows.len(), 1);
        assert_eq!(set.rows[0].left, DiffValue::Candidates(Vec::new()));
        assert_eq!(set.rows[0].right, DiffValue::text("Anna (Addressee)"));
    }

    #[test]
    fn test_dangling_link_warns_and_is_skipped() {
        let a = doc("a", vec![FrameLink::new("FELink", "999").with_role("Speaker")]);
        let b = doc("b", vec![]);

        let set = resolve(&a, &b);
        assert!(set.rows.is_empty());
        assert_eq!(set.warnings.len(), 1);
        let warning = &set.warnings[0];
        assert_eq!(warning.side, Side::Left);
        assert_eq!(warning.document, "a.xmi");
        assert_eq!(warning.sentence, 1);
        assert_eq!(warning.frame, "sagt");
        assert_eq!(warning.target, "999");
    }

    #[test]
    fn test_dangling_link_is_not_a_candidate() {
        let a = doc("a", vec![FrameLink::new("FELink", "999")]);
        let b = doc("b", vec![to("b", "peter", "Speaker")]);

        let set = resolve(&a, &b);
        assert_eq!(set.warnings.len(), 1);
        assert_eq!(set.rows.len(), 1);
        assert_eq!(set.rows[0].left, DiffValue::Candidates(Vec::new()));
    }

    #[test]
    fn test_repeated_edges_pair_positionally() {
        let a = doc("a", vec![to("a", "peter", "Speaker"), to("a", "peter", "Addressee")]);
        let b = doc("b", vec![to("b", "peter", "Speaker"), to("b", "peter", "Topic")]);

        let set = resolve(&a, &b);
        assert_eq!(set.rows.len(), 1);
        assert_eq!(set.rows[0].kind, RowKind::LinkRoles);
        assert_eq!(set.rows[0].left, DiffValue::text("Addressee"));
        assert_eq!(set.rows[0].right, DiffValue::text("Topic"));
    }

    #[test]
    fn test_swapped_inputs_mirror_rows() {
        let a = doc("a", vec![to("a", "peter", "Speaker"), to("a", "maria", "Addressee")]);
        let b = doc("b", vec![to("b", "anna", "Speaker")]);

        let mut forward: Vec<_> = resolve(&a, &b).rows;
        let mut backward: Vec<_> = resolve(&b, &a).rows.iter().map(DiffRow::mirrored).collect();
        let key = |r: &DiffRow| format!("{r:?}");
        forward.sort_by_key(key);
        backward.sort_by_key(key);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_classify_without_candidates() {
        let outcome = LinkResolver::classify(None, &[], 0, 1);
        assert_eq!(outcome, LinkOutcome::Candidates(Vec::new()));
    }
}
