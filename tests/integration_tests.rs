//! Integration tests for anno-diff
//!
//! These tests verify end-to-end functionality of XMI parsing, the diff
//! engine and report generation on in-memory exports.

use anno_diff::{
    diff::{DiffEngine, DiffValue, RowKind},
    parsers::parse_document_str,
    reports::{create_reporter, create_reporter_with_options, ReportConfig, ReportFormat},
};

const TEXT: &str = "Peter sagt Anna und Anna nickt .";

/// Wrap frame and link elements in an export of [`TEXT`] (one sentence).
fn export(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<xmi:XMI xmlns:xmi="http://www.omg.org/XMI" xmlns:cas="http:///uima/cas.ecore"
    xmlns:type4="http:///de/tudarmstadt/ukp/dkpro/core/api/segmentation/type.ecore"
    xmlns:custom="http:///webanno/custom.ecore" xmi:version="2.0">
  <cas:Sofa xmi:id="1" sofaNum="1" sofaID="_InitialView" mimeType="text" sofaString="{TEXT}"/>
  <type4:Sentence xmi:id="2" sofa="1" begin="0" end="32"/>
{body}
</xmi:XMI>"#
    )
}

// Character offsets in TEXT
const PETER: (usize, usize) = (0, 5);
const SAGT: (usize, usize) = (6, 10);
const ANNA_1: (usize, usize) = (11, 15);
const ANNA_2: (usize, usize) = (20, 24);
const NICKT: (usize, usize) = (25, 30);

fn span(layer: &str, id: &str, (begin, end): (usize, usize), extra: &str) -> String {
    format!(r#"  <custom:{layer} xmi:id="{id}" sofa="1" begin="{begin}" end="{end}" {extra}/>"#)
}

fn link(id: &str, target: &str, role: &str) -> String {
    format!(r#"  <custom:FELink xmi:id="{id}" target="{target}" role="{role}"/>"#)
}

// ============================================================================
// Parser Tests
// ============================================================================

mod parser_tests {
    use super::*;

    #[test]
    fn test_frames_and_links() {
        let xmi = export(&[
            span("Frame", "10", SAGT, r#"Label="Statement" FE="20 21""#),
            span("FE", "11", PETER, ""),
            span("FE", "12", ANNA_1, ""),
            link("20", "11", "Speaker"),
            link("21", "12", "Addressee"),
        ]
        .join("\n"));
        let doc = parse_document_str("a.xmi", &xmi).expect("valid export");

        assert_eq!(doc.sentence_count(), 1);
        assert_eq!(doc.frame_count(), 3);
        let sentence = &doc.sentences[0];
        let frame = sentence
            .frames
            .iter()
            .find(|f| f.frame_type == "Frame")
            .expect("frame present");
        assert_eq!(frame.anchor, "sagt");
        assert_eq!(frame.attribute("Label"), Some("Statement"));
        assert_eq!(frame.links.len(), 2);
        assert_eq!(frame.links[0].roles, vec!["Speaker"]);
    }

    #[test]
    fn test_tokens_fall_back_to_whitespace() {
        let doc = parse_document_str("a.xmi", &export("")).expect("valid export");
        assert_eq!(doc.sentences[0].tokens.len(), 7);
    }

    #[test]
    fn test_missing_sofa_is_an_error() {
        let xmi = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/XMI"><type4:Sentence begin="0" end="3"/></xmi:XMI>"#;
        assert!(parse_document_str("a.xmi", xmi).is_err());
    }
}

// ============================================================================
// Diff Engine Tests
// ============================================================================

mod diff_tests {
    use super::*;

    fn diff(left: &str, right: &str) -> anno_diff::DiffResult {
        let left = parse_document_str("a.xmi", &export(left)).expect("left parses");
        let right = parse_document_str("b.xmi", &export(right)).expect("right parses");
        DiffEngine::new().diff(&left, &right).expect("aligned")
    }

    #[test]
    fn test_duplicate_anchors_pair_by_position() {
        // Both files link to the first "Anna"; only file 1 annotates the second one.
        let left = [
            span("Frame", "10", SAGT, r#"FE="20""#),
            span("FE", "11", ANNA_1, ""),
            span("FE", "12", ANNA_2, ""),
            link("20", "11", "Addressee"),
        ]
        .join("\n");
        let right = [
            span("Frame", "10", SAGT, r#"FE="20 21""#),
            span("FE", "11", ANNA_1, ""),
            span("FE", "12", NICKT, ""),
            link("20", "11", "Addressee"),
            link("21", "12", "Addressee"),
        ]
        .join("\n");

        let result = diff(&left, &right);
        let candidates: Vec<_> = result
            .rows
            .iter()
            .filter(|r| r.kind == RowKind::LinkCandidates)
            .collect();
        assert!(candidates.is_empty(), "unique target match: {candidates:?}");
        assert!(!result
            .rows
            .iter()
            .any(|r| r.kind == RowKind::LinkRoles && r.triple() == (1, "sagt", "FELink.role")));

        // "Anna" (2nd) only exists in file 1, "nickt" only in file 2
        let residual: Vec<_> = result
            .rows
            .iter()
            .filter(|r| r.kind == RowKind::Residual)
            .map(|r| r.frame.as_str())
            .collect();
        assert_eq!(residual, vec!["Anna", "nickt"]);
    }

    #[test]
    fn test_unmatched_target_reports_all_candidates() {
        let left = [
            span("Frame", "10", SAGT, r#"FE="20""#),
            span("FE", "11", PETER, ""),
            link("20", "11", "Speaker"),
        ]
        .join("\n");
        let right = [
            span("Frame", "10", SAGT, r#"FE="20 21""#),
            span("FE", "11", ANNA_1, ""),
            span("FE", "12", NICKT, ""),
            link("20", "11", "Addressee"),
            link("21", "12", "Addressee"),
        ]
        .join("\n");

        let result = diff(&left, &right);
        let row = result
            .rows
            .iter()
            .find(|r| r.kind == RowKind::LinkCandidates && r.left == DiffValue::text("Peter (Speaker)"))
            .expect("candidate row for file 1 link");
        assert_eq!(
            row.right,
            DiffValue::Candidates(vec![
                "Anna (Addressee)".to_string(),
                "nickt (Addressee)".to_string()
            ])
        );
        assert_eq!(row.right.render("(absent)"), "[Anna (Addressee) | nickt (Addressee)]");
    }

    #[test]
    fn test_repeated_edges_pair_positionally() {
        let left = [
            span("Frame", "10", SAGT, r#"FE="20 21""#),
            span("FE", "11", PETER, ""),
            link("20", "11", "Speaker"),
            link("21", "11", "Agent"),
        ]
        .join("\n");
        let right = [
            span("Frame", "10", SAGT, r#"FE="20 21""#),
            span("FE", "11", PETER, ""),
            link("20", "11", "Speaker"),
            link("21", "11", "Agent"),
        ]
        .join("\n");
        assert!(diff(&left, &right).rows.is_empty());
    }

    #[test]
    fn test_swapping_inputs_mirrors_rows() {
        let left = [
            span("Frame", "10", SAGT, r#"Label="Statement""#),
            span("FE", "11", PETER, ""),
        ]
        .join("\n");
        let right = span("Frame", "10", SAGT, r#"Label="Communication""#);

        let forward = diff(&left, &right);
        let backward = diff(&right, &left);
        assert_eq!(forward.rows.len(), 2);
        let mirrored: Vec<_> = backward.rows.iter().map(|r| r.mirrored()).collect();
        assert_eq!(forward.rows, mirrored);
    }
}

// ============================================================================
// Report Tests
// ============================================================================

mod report_tests {
    use super::*;

    fn label_diff() -> anno_diff::DiffResult {
        let left = parse_document_str("a.xmi", &export(&span("Frame", "10", SAGT, r#"Label="Statement, direct""#)))
            .expect("left parses");
        let right = parse_document_str("b.xmi", &export(&span("Frame", "10", SAGT, r#"Label="Communication""#)))
            .expect("right parses");
        DiffEngine::new().diff(&left, &right).expect("aligned")
    }

    #[test]
    fn test_csv_quotes_delimiters() {
        let csv = create_reporter(ReportFormat::Csv)
            .generate(&label_diff(), &ReportConfig::default())
            .expect("csv");
        assert_eq!(
            csv.lines().nth(1),
            Some(r#"1,sagt,Label,"Statement, direct",Communication"#)
        );
    }

    #[test]
    fn test_json_report_is_valid() {
        let json = create_reporter(ReportFormat::Json)
            .generate(&label_diff(), &ReportConfig::default())
            .expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["metadata"]["tool"]["name"], "anno-diff");
        assert_eq!(value["rows"][0]["left"]["value"], "Statement, direct");
        assert_eq!(value["summary"]["total_rows"], 1);
    }

    #[test]
    fn test_summary_report_without_color() {
        let text = create_reporter_with_options(ReportFormat::Summary, false)
            .generate(&label_diff(), &ReportConfig::default())
            .expect("summary");
        assert!(!text.contains('\x1b'));
        assert!(text.contains("1 attribute rows"));
        assert!(text.contains("Communication"));
    }
}
