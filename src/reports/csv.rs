//! CSV report generator.
//!
//! Writes the discrepancy log: a header row followed by one line per
//! [`DiffRow`](crate::diff::DiffRow) in report order.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::DiffResult;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn header(result: &DiffResult, config: &ReportConfig) -> [String; 5] {
        let (left, right) = if config.header_file_names {
            (result.left_name.clone(), result.right_name.clone())
        } else {
            ("Value File 1".to_string(), "Value File 2".to_string())
        };
        [
            "Sentence".to_string(),
            "Frame".to_string(),
            "Key".to_string(),
            left,
            right,
        ]
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate(&self, result: &DiffResult, config: &ReportConfig) -> Result<String, ReportError> {
        if matches!(config.delimiter, '"' | '\n' | '\r') {
            return Err(ReportError::ConfigError(format!(
                "{:?} cannot be used as a field delimiter",
                config.delimiter
            )));
        }

        let mut content = String::new();
        push_record(&mut content, &Self::header(result, config), config.delimiter);

        for row in &result.rows {
            let record = [
                row.sentence.to_string(),
                row.frame.clone(),
                row.key.clone(),
                row.left.render(&config.absent_marker),
                row.right.render(&config.absent_marker),
            ];
            push_record(&mut content, &record, config.delimiter);
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn push_record(content: &mut String, fields: &[String], delimiter: char) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            content.push(delimiter);
        }
        content.push_str(&escape_field(field, delimiter));
    }
    content.push('\n');
}

/// Quote a field when it contains the delimiter, a quote or a line break.
#[must_use]
pub fn escape_field(s: &str, delimiter: char) -> String {
    if s.contains(|c| c == delimiter || c == '"' || c == '\n' || c == '\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffRow, DiffValue, RowKind};

    fn result() -> DiffResult {
        let mut result = DiffResult::new("annotator-1.xmi", "annotator-2.xmi");
        result.rows = vec![
            DiffRow::new(
                2,
                "geht es",
                "Label",
                DiffValue::text("Communication"),
                DiffValue::text("Feeling"),
                RowKind::Attribute,
            ),
            DiffRow::new(5, "morgen", "frame", DiffValue::text("Frame"), DiffValue::Absent, RowKind::Residual),
            DiffRow::new(
                5,
                "sagt",
                "FELink",
                DiffValue::text("Peter (Speaker)"),
                DiffValue::Candidates(vec!["Maria, Anna".into(), "du".into()]),
                RowKind::LinkCandidates,
            ),
        ];
        result
    }

    #[test]
    fn test_header_and_rows() {
        let csv = CsvReporter::new()
            .generate(&result(), &ReportConfig::default())
            .expect("csv");
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Sentence,Frame,Key,Value File 1,Value File 2");
        assert_eq!(lines[1], "2,geht es,Label,Communication,Feeling");
        assert_eq!(lines[2], "5,morgen,frame,Frame,(absent)");
        assert_eq!(lines[3], "5,sagt,FELink,Peter (Speaker),\"[Maria, Anna | du]\"");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_file_name_header_and_delimiter() {
        let config = ReportConfig::default()
            .with_delimiter(';')
            .with_file_name_header(true)
            .with_absent_marker("-");
        let csv = CsvReporter::new().generate(&result(), &config).expect("csv");
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Sentence;Frame;Key;annotator-1.xmi;annotator-2.xmi");
        assert_eq!(lines[2], "5;morgen;frame;Frame;-");
        assert_eq!(lines[3], "5;sagt;FELink;Peter (Speaker);[Maria, Anna | du]");
    }

    #[test]
    fn test_empty_result_has_header_only() {
        let csv = CsvReporter::new()
            .generate(&DiffResult::new("a", "b"), &ReportConfig::default())
            .expect("csv");
        assert_eq!(csv, "Sentence,Frame,Key,Value File 1,Value File 2\n");
    }

    #[test]
    fn test_rejects_quote_delimiter() {
        let config = ReportConfig::default().with_delimiter('"');
        assert!(CsvReporter::new().generate(&result(), &config).is_err());
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain", ','), "plain");
        assert_eq!(escape_field("a,b", ','), "\"a,b\"");
        assert_eq!(escape_field("a,b", ';'), "a,b");
        assert_eq!(escape_field("\"Over\"", ','), "\"\"\"Over\"\"\"");
        assert_eq!(escape_field("two\nlines", ','), "\"two\nlines\"");
    }
}
