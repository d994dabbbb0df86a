//! WebAnno UIMA CAS XMI parser.
//!
//! Reads the flat element list of an XMI export with a `quick-xml` event
//! reader and rebuilds sentences, frames and frame links from offsets and
//! id references. Element names are matched by local name, so namespace
//! prefixes (`custom:`, `type4:`, `cas:`) do not matter.

use super::traits::{DocumentParser, ParseError};
use crate::model::{Document, Frame, FrameId, FrameLink, Sentence};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const XMI_ID: &str = "xmi:id";
const SOFA_STRING: &str = "sofaString";
const BEGIN: &str = "begin";
const END: &str = "end";

/// Layer and feature names used to interpret an XMI export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct XmiSchema {
    /// Element holding the document text in its `sofaString` attribute
    pub sofa_element: String,
    /// Sentence span layer
    pub sentence_element: String,
    /// Token span layer
    pub token_element: String,
    /// Span layers whose elements become frames
    pub span_layers: Vec<String>,
    /// Link layers whose elements become frame links
    pub link_layers: Vec<String>,
    /// Frame features holding whitespace-separated link element ids
    pub link_features: Vec<String>,
    /// Link feature naming the target frame id
    pub link_target_feature: String,
    /// Link feature holding the role label
    pub link_role_feature: String,
    /// Frame features excluded from attribute comparison
    pub ignored_features: Vec<String>,
}

impl Default for XmiSchema {
    fn default() -> Self {
        Self {
            sofa_element: "Sofa".to_string(),
            sentence_element: "Sentence".to_string(),
            token_element: "Token".to_string(),
            span_layers: vec!["Frame".to_string(), "FE".to_string()],
            link_layers: vec!["FELink".to_string()],
            link_features: vec!["FE".to_string()],
            link_target_feature: "target".to_string(),
            link_role_feature: "role".to_string(),
            ignored_features: vec!["sofa".to_string(), BEGIN.to_string(), END.to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RawSpan {
    begin: usize,
    end: usize,
}

#[derive(Debug)]
struct RawFrame {
    id: Option<String>,
    layer: String,
    features: Vec<(String, String)>,
}

#[derive(Debug)]
struct RawLink {
    layer: String,
    target: String,
    role: Option<String>,
}

#[derive(Debug, Default)]
struct RawDocument {
    text: Option<String>,
    sentences: Vec<RawSpan>,
    tokens: Vec<RawSpan>,
    frames: Vec<RawFrame>,
    links: HashMap<String, RawLink>,
}

/// Character-offset view of the document text.
struct SofaText<'a> {
    text: &'a str,
    /// Byte offset of every character, plus the text length
    char_starts: Vec<usize>,
}

impl<'a> SofaText<'a> {
    fn new(text: &'a str) -> Self {
        let char_starts = text
            .char_indices()
            .map(|(b, _)| b)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { text, char_starts }
    }

    fn char_len(&self) -> usize {
        self.char_starts.len() - 1
    }

    fn slice(&self, span: RawSpan) -> Option<&'a str> {
        if span.begin > span.end {
            return None;
        }
        let start = *self.char_starts.get(span.begin)?;
        let end = *self.char_starts.get(span.end)?;
        self.text.get(start..end)
    }
}

/// Parser for WebAnno XMI exports.
#[derive(Debug, Clone, Default)]
pub struct XmiParser {
    schema: XmiSchema,
}

impl XmiParser {
    /// Create a parser with the default WebAnno frame schema
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser for a custom layer schema
    #[must_use]
    pub const fn with_schema(schema: XmiSchema) -> Self {
        Self { schema }
    }

    #[must_use]
    pub const fn schema(&self) -> &XmiSchema {
        &self.schema
    }

    /// Collect all relevant elements in document order
    fn read_elements(&self, content: &str) -> Result<RawDocument, ParseError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut raw = RawDocument::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                    self.collect_element(e, &mut raw)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ParseError::XmlError(format!(
                        "Error parsing XMI at position {}: {e}",
                        reader.buffer_position()
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(raw)
    }

    fn collect_element(&self, e: &BytesStart<'_>, raw: &mut RawDocument) -> Result<(), ParseError> {
        let layer = local_name(e.name().as_ref());
        let schema = &self.schema;

        if layer == schema.sofa_element {
            if raw.text.is_none() {
                raw.text = attributes(e)?
                    .into_iter()
                    .find_map(|(k, v)| (k == SOFA_STRING).then_some(v));
            }
        } else if layer == schema.sentence_element {
            let attrs = attributes(e)?;
            raw.sentences.push(required_span(&layer, &attrs)?);
        } else if layer == schema.token_element {
            let attrs = attributes(e)?;
            raw.tokens.push(required_span(&layer, &attrs)?);
        } else if schema.link_layers.contains(&layer) {
            let attrs = attributes(e)?;
            let id = find(&attrs, XMI_ID);
            let target = find(&attrs, &schema.link_target_feature).unwrap_or_default();
            let role = find(&attrs, &schema.link_role_feature).filter(|r| !r.is_empty());
            match id {
                Some(id) => {
                    raw.links.insert(
                        id,
                        RawLink {
                            layer,
                            target,
                            role,
                        },
                    );
                }
                None => tracing::warn!(layer = %layer, "Skipping link element without xmi:id"),
            }
        } else if schema.span_layers.contains(&layer) {
            let features = attributes(e)?;
            raw.frames.push(RawFrame {
                id: find(&features, XMI_ID),
                layer,
                features,
            });
        }

        Ok(())
    }

    fn build_document(&self, name: &str, mut raw: RawDocument) -> Result<Document, ParseError> {
        let text = raw.text.take().ok_or(ParseError::MissingSofa)?;
        let sofa = SofaText::new(&text);

        raw.sentences.sort_by_key(|s| s.begin);
        raw.tokens.sort_by_key(|t| t.begin);
        let has_tokens = !raw.tokens.is_empty();

        let mut sentences = Vec::with_capacity(raw.sentences.len());
        for (i, span) in raw.sentences.iter().enumerate() {
            let covered = sofa
                .slice(*span)
                .ok_or_else(|| out_of_bounds(&self.schema.sentence_element, *span, &sofa))?;
            let mut sentence = Sentence::new(i + 1, covered);
            if has_tokens {
                sentence.tokens = self.sentence_tokens(&raw.tokens, *span, &sofa)?;
            }
            sentences.push(sentence);
        }

        let mut synthetic_ids = 0usize;
        for raw_frame in &raw.frames {
            let Some(frame) = self.build_frame(raw_frame, &raw.links, &sofa, &mut synthetic_ids)
            else {
                continue;
            };
            let home = raw
                .sentences
                .iter()
                .position(|s| s.begin <= frame.begin && frame.end <= s.end);
            match home {
                Some(idx) => sentences[idx].frames.push(frame),
                None => tracing::warn!(
                    id = %frame.id,
                    anchor = %frame.anchor,
                    "Skipping {} annotation outside every sentence",
                    frame.frame_type
                ),
            }
        }

        Ok(Document::new(name, sentences))
    }

    fn sentence_tokens(
        &self,
        tokens: &[RawSpan],
        sentence: RawSpan,
        sofa: &SofaText<'_>,
    ) -> Result<Vec<String>, ParseError> {
        let start = tokens.partition_point(|t| t.begin < sentence.begin);
        tokens[start..]
            .iter()
            .take_while(|t| t.begin < sentence.end)
            .filter(|t| t.end <= sentence.end)
            .map(|t| {
                sofa.slice(*t)
                    .map(str::to_string)
                    .ok_or_else(|| out_of_bounds(&self.schema.token_element, *t, sofa))
            })
            .collect()
    }

    fn build_frame(
        &self,
        raw: &RawFrame,
        links: &HashMap<String, RawLink>,
        sofa: &SofaText<'_>,
        synthetic_ids: &mut usize,
    ) -> Option<Frame> {
        let span = match optional_span(&raw.features) {
            Some(span) => span,
            None => {
                tracing::warn!(
                    id = raw.id.as_deref().unwrap_or("-"),
                    "Skipping {} annotation without valid offsets",
                    raw.layer
                );
                return None;
            }
        };
        let Some(anchor) = sofa.slice(span) else {
            tracing::warn!(
                id = raw.id.as_deref().unwrap_or("-"),
                "Skipping {} annotation with offsets {}..{} outside the text",
                raw.layer,
                span.begin,
                span.end
            );
            return None;
        };

        let id = raw.id.clone().unwrap_or_else(|| {
            *synthetic_ids += 1;
            format!("_anonymous-{synthetic_ids}")
        });

        let schema = &self.schema;
        let mut attributes = IndexMap::new();
        let mut frame_links = Vec::new();
        for (key, value) in &raw.features {
            if key == XMI_ID || schema.ignored_features.contains(key) {
                continue;
            }
            if schema.link_features.contains(key) {
                for link_id in value.split_whitespace() {
                    match links.get(link_id) {
                        Some(link) => frame_links.push(FrameLink {
                            link_type: link.layer.clone(),
                            target: FrameId::new(link.target.as_str()),
                            roles: link.role.iter().cloned().collect(),
                        }),
                        None => tracing::warn!(
                            frame = %id,
                            link = link_id,
                            "Frame references unknown link element"
                        ),
                    }
                }
                continue;
            }
            attributes.insert(key.clone(), value.clone());
        }

        let mut frame = Frame::new(id, raw.layer.as_str(), anchor).with_span(span.begin, span.end);
        frame.attributes = attributes;
        frame.links = frame_links;
        Some(frame)
    }
}

impl DocumentParser for XmiParser {
    fn parse_str(&self, name: &str, content: &str) -> Result<Document, ParseError> {
        let raw = self.read_elements(content)?;
        let doc = self.build_document(name, raw)?;
        tracing::debug!(
            document = name,
            sentences = doc.sentence_count(),
            frames = doc.frame_count(),
            links = doc.link_count(),
            "Parsed XMI document"
        );
        Ok(doc)
    }

    fn format_name(&self) -> &str {
        "WebAnno XMI"
    }
}

/// Extract local name from qualified XML name (strips namespace prefix)
fn local_name(name: &[u8]) -> String {
    let name_str = String::from_utf8_lossy(name);
    name_str
        .rfind(':')
        .map_or_else(|| name_str.to_string(), |idx| name_str[idx + 1..].to_string())
}

/// Unescaped attributes of an element, in document order
fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    e.attributes()
        .map(|attr| {
            let attr = attr.map_err(|err| ParseError::XmlError(err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            Ok((key, value))
        })
        .collect()
}

fn find(attrs: &[(String, String)], key: &str) -> Option<String> {
    attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

fn parse_offset(element: &str, value: &str) -> Result<usize, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidOffset {
        element: element.to_string(),
        value: value.to_string(),
    })
}

/// Offsets of a structural span; absent `begin` means 0 as in UIMA
fn required_span(element: &str, attrs: &[(String, String)]) -> Result<RawSpan, ParseError> {
    let begin = find(attrs, BEGIN).map_or(Ok(0), |v| parse_offset(element, &v))?;
    let end = match find(attrs, END) {
        Some(v) => parse_offset(element, &v)?,
        None => {
            return Err(ParseError::InvalidOffset {
                element: element.to_string(),
                value: String::new(),
            })
        }
    };
    Ok(RawSpan { begin, end })
}

fn optional_span(attrs: &[(String, String)]) -> Option<RawSpan> {
    let begin = find(attrs, BEGIN).map_or(Some(0), |v| v.trim().parse().ok())?;
    let end = find(attrs, END)?.trim().parse().ok()?;
    Some(RawSpan { begin, end })
}

fn out_of_bounds(element: &str, span: RawSpan, sofa: &SofaText<'_>) -> ParseError {
    ParseError::OffsetOutOfBounds {
        element: element.to_string(),
        begin: span.begin,
        end: span.end,
        len: sofa.char_len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xmi:XMI xmlns:xmi="http://www.omg.org/XMI" xmlns:cas="http:///uima/cas.ecore"
    xmlns:type4="http:///de/tudarmstadt/ukp/dkpro/core/api/segmentation/type.ecore"
    xmlns:custom="http:///webanno/custom.ecore" xmi:version="2.0">
  <cas:Sofa xmi:id="1" sofaNum="1" sofaID="_InitialView" mimeType="text" sofaString="Wie geht es dir? Über Nacht."/>
  <type4:Sentence xmi:id="2" sofa="1" begin="0" end="16"/>
  <type4:Sentence xmi:id="3" sofa="1" begin="17" end="28"/>
  <custom:Frame xmi:id="10" sofa="1" begin="4" end="11" Label="Feeling" FE="20 21" metaphorical="false"/>
  <custom:FE xmi:id="11" sofa="1" begin="12" end="15"/>
  <custom:FELink xmi:id="20" target="11" role="Experiencer"/>
  <custom:FELink xmi:id="21" target="11" role=""/>
  <custom:Frame xmi:id="12" sofa="1" begin="17" end="21" Label="&quot;Over&quot;"/>
  <cas:View sofa="1" members="2 3 10 11 12"/>
</xmi:XMI>"#;

    fn parse(content: &str) -> Document {
        XmiParser::new()
            .parse_str("sample.xmi", content)
            .expect("sample should parse")
    }

    #[test]
    fn test_parse_sentences() {
        let doc = parse(SAMPLE);
        assert_eq!(doc.source, "sample.xmi");
        assert_eq!(doc.sentence_count(), 2);
        assert_eq!(doc.sentences[0].index, 1);
        assert_eq!(doc.sentences[0].text, "Wie geht es dir?");
        assert_eq!(doc.sentences[1].tokens, vec!["Über", "Nacht."]);
    }

    #[test]
    fn test_parse_frames_and_attributes() {
        let doc = parse(SAMPLE);
        let frames = &doc.sentences[0].frames;
        assert_eq!(frames.len(), 2);

        let frame = &frames[0];
        assert_eq!(frame.frame_type, "Frame");
        assert_eq!(frame.anchor, "geht es");
        assert_eq!(frame.attribute("Label"), Some("Feeling"));
        assert_eq!(frame.attribute("metaphorical"), Some("false"));
        // Structural and link features are not attributes
        assert!(frame.attribute("begin").is_none());
        assert!(frame.attribute("FE").is_none());
        assert!(frame.attribute("xmi:id").is_none());

        assert_eq!(frames[1].frame_type, "FE");
        assert_eq!(frames[1].anchor, "dir");
    }

    #[test]
    fn test_parse_links() {
        let doc = parse(SAMPLE);
        let links = &doc.sentences[0].frames[0].links;
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].link_type, "FELink");
        assert_eq!(links[0].target, FrameId::new("11"));
        assert_eq!(links[0].roles, vec!["Experiencer"]);
        assert!(links[1].roles.is_empty());
    }

    #[test]
    fn test_character_offsets_and_unescaping() {
        let doc = parse(SAMPLE);
        let frame = &doc.sentences[1].frames[0];
        // Offsets count characters, so the umlaut does not shift the span
        assert_eq!(frame.anchor, "Über");
        assert_eq!(frame.attribute("Label"), Some("\"Over\""));
    }

    #[test]
    fn test_untokenized_export_splits_on_whitespace() {
        let doc = parse(SAMPLE);
        assert_eq!(doc.sentences[0].tokens, vec!["Wie", "geht", "es", "dir?"]);
    }

    #[test]
    fn test_token_elements_define_tokens() {
        let content = SAMPLE.replace(
            "<cas:View",
            r#"<type4:Token xmi:id="30" sofa="1" begin="0" end="3"/>
  <type4:Token xmi:id="31" sofa="1" begin="4" end="8"/>
  <type4:Token xmi:id="32" sofa="1" begin="17" end="21"/>
  <cas:View"#,
        );
        let doc = parse(&content);
        assert_eq!(doc.sentences[0].tokens, vec!["Wie", "geht"]);
        assert_eq!(doc.sentences[1].tokens, vec!["Über"]);
    }

    #[test]
    fn test_frame_without_offsets_is_skipped() {
        let content = SAMPLE.replace(
            r#"<custom:FE xmi:id="11" sofa="1" begin="12" end="15"/>"#,
            r#"<custom:FE xmi:id="11" sofa="1" begin="x" end="15"/>"#,
        );
        let doc = parse(&content);
        assert_eq!(doc.sentences[0].frames.len(), 1);
        assert!(doc.frame(&FrameId::new("11")).is_none());
    }

    #[test]
    fn test_unknown_link_id_is_skipped() {
        let content = SAMPLE.replace(r#"FE="20 21""#, r#"FE="20 99""#);
        let doc = parse(&content);
        assert_eq!(doc.sentences[0].frames[0].links.len(), 1);
    }

    #[test]
    fn test_missing_sofa() {
        let content = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/XMI"><type4:Sentence begin="0" end="3"/></xmi:XMI>"#;
        let err = XmiParser::new().parse_str("x.xmi", content).unwrap_err();
        assert!(matches!(err, ParseError::MissingSofa));
    }

    #[test]
    fn test_sentence_out_of_bounds() {
        let content = SAMPLE.replace(r#"begin="17" end="28""#, r#"begin="17" end="99""#);
        let err = XmiParser::new().parse_str("x.xmi", &content).unwrap_err();
        assert!(matches!(err, ParseError::OffsetOutOfBounds { end: 99, .. }));
    }

    #[test]
    fn test_malformed_xml() {
        let err = XmiParser::new()
            .parse_str("x.xmi", "<xmi:XMI><cas:Sofa sofaString=\"a\"></xmi:XMI>")
            .unwrap_err();
        assert!(matches!(err, ParseError::XmlError(_)));
    }

    #[test]
    fn test_custom_schema() {
        let schema = XmiSchema {
            span_layers: vec!["Frame".to_string()],
            ..XmiSchema::default()
        };
        let doc = XmiParser::with_schema(schema)
            .parse_str("sample.xmi", SAMPLE)
            .expect("sample should parse");
        assert_eq!(doc.frame_count(), 2);
        assert!(doc
            .sentences
            .iter()
            .flat_map(|s| &s.frames)
            .all(|f| f.frame_type == "Frame"));
    }
}
