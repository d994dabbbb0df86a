#![no_main]
use anno_diff::parsers::{DocumentParser, XmiParser};
use libfuzzer_sys::fuzz_target;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the XMI parser.
///
/// Feeds raw input, then wraps it in an export envelope with a sofa and one
/// sentence so offsets, frames and links get exercised too.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parser = XmiParser::new();

        let _ = parser.parse_str("fuzz.xmi", s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<xmi:XMI xmlns:xmi="http://www.omg.org/XMI" xmlns:cas="http:///uima/cas.ecore"
    xmlns:type4="http:///de/tudarmstadt/ukp/dkpro/core/api/segmentation/type.ecore"
    xmlns:custom="http:///webanno/custom.ecore" xmi:version="2.0">
  <cas:Sofa xmi:id="1" sofaString="Wie geht es dir? Über Nacht."/>
  <type4:Sentence xmi:id="2" begin="0" end="16"/>
  <type4:Sentence xmi:id="3" begin="17" end="28"/>
  {s}
</xmi:XMI>"#,
            );
            if let Ok(doc) = parser.parse_str("fuzz.xmi", &wrapped) {
                let _ = anno_diff::DiffEngine::new().diff(&doc, &doc);
            }
        }
    }
});
