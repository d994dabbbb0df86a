//! Core document, sentence and frame data structures.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use xxhash_rust::xxh3::xxh3_64;

// Section tags of the content hash encoding
const TAG_SENTENCES: u8 = 1;
const TAG_INDEX: u8 = 2;
const TAG_TOKENS: u8 = 3;
const TAG_FRAMES: u8 = 4;
const TAG_ATTRIBUTES: u8 = 5;
const TAG_LINKS: u8 = 6;
const TAG_ROLES: u8 = 7;

/// Local identifier of a frame, unique within its document only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FrameId(String);

impl FrameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FrameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for FrameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A directed, typed link from one frame to another frame of the same document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameLink {
    /// Link-type label (the link layer name, e.g. `FELink`)
    pub link_type: String,
    /// Target frame, resolved only within the owning document
    pub target: FrameId,
    /// Role labels carried by the link, in document order
    pub roles: Vec<String>,
}

impl FrameLink {
    pub fn new(link_type: impl Into<String>, target: impl Into<FrameId>) -> Self {
        Self {
            link_type: link_type.into(),
            target: target.into(),
            roles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }
}

/// An annotated predicate instance anchored to a token span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub id: FrameId,
    /// Frame-type label (the span layer name, e.g. `Frame` or `FE`)
    pub frame_type: String,
    /// Surface text the frame is evoked by
    pub anchor: String,
    /// Start offset in the document text, in characters
    pub begin: usize,
    /// End offset in the document text, in characters
    pub end: usize,
    /// Attribute values keyed by feature name, in document order
    pub attributes: IndexMap<String, String>,
    /// Outgoing links, in document order
    pub links: Vec<FrameLink>,
}

impl Frame {
    pub fn new(
        id: impl Into<FrameId>,
        frame_type: impl Into<String>,
        anchor: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            frame_type: frame_type.into(),
            anchor: anchor.into(),
            begin: 0,
            end: 0,
            attributes: IndexMap::new(),
            links: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_span(mut self, begin: usize, end: usize) -> Self {
        self.begin = begin;
        self.end = end;
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: FrameLink) -> Self {
        self.links.push(link);
        self
    }

    /// Get an attribute value by key
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Outgoing links of the given type, in document order
    pub fn links_of_type<'a>(&'a self, link_type: &'a str) -> impl Iterator<Item = &'a FrameLink> {
        self.links.iter().filter(move |l| l.link_type == link_type)
    }
}

/// One sentence of the annotated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    /// 1-based ordinal, shared across both compared documents
    pub index: usize,
    pub text: String,
    pub tokens: Vec<String>,
    pub frames: Vec<Frame>,
}

impl Sentence {
    /// Create a sentence whose tokens are the whitespace-separated words of `text`.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = text.split_whitespace().map(str::to_string).collect();
        Self {
            index,
            text,
            tokens,
            frames: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tokens(mut self, tokens: Vec<String>) -> Self {
        self.tokens = tokens;
        self
    }

    #[must_use]
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }
}

/// Position of a frame inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameLocation {
    sentence: usize,
    frame: usize,
}

/// In-memory model of one annotation export.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source file name, the document identity
    pub source: String,
    pub sentences: Vec<Sentence>,
    /// Content hash for quick equality checks
    pub content_hash: u64,
    frame_index: HashMap<FrameId, FrameLocation>,
}

impl Document {
    /// Create a document, index its frames and compute its content hash.
    pub fn new(source: impl Into<String>, sentences: Vec<Sentence>) -> Self {
        let mut frame_index = HashMap::new();
        for (s, sentence) in sentences.iter().enumerate() {
            for (f, frame) in sentence.frames.iter().enumerate() {
                if frame_index.contains_key(&frame.id) {
                    tracing::warn!(id = %frame.id, "Duplicate frame id, keeping first occurrence");
                    continue;
                }
                frame_index.insert(frame.id.clone(), FrameLocation { sentence: s, frame: f });
            }
        }

        let mut doc = Self {
            source: source.into(),
            sentences,
            content_hash: 0,
            frame_index,
        };
        doc.calculate_content_hash();
        doc
    }

    /// Look up a frame by its local id
    #[must_use]
    pub fn frame(&self, id: &FrameId) -> Option<&Frame> {
        let loc = self.frame_index.get(id)?;
        self.sentences.get(loc.sentence)?.frames.get(loc.frame)
    }

    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.sentences.iter().map(|s| s.frames.len()).sum()
    }

    #[must_use]
    pub fn link_count(&self) -> usize {
        self.sentences
            .iter()
            .flat_map(|s| &s.frames)
            .map(|f| f.links.len())
            .sum()
    }

    /// Calculate and update the content hash.
    ///
    /// The source name is not part of the hash. Every field is length
    /// prefixed and every collection is tagged with its item count, so
    /// different structures never share an encoding.
    pub fn calculate_content_hash(&mut self) {
        let mut hasher_input = Vec::new();

        push_count(&mut hasher_input, TAG_SENTENCES, self.sentences.len());
        for sentence in &self.sentences {
            push_count(&mut hasher_input, TAG_INDEX, sentence.index);
            push_count(&mut hasher_input, TAG_TOKENS, sentence.tokens.len());
            for token in &sentence.tokens {
                push_field(&mut hasher_input, token);
            }
            push_count(&mut hasher_input, TAG_FRAMES, sentence.frames.len());
            for frame in &sentence.frames {
                push_field(&mut hasher_input, frame.id.as_str());
                push_field(&mut hasher_input, &frame.frame_type);
                push_field(&mut hasher_input, &frame.anchor);
                push_count(&mut hasher_input, TAG_ATTRIBUTES, frame.attributes.len());
                for (key, value) in &frame.attributes {
                    push_field(&mut hasher_input, key);
                    push_field(&mut hasher_input, value);
                }
                push_count(&mut hasher_input, TAG_LINKS, frame.links.len());
                for link in &frame.links {
                    push_field(&mut hasher_input, &link.link_type);
                    push_field(&mut hasher_input, link.target.as_str());
                    push_count(&mut hasher_input, TAG_ROLES, link.roles.len());
                    for role in &link.roles {
                        push_field(&mut hasher_input, role);
                    }
                }
            }
        }

        self.content_hash = xxh3_64(&hasher_input);
    }
}

fn push_count(input: &mut Vec<u8>, tag: u8, count: usize) {
    input.push(tag);
    input.extend_from_slice(&(count as u64).to_le_bytes());
}

fn push_field(input: &mut Vec<u8>, value: &str) {
    input.extend_from_slice(&(value.len() as u64).to_le_bytes());
    input.extend_from_slice(value.as_bytes());
}
