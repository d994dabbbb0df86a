//! In-memory representation of annotation exports.
//!
//! A [`Document`] owns its sentences, frames, attributes and frame links for
//! the lifetime of a comparison run. Frames reference each other only through
//! document-local [`FrameId`]s; cross-document correspondence lives in the
//! diff engine, never in these types.

mod document;

pub use document::*;
