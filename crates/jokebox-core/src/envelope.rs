//! Uniform response envelope for tool output.

use serde::{Deserialize, Serialize};

/// A single block of tool output content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    /// Plain text payload.
    Text { text: String },
}

/// Wrapper around every tool's result.
///
/// Every tool returns this shape regardless of which tool ran or whether it
/// succeeded: recoverable failures are reported as ordinary text content, not
/// on a separate error channel, so clients have a single handling path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub content: Vec<Content>,
}

impl Envelope {
    /// Wrap a string as a single text content block.
    #[must_use]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
        }
    }

    /// The first text payload, if any.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .map(|Content::Text { text }| text.as_str())
            .next()
    }
}
