//! Speakable fragments and the assembled speakable text

use serde::Serialize;
use std::fmt;

use crate::{assembler, errors::DomainError, extractor, tokenizer};

/// A unit of extracted text with an optional trailing pause
///
/// A pause is spoken as a sentence-terminating period. A fragment with empty
/// text and a pause (a horizontal rule) contributes only the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakableFragment {
    text: String,
    pause: bool,
}

impl SpeakableFragment {
    /// Create a fragment
    pub fn new(text: impl Into<String>, pause: bool) -> Self {
        Self {
            text: text.into(),
            pause,
        }
    }

    /// A fragment carrying only a pause
    pub const fn pause_only() -> Self {
        Self {
            text: String::new(),
            pause: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn has_pause(&self) -> bool {
        self.pause
    }

    /// True when the fragment has no spoken words
    pub fn is_pause_only(&self) -> bool {
        self.pause && self.text.trim().is_empty()
    }
}

/// Final speakable string
///
/// Never empty, never has leading or trailing whitespace, and never contains
/// two consecutive whitespace characters.
///
/// # Examples
///
/// ```
/// use domain::SpeakableText;
///
/// let text = SpeakableText::from_markdown("# Hi\n\nThis is `code` and a [link](http://x).")
///     .expect("speakable");
/// assert_eq!(text.as_str(), "Hi. This is and a link.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SpeakableText(String);

impl SpeakableText {
    /// Assemble fragments into speakable text
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NoSpeakableContent`] when the fragments join to
    /// an empty string.
    pub fn from_fragments(fragments: &[SpeakableFragment]) -> Result<Self, DomainError> {
        let text = assembler::assemble(fragments);
        if text.is_empty() {
            return Err(DomainError::NoSpeakableContent);
        }
        Ok(Self(text))
    }

    /// Tokenize, extract and assemble a markdown document
    pub fn from_markdown(markdown: &str) -> Result<Self, DomainError> {
        let nodes = tokenizer::parse(markdown);
        Self::from_fragments(&extractor::extract(&nodes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in Unicode scalar values, the unit provider limits are counted in
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SpeakableText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SpeakableText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
