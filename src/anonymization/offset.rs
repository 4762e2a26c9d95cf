//! Byte/character offset conversion
//!
//! `regex` reports byte offsets while entities carry character offsets, so
//! every detector converts through an [`OffsetMap`] built once per call, and
//! the redaction applier converts back before slicing.
//!
//! ```text
//! text:   "le café 06…"
//! bytes:   0123456 7-8 9 …      ('é' takes two bytes)
//! chars:   0123456  7  8 …
//! ```

use crate::anonymization::models::Span;

/// Lookup table between byte and character offsets of one text
#[derive(Debug, Clone)]
pub struct OffsetMap {
    /// Byte offset of every char, plus a trailing entry for `text.len()`
    char_to_byte: Vec<usize>,
    ascii: bool,
}

impl OffsetMap {
    /// Build the map for `text`
    pub fn new(text: &str) -> Self {
        let char_to_byte = text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(std::iter::once(text.len()))
            .collect();

        Self {
            char_to_byte,
            ascii: text.is_ascii(),
        }
    }

    /// Length of the text in characters
    pub fn char_len(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    /// Whether the text is pure ASCII (byte and char offsets coincide)
    pub fn is_ascii(&self) -> bool {
        self.ascii
    }

    /// Character offset of a byte offset lying on a char boundary
    pub fn byte_to_char(&self, byte: usize) -> Option<usize> {
        self.char_to_byte.binary_search(&byte).ok()
    }

    /// Byte offset of a character offset (`char_len()` maps to the text length)
    pub fn char_to_byte(&self, char_idx: usize) -> Option<usize> {
        self.char_to_byte.get(char_idx).copied()
    }

    /// Convert a byte range reported by a regex match into a character span
    pub fn span_from_bytes(&self, byte_start: usize, byte_end: usize) -> Option<Span> {
        Some(Span::new(
            self.byte_to_char(byte_start)?,
            self.byte_to_char(byte_end)?,
        ))
    }

    /// Byte range of a character span, if it lies within the text
    pub fn byte_range(&self, span: Span) -> Option<std::ops::Range<usize>> {
        if span.start > span.end {
            return None;
        }
        Some(self.char_to_byte(span.start)?..self.char_to_byte(span.end)?)
    }

    /// Slice `text` by a character span
    pub fn slice<'a>(&self, text: &'a str, span: Span) -> Option<&'a str> {
        text.get(self.byte_range(span)?)
    }
}
