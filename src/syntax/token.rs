//! Spans produced while tokenizing
//!
//! `Match` and `SubToken` are intermediate results of a single tokenize
//! call; `Token` is what callers receive.

use super::tags::StyleTag;

/// A styled sub-span emitted by a rule processor
///
/// Offsets are absolute byte offsets into the tokenized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubToken {
    /// Byte offset where this sub-span starts (inclusive)
    pub start: usize,
    /// Byte offset where this sub-span ends (exclusive)
    pub end: usize,
    /// Style for this sub-span
    pub style: StyleTag,
}

impl SubToken {
    pub fn new(start: usize, end: usize, style: StyleTag) -> Self {
        Self { start, end, style }
    }
}

/// One occurrence of a rule's pattern in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Byte offset where the match starts (inclusive)
    pub start: usize,
    /// Byte offset where the match ends (exclusive)
    pub end: usize,
    /// Index of the rule within its brush; lower wins on overlap
    pub rule_index: usize,
    /// Fixed style of the rule, `None` for processor rules
    pub style: Option<StyleTag>,
    /// Processor output, empty for fixed-style rules
    pub sub_tokens: Vec<SubToken>,
}

impl Match {
    /// Check whether two matches share any text
    pub fn overlaps(&self, other: &Match) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A span of the final token stream
///
/// The tokens returned for a text never overlap and together cover the
/// whole input. Plain text carries no style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Byte offset where this token starts (inclusive)
    pub start: usize,
    /// Byte offset where this token ends (exclusive)
    pub end: usize,
    /// Style to apply, `None` for plain text
    pub style: Option<StyleTag>,
}

impl Token {
    /// Create a styled token
    pub fn styled(start: usize, end: usize, style: StyleTag) -> Self {
        Self { start, end, style: Some(style) }
    }

    /// Create a plain-text token
    pub fn plain(start: usize, end: usize) -> Self {
        Self { start, end, style: None }
    }

    /// The source text this token covers
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Check if this token is plain text
    pub fn is_plain(&self) -> bool {
        self.style.is_none()
    }

    /// Get the length of this token in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if token is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Move the token by `offset` bytes
    pub(crate) fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            style: self.style,
        }
    }
}
