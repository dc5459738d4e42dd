//! Span kinds and classified spans.
//!
//! A scan partitions its input into [`LexSpan`]s. Each one carries a
//! [`SpanKind`] and a half-open byte range into the scanned text.

use std::fmt;

use cscan_util::Span;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::rules::ScanRules;
use crate::scanner::literal_is_closed;

/// Classification of a span of source text.
///
/// The enumeration is flat: block comments do not nest, and a delimiter
/// appearing inside a comment or literal is inert content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    /// Anything outside comments and literals, including whitespace.
    Code,
    /// A line comment, from its start token up to (not including) the line end.
    LineComment,
    /// A block comment, including both delimiters when terminated.
    BlockComment,
    /// A string literal, including both quotes when terminated.
    StringLiteral,
    /// A char literal, including both quotes when terminated.
    CharLiteral,
}

impl SpanKind {
    /// Returns true for [`SpanKind::LineComment`] and [`SpanKind::BlockComment`].
    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(self, SpanKind::LineComment | SpanKind::BlockComment)
    }

    /// Returns true for [`SpanKind::StringLiteral`] and [`SpanKind::CharLiteral`].
    #[inline]
    pub const fn is_literal(self) -> bool {
        matches!(self, SpanKind::StringLiteral | SpanKind::CharLiteral)
    }

    /// Returns the snake_case name used in serialized output.
    pub const fn name(self) -> &'static str {
        match self {
            SpanKind::Code => "code",
            SpanKind::LineComment => "line_comment",
            SpanKind::BlockComment => "block_comment",
            SpanKind::StringLiteral => "string_literal",
            SpanKind::CharLiteral => "char_literal",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified, half-open byte range of the scanned text.
///
/// # Examples
///
/// ```
/// use cscan_lex::{scan, ScanRules, SpanKind};
///
/// let source = "x = 1; // one";
/// let spans = scan(source, &ScanRules::default());
/// assert_eq!(spans[1].kind, SpanKind::LineComment);
/// assert_eq!(spans[1].text(source), "// one");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LexSpan {
    /// What the range contains
    pub kind: SpanKind,
    /// Byte range into the scanned text
    pub span: Span,
}

impl LexSpan {
    /// Create a span of `kind` covering `[start, end)`
    #[inline]
    pub const fn new(kind: SpanKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }

    /// Start byte offset (inclusive)
    #[inline]
    pub const fn start(&self) -> usize {
        self.span.start
    }

    /// End byte offset (exclusive)
    #[inline]
    pub const fn end(&self) -> usize {
        self.span.end
    }

    /// Length in bytes
    #[inline]
    pub const fn len(&self) -> usize {
        self.span.len()
    }

    /// Returns true if the span covers no bytes. Never true for scanner output.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// The text this span covers in `source`
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.text(source)
    }

    /// Returns true if the construct is closed.
    ///
    /// Code and line comments are always terminated. A block comment is
    /// terminated when it ends with the end token; a literal when it ends
    /// with an unescaped closing quote. `source` and `rules` must be the ones
    /// the span was scanned from.
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_lex::{scan, ScanRules};
    ///
    /// let rules = ScanRules::default();
    /// let source = "a /* open";
    /// let spans = scan(source, &rules);
    /// assert!(spans[0].is_terminated(source, &rules));
    /// assert!(!spans[1].is_terminated(source, &rules));
    /// ```
    pub fn is_terminated(&self, source: &str, rules: &ScanRules) -> bool {
        let text = self.text(source);
        match self.kind {
            SpanKind::Code | SpanKind::LineComment => true,
            SpanKind::BlockComment => match rules.block_comment() {
                Some((start, end)) => text.len() >= start.len() + end.len() && text.ends_with(end),
                None => false,
            },
            SpanKind::StringLiteral => rules
                .string_quote()
                .is_some_and(|quote| literal_is_closed(text, quote, rules.escape())),
            SpanKind::CharLiteral => rules
                .char_quote()
                .is_some_and(|quote| literal_is_closed(text, quote, rules.escape())),
        }
    }
}

impl Serialize for LexSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LexSpan", 3)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("start", &self.span.start)?;
        state.serialize_field("end", &self.span.end)?;
        state.end()
    }
}
