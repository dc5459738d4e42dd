//! Core scanner implementation.
//!
//! This module contains the Scanner struct, its mode enum and the
//! dispatch loop. The per-mode transitions live in sibling modules.

use std::iter::FusedIterator;

use crate::cursor::Cursor;
use crate::rules::ScanRules;
use crate::token::{LexSpan, SpanKind};

/// What the scanner is inside of.
///
/// Transitions:
///
/// | Mode | On | Next |
/// |---|---|---|
/// | `Code` | an opener (priority order) | that opener's mode |
/// | `LineComment` | line end | `Code`, line end stays outside |
/// | `BlockComment` | end token | `Code`, end token included |
/// | `Literal` | escape | same mode, next char consumed |
/// | `Literal` | its own quote | `Code`, quote included |
/// | `Literal` | line end, multi-line disallowed | `Code`, line end stays outside |
/// | any | end of input | span closed at end of input |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Code,
    LineComment,
    BlockComment,
    Literal {
        kind: SpanKind,
        quote: char,
        escaped: bool,
    },
}

impl Mode {
    /// The mode entered when `token` opens a construct of `kind`
    fn opened_by(kind: SpanKind, token: &str) -> Self {
        match kind {
            SpanKind::LineComment => Mode::LineComment,
            SpanKind::BlockComment => Mode::BlockComment,
            SpanKind::StringLiteral | SpanKind::CharLiteral => Mode::Literal {
                kind,
                quote: token.chars().next().unwrap_or_default(),
                escaped: false,
            },
            SpanKind::Code => Mode::Code,
        }
    }

    fn kind(self) -> SpanKind {
        match self {
            Mode::Code => SpanKind::Code,
            Mode::LineComment => SpanKind::LineComment,
            Mode::BlockComment => SpanKind::BlockComment,
            Mode::Literal { kind, .. } => kind,
        }
    }
}

/// Lexical span scanner.
///
/// Yields one [`LexSpan`] per call to `next`. The spans are contiguous,
/// non-overlapping, never empty, and together cover the whole input.
/// All state lives in the value itself, so independent scanners may run on
/// different threads over the same source and rules.
///
/// # Examples
///
/// ```
/// use cscan_lex::{ScanRules, Scanner, SpanKind};
///
/// let rules = ScanRules::default();
/// let kinds: Vec<_> = Scanner::new("a = 'b'; /* c */", &rules)
///     .map(|span| span.kind)
///     .collect();
/// assert_eq!(
///     kinds,
///     [SpanKind::Code, SpanKind::CharLiteral, SpanKind::Code, SpanKind::BlockComment]
/// );
/// ```
pub struct Scanner<'a> {
    /// Character cursor for source traversal.
    pub(crate) cursor: Cursor<'a>,

    /// Delimiters being scanned for.
    pub(crate) rules: &'a ScanRules,

    /// Current mode.
    pub(crate) mode: Mode,

    /// Starting position of the span in progress (byte offset).
    span_start: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner over `source`.
    pub fn new(source: &'a str, rules: &'a ScanRules) -> Self {
        Self {
            cursor: Cursor::new(source),
            rules,
            mode: Mode::Code,
            span_start: 0,
        }
    }

    /// Returns the byte offset of the next character to be scanned.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Returns the rules this scanner was created with.
    pub fn rules(&self) -> &'a ScanRules {
        self.rules
    }

    /// Closes the span in progress at the current position and switches to
    /// `next`. Returns `None` instead of an empty span.
    pub(crate) fn finish(&mut self, next: Mode) -> Option<LexSpan> {
        let start = std::mem::replace(&mut self.span_start, self.cursor.position());
        let kind = self.mode.kind();
        self.mode = next;
        (start < self.span_start).then(|| LexSpan::new(kind, start, self.span_start))
    }

    /// One step in code mode: enter a construct or extend the code span.
    fn code_step(&mut self) -> Option<LexSpan> {
        let rules = self.rules;
        match rules.match_opener(self.cursor.remaining()) {
            Some(opener) => {
                let pending = self.finish(Mode::opened_by(opener.kind, &opener.token));
                self.cursor.advance_bytes(opener.token.len());
                pending
            },
            None => {
                self.cursor.advance();
                None
            },
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = LexSpan;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cursor.is_at_end() {
                return self.finish(Mode::Code);
            }

            let emitted = match self.mode {
                Mode::Code => self.code_step(),
                Mode::LineComment => self.line_comment_step(),
                Mode::BlockComment => self.block_comment_step(),
                Mode::Literal {
                    kind,
                    quote,
                    escaped,
                } => self.literal_step(kind, quote, escaped),
            };
            if emitted.is_some() {
                return emitted;
            }
        }
    }
}

impl FusedIterator for Scanner<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_skips_empty_span() {
        let rules = ScanRules::default();
        let mut scanner = Scanner::new("x", &rules);
        assert_eq!(scanner.finish(Mode::LineComment), None);
        assert_eq!(scanner.mode, Mode::LineComment);
    }

    #[test]
    fn test_fused_after_end() {
        let rules = ScanRules::default();
        let mut scanner = Scanner::new("ab", &rules);
        assert_eq!(scanner.next(), Some(LexSpan::new(SpanKind::Code, 0, 2)));
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.position(), 2);
    }

    #[test]
    fn test_opener_at_start_emits_no_code_span() {
        let rules = ScanRules::default();
        let spans: Vec<_> = Scanner::new("\"s\"", &rules).collect();
        assert_eq!(spans, vec![LexSpan::new(SpanKind::StringLiteral, 0, 3)]);
    }

    #[test]
    fn test_opened_by_takes_quote_from_token() {
        assert_eq!(
            Mode::opened_by(SpanKind::CharLiteral, "'"),
            Mode::Literal {
                kind: SpanKind::CharLiteral,
                quote: '\'',
                escaped: false,
            }
        );
        assert_eq!(Mode::opened_by(SpanKind::BlockComment, "/*").kind(), SpanKind::BlockComment);
    }
}
