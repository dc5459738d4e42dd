//! String and char literal scanning.
//!
//! Both literal kinds share one state: the quote that opened the literal
//! and whether the previous character was an unconsumed escape.

use super::core::{Mode, Scanner};
use crate::token::{LexSpan, SpanKind};

impl<'a> Scanner<'a> {
    /// One step inside a string or char literal.
    pub(crate) fn literal_step(
        &mut self,
        kind: SpanKind,
        quote: char,
        escaped: bool,
    ) -> Option<LexSpan> {
        if escaped {
            // Anything goes after an escape, including a line end.
            self.cursor.advance_line_aware();
            self.mode = Mode::Literal {
                kind,
                quote,
                escaped: false,
            };
            return None;
        }

        let c = self.cursor.current_char();
        if Some(c) == self.rules.escape() {
            self.cursor.advance();
            self.mode = Mode::Literal {
                kind,
                quote,
                escaped: true,
            };
            return None;
        }
        if c == quote {
            self.cursor.advance();
            return self.finish(Mode::Code);
        }
        if !self.rules.allow_multiline_literals() && self.cursor.at_line_end() {
            return self.finish(Mode::Code);
        }
        self.cursor.advance();
        None
    }
}

/// Returns true if `text` is a literal opened and closed by `quote`, with
/// the closing quote unescaped and last.
pub(crate) fn literal_is_closed(text: &str, quote: char, escape: Option<char>) -> bool {
    if !text.starts_with(quote) {
        return false;
    }
    let mut escaped = false;
    for (i, c) in text.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if Some(c) == escape {
            escaped = true;
        } else if c == quote {
            return i + c.len_utf8() == text.len();
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scan, ScanRules};

    fn split(source: &str, rules: &ScanRules) -> Vec<(SpanKind, String)> {
        scan(source, rules)
            .iter()
            .map(|s| (s.kind, s.text(source).to_string()))
            .collect()
    }

    #[test]
    fn test_escaped_quote_stays_inside() {
        let source = r#""a\"b""#;
        let spans = scan(source, &ScanRules::default());
        assert_eq!(spans, vec![LexSpan::new(SpanKind::StringLiteral, 0, source.len())]);
    }

    #[test]
    fn test_escaped_escape_then_quote_closes() {
        let spans = split(r#""a\\" x"#, &ScanRules::default());
        assert_eq!(spans[0], (SpanKind::StringLiteral, r#""a\\""#.into()));
        assert_eq!(spans[1], (SpanKind::Code, " x".into()));
    }

    #[test]
    fn test_comment_openers_inside_string() {
        let spans = split(r#"s = "http://x /* y */";"#, &ScanRules::default());
        assert_eq!(
            spans,
            vec![
                (SpanKind::Code, "s = ".into()),
                (SpanKind::StringLiteral, r#""http://x /* y */""#.into()),
                (SpanKind::Code, ";".into()),
            ]
        );
    }

    #[test]
    fn test_char_literal_with_escaped_quote() {
        let spans = split(r"c = '\''; // q", &ScanRules::default());
        assert_eq!(spans[1], (SpanKind::CharLiteral, r"'\''".into()));
        assert_eq!(spans[3], (SpanKind::LineComment, "// q".into()));
    }

    #[test]
    fn test_other_quote_is_content() {
        let spans = split(r#""it's" 'a"'"#, &ScanRules::default());
        assert_eq!(spans[0], (SpanKind::StringLiteral, r#""it's""#.into()));
        assert_eq!(spans[2], (SpanKind::CharLiteral, r#"'a"'"#.into()));
    }

    #[test]
    fn test_newline_ends_literal_by_default() {
        let spans = split("\"abc\n// c", &ScanRules::default());
        assert_eq!(
            spans,
            vec![
                (SpanKind::StringLiteral, "\"abc".into()),
                (SpanKind::Code, "\n".into()),
                (SpanKind::LineComment, "// c".into()),
            ]
        );
    }

    #[test]
    fn test_crlf_ends_literal_outside() {
        let spans = split("\"abc\r\nx", &ScanRules::default());
        assert_eq!(spans[0], (SpanKind::StringLiteral, "\"abc".into()));
        assert_eq!(spans[1], (SpanKind::Code, "\r\nx".into()));
    }

    #[test]
    fn test_multiline_literal_allowed() {
        let rules = ScanRules::default()
            .to_builder()
            .allow_multiline_literals(true)
            .build()
            .unwrap();
        let spans = split("\"a\n// b\" c", &rules);
        assert_eq!(spans[0], (SpanKind::StringLiteral, "\"a\n// b\"".into()));
        assert_eq!(spans[1], (SpanKind::Code, " c".into()));
    }

    #[test]
    fn test_escaped_newline_continues_literal() {
        let spans = split("\"a\\\nb\" x", &ScanRules::default());
        assert_eq!(spans[0], (SpanKind::StringLiteral, "\"a\\\nb\"".into()));
        let spans = split("\"a\\\r\nb\"", &ScanRules::default());
        assert_eq!(spans, vec![(SpanKind::StringLiteral, "\"a\\\r\nb\"".into())]);
    }

    #[test]
    fn test_escape_at_end_of_input() {
        let source = "x = \"ab\\";
        let spans = scan(source, &ScanRules::default());
        assert_eq!(spans.last(), Some(&LexSpan::new(SpanKind::StringLiteral, 4, source.len())));
    }

    #[test]
    fn test_escape_before_multibyte_char() {
        let spans = split("\"\\é\" ok", &ScanRules::default());
        assert_eq!(spans[0], (SpanKind::StringLiteral, "\"\\é\"".into()));
    }

    #[test]
    fn test_no_escape_rules() {
        let rules = ScanRules::builder().string_quote('"').build().unwrap();
        let spans = split(r#""a\" b"#, &rules);
        assert_eq!(spans[0], (SpanKind::StringLiteral, r#""a\""#.into()));
    }

    #[test]
    fn test_literal_is_closed() {
        assert!(literal_is_closed("\"ab\"", '"', Some('\\')));
        assert!(literal_is_closed("''", '\'', Some('\\')));
        assert!(!literal_is_closed("\"", '"', Some('\\')));
        assert!(!literal_is_closed("\"ab", '"', Some('\\')));
        assert!(!literal_is_closed("\"ab\\\"", '"', Some('\\')));
        assert!(literal_is_closed("\"ab\\\"", '"', None));
        assert!(!literal_is_closed("x\"", '"', None));
    }
}
