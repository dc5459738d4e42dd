//! Warnings for unterminated constructs.
//!
//! Scanning is total, so an unclosed comment or literal is not an error.
//! [`diagnose`] turns those spans into warnings for callers that want to
//! report them.

use cscan_util::{DiagnosticCode, Handler, SourceFile, SourceSnippet};

use crate::rules::ScanRules;
use crate::token::{LexSpan, SpanKind};

/// Emit one warning per unterminated span in `spans`.
///
/// `spans` must be the result of scanning `file.content()` with `rules`.
/// Returns the number of warnings emitted.
///
/// # Examples
///
/// ```
/// use cscan_lex::{diagnose, scan, ScanRules};
/// use cscan_util::{Handler, SourceFile};
///
/// let rules = ScanRules::default();
/// let file = SourceFile::new("A.java", "int a; /* open");
/// let handler = Handler::new();
/// let count = diagnose(&file, &scan(file.content(), &rules), &rules, &handler);
/// assert_eq!(count, 1);
/// assert_eq!(handler.warning_count(), 1);
/// ```
pub fn diagnose(file: &SourceFile, spans: &[LexSpan], rules: &ScanRules, handler: &Handler) -> usize {
    let source = file.content();
    let mut count = 0;
    for span in spans {
        if span.is_terminated(source, rules) {
            continue;
        }
        let (message, code, closer) = match span.kind {
            SpanKind::BlockComment => (
                "unterminated block comment",
                DiagnosticCode::W_UNTERMINATED_BLOCK_COMMENT,
                rules.block_comment().map(|(_, end)| end.to_string()),
            ),
            SpanKind::StringLiteral => (
                "unterminated string literal",
                DiagnosticCode::W_UNTERMINATED_STRING,
                rules.string_quote().map(String::from),
            ),
            SpanKind::CharLiteral => (
                "unterminated char literal",
                DiagnosticCode::W_UNTERMINATED_CHAR,
                rules.char_quote().map(String::from),
            ),
            SpanKind::Code | SpanKind::LineComment => continue,
        };

        let reaches_end = span.end() == source.len();
        let mut builder = handler
            .build_warning(span.span, message)
            .code(code)
            .snippet(SourceSnippet::from_span(file, span.span).with_label("starts here"));
        if !reaches_end {
            builder = builder.note("the literal ends at the line break");
        }
        if let Some(closer) = closer {
            builder = builder.help(format!("add the closing `{}`", closer));
        }
        builder.emit(handler);
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan;

    fn check(source: &str) -> Handler {
        let rules = ScanRules::default();
        let file = SourceFile::new("T.java", source);
        let handler = Handler::new();
        diagnose(&file, &scan(source, &rules), &rules, &handler);
        handler
    }

    #[test]
    fn test_clean_source_has_no_warnings() {
        let handler = check("int a = 1; // ok\n/* ok */ char c = '\\'';\n");
        assert!(handler.is_empty());
    }

    #[test]
    fn test_each_kind_has_its_code() {
        let handler = check("s = \"open\nc = 'x\n/* open");
        let codes: Vec<_> = handler
            .take_diagnostics()
            .into_iter()
            .map(|d| d.code)
            .collect();
        assert_eq!(
            codes,
            vec![
                Some(DiagnosticCode::W_UNTERMINATED_STRING),
                Some(DiagnosticCode::W_UNTERMINATED_CHAR),
                Some(DiagnosticCode::W_UNTERMINATED_BLOCK_COMMENT),
            ]
        );
    }

    #[test]
    fn test_rendered_warning_points_at_opener() {
        let source = "a;\nb; /* open\nmore";
        let file = SourceFile::new("T.java", source);
        let handler = check(source);
        let diagnostics = handler.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        let text = diagnostics[0].render(&file, false);
        assert!(text.starts_with("warning[W0101]: unterminated block comment\n"));
        assert!(text.contains("--> T.java:2:4"));
        assert!(text.contains("^^^^^^^ starts here"));
        assert!(text.contains("= help: add the closing `*/`"));
        assert!(!text.contains("= note:"));
    }

    #[test]
    fn test_literal_cut_by_newline_gets_note() {
        let handler = check("s = \"open\nx;");
        let diagnostics = handler.into_diagnostics();
        assert_eq!(diagnostics[0].notes, vec!["the literal ends at the line break".to_string()]);
    }
}
