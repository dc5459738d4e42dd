//! Edge case tests for cscan-lex

#[cfg(test)]
mod tests {
    use crate::{scan, strip_source, Language, ReassemblyPolicy, ScanRules, SpanKind};

    fn kinds(source: &str) -> Vec<SpanKind> {
        scan(source, &ScanRules::default())
            .iter()
            .map(|s| s.kind)
            .collect()
    }

    fn texts(source: &str) -> Vec<&str> {
        scan(source, &ScanRules::default())
            .iter()
            .map(|s| s.text(source))
            .collect()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_lone_delimiter_chars() {
        assert_eq!(kinds("/"), vec![SpanKind::Code]);
        assert_eq!(kinds("*"), vec![SpanKind::Code]);
        assert_eq!(kinds("*/"), vec![SpanKind::Code]);
    }

    #[test]
    fn test_edge_lone_quotes() {
        assert_eq!(kinds("\""), vec![SpanKind::StringLiteral]);
        assert_eq!(kinds("'"), vec![SpanKind::CharLiteral]);
        assert_eq!(kinds("\\"), vec![SpanKind::Code]);
    }

    #[test]
    fn test_edge_empty_literals() {
        assert_eq!(texts("\"\"''"), vec!["\"\"", "''"]);
    }

    #[test]
    fn test_edge_triple_slash() {
        assert_eq!(texts("///doc\n"), vec!["///doc", "\n"]);
    }

    #[test]
    fn test_edge_doc_comment_star_star() {
        assert_eq!(texts("/** doc **/x"), vec!["/** doc **/", "x"]);
    }

    #[test]
    fn test_edge_adjacent_comments() {
        assert_eq!(
            kinds("/*a*//*b*/// c"),
            vec![
                SpanKind::BlockComment,
                SpanKind::BlockComment,
                SpanKind::LineComment,
            ]
        );
    }

    #[test]
    fn test_edge_comment_opener_after_escape_outside_literal() {
        // Escapes mean nothing in code.
        assert_eq!(texts("\\// c"), vec!["\\", "// c"]);
    }

    #[test]
    fn test_edge_only_newlines() {
        assert_eq!(kinds("\n\n\r\n"), vec![SpanKind::Code]);
    }

    #[test]
    fn test_edge_bom_is_code() {
        assert_eq!(texts("\u{FEFF}// c"), vec!["\u{FEFF}", "// c"]);
    }

    #[test]
    fn test_edge_long_line_comment() {
        let source = format!("//{}", "x".repeat(10_000));
        assert_eq!(kinds(&source), vec![SpanKind::LineComment]);
    }

    #[test]
    fn test_edge_many_escapes() {
        let source = format!("\"{}\"", "\\\\".repeat(500));
        assert_eq!(texts(&source), vec![source.as_str()]);
    }

    #[test]
    fn test_edge_odd_escapes_keep_literal_open() {
        assert_eq!(texts("\"\\\\\\\" // c"), vec!["\"\\\\\\\" // c"]);
    }

    // ==================== STRIP EDGE CASES ====================

    #[test]
    fn test_strip_empty() {
        let rules = ScanRules::default();
        assert_eq!(strip_source("", &rules, ReassemblyPolicy::PreserveLines), "");
        assert_eq!(strip_source("", &rules, ReassemblyPolicy::CollapseLines), "");
    }

    #[test]
    fn test_strip_only_comment() {
        let rules = ScanRules::default();
        assert_eq!(strip_source("// x", &rules, ReassemblyPolicy::PreserveLines), "");
        assert_eq!(strip_source("// x\n", &rules, ReassemblyPolicy::PreserveLines), "\n");
        assert_eq!(strip_source("// x\n", &rules, ReassemblyPolicy::CollapseLines), "");
    }

    #[test]
    fn test_strip_shell_script() {
        let source = "#!/bin/sh\necho \"#1\" # say\n";
        let stripped = strip_source(
            source,
            &Language::Shell.rules(),
            ReassemblyPolicy::CollapseLines,
        );
        assert_eq!(stripped, "echo \"#1\"\n");
    }

    #[test]
    fn test_strip_sql_comment_between_operands() {
        let stripped = strip_source(
            "SELECT 1-/* x */-1",
            &Language::Sql.rules(),
            ReassemblyPolicy::PreserveLines,
        );
        assert_eq!(stripped, "SELECT 1- -1");
    }
}
