//! End-to-end tests over the commented / comment-free fixture pair.

use cscan_lex::{
    code_text, extract_comments, scan, strip_comments, Language, ReassemblyPolicy, ScanRules,
    SpanKind,
};

const COMMENTED: &str = include_str!("fixtures/Main.java");
const STRIPPED: &str = include_str!("fixtures/MainStripped.java");
const COLLAPSED: &str = include_str!("fixtures/MainCollapsed.java");

fn rules() -> ScanRules {
    Language::Java.rules()
}

#[test]
fn test_strip_preserving_lines_matches_fixture() {
    let spans = scan(COMMENTED, &rules());
    let stripped = strip_comments(COMMENTED, &spans, ReassemblyPolicy::PreserveLines);
    assert_eq!(stripped, STRIPPED);
    assert_eq!(stripped.lines().count(), COMMENTED.lines().count());
}

#[test]
fn test_strip_collapsing_lines_matches_fixture() {
    let spans = scan(COMMENTED, &rules());
    let stripped = strip_comments(COMMENTED, &spans, ReassemblyPolicy::CollapseLines);
    assert_eq!(stripped, COLLAPSED);
}

#[test]
fn test_stripped_fixtures_have_no_comments() {
    for fixture in [STRIPPED, COLLAPSED] {
        let spans = scan(fixture, &rules());
        assert!(spans.iter().all(|s| !s.kind.is_comment()));
    }
}

#[test]
fn test_code_spans_survive_rescan() {
    let rules = rules();
    let spans = scan(COMMENTED, &rules);
    let code = code_text(COMMENTED, &spans);
    let rescanned = scan(&code, &rules);

    let original: Vec<&str> = spans
        .iter()
        .filter(|s| !s.kind.is_comment())
        .map(|s| s.text(COMMENTED))
        .collect();
    let again: Vec<&str> = rescanned.iter().map(|s| s.text(&code)).collect();
    assert_eq!(again.concat(), original.concat());
    assert!(rescanned.iter().all(|s| !s.kind.is_comment()));
}

#[test]
fn test_literals_identical_in_both_versions() {
    let literals = |text: &str| -> Vec<String> {
        scan(text, &rules())
            .iter()
            .filter(|s| s.kind.is_literal())
            .map(|s| s.text(text).to_string())
            .collect()
    };
    let expected = literals(COMMENTED);
    assert!(expected.contains(&"\"http://example.com/*path*/\"".to_string()));
    assert!(expected.contains(&"'\\''".to_string()));
    assert_eq!(literals(STRIPPED), expected);
    assert_eq!(literals(COLLAPSED), expected);
}

#[test]
fn test_extracted_comments() {
    let rules = rules();
    let spans = scan(COMMENTED, &rules);
    let comments = extract_comments(COMMENTED, &spans, &rules);
    let found: Vec<(usize, SpanKind, &str)> = comments
        .iter()
        .map(|c| (c.line, c.kind, c.body(&rules).trim()))
        .collect();

    assert_eq!(found.len(), 8);
    assert_eq!(found[1], (11, SpanKind::BlockComment, "This is a comment"));
    assert_eq!(found[2], (14, SpanKind::LineComment, "first"));
    assert_eq!(
        found[3],
        (18, SpanKind::LineComment, "This is another style of comment")
    );
    assert_eq!(found[5], (28, SpanKind::BlockComment, "inline"));
    assert_eq!(found[7], (40, SpanKind::LineComment, "field"));
    assert!(comments.iter().all(|c| c.terminated));
}
