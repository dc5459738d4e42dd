//! cscan-lex - Lexical Span Scanner
//!
//! This crate classifies source text into typed spans: code, line comments,
//! block comments, string literals and char literals. Comment stripping,
//! comment extraction and highlighting are all built on that partition.
//!
//! # Overview
//!
//! Telling a comment from a comment delimiter inside a string needs a small
//! state machine rather than a regular expression. The [`Scanner`] walks the
//! text once, left to right, switching modes on the delimiters configured in
//! a [`ScanRules`] value, and never backtracks.
//!
//! # Example Usage
//!
//! ```
//! use cscan_lex::{scan, strip_source, ReassemblyPolicy, ScanRules, SpanKind};
//!
//! let rules = ScanRules::default();
//! let source = "String s = \"/* kept */\"; // dropped\n";
//!
//! let spans = scan(source, &rules);
//! assert_eq!(spans.len(), 5);
//! assert_eq!(spans[1].kind, SpanKind::StringLiteral);
//! assert_eq!(spans[3].kind, SpanKind::LineComment);
//!
//! let stripped = strip_source(source, &rules, ReassemblyPolicy::PreserveLines);
//! assert_eq!(stripped, "String s = \"/* kept */\";\n");
//! ```
//!
//! # Module Structure
//!
//! - [`token`] - Span kinds and classified spans
//! - [`rules`] - Scan rules, their builder and validation
//! - [`language`] - Built-in rule presets
//! - [`scanner`] - The scanning state machine
//! - [`reassemble`] - Stripping and extracting comments
//! - [`diagnose`] - Warnings for unterminated constructs
//! - [`cursor`] - Character cursor for source traversal
//!
//! # Guarantees
//!
//! For any input and any valid rules, the spans returned by [`scan`] are
//! ordered, contiguous, non-empty and cover the input exactly. Offsets are
//! byte offsets on UTF-8 character boundaries. Scanning never fails;
//! unterminated constructs show up as a comment or literal span running to
//! the end of the input (or, for single-line literals, to the line break).

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cursor;
pub mod diagnose;
pub mod language;
pub mod reassemble;
pub mod rules;
pub mod scanner;
pub mod token;

mod edge_cases;

// Re-export main types for convenience
pub use cursor::Cursor;
pub use diagnose::diagnose;
pub use language::Language;
pub use reassemble::{
    code_text, extract_comments, strip_comments, strip_source, Comment, ReassemblyPolicy,
    UnknownPolicy,
};
pub use rules::{RulesError, ScanRules, ScanRulesBuilder};
pub use scanner::{scan, Scanner};
pub use token::{LexSpan, SpanKind};
