//! Lexical span scanner.
//!
//! This module provides the [`Scanner`] state machine and the [`scan`]
//! convenience function. Submodules:
//!
//! - `core` - Scanner struct, modes and the dispatch loop
//! - `comment` - Line and block comment transitions
//! - `literal` - String and char literal transitions, escapes

mod comment;
mod core;
mod literal;

pub use self::core::Scanner;
pub(crate) use literal::literal_is_closed;

use crate::rules::ScanRules;
use crate::token::LexSpan;

/// Scan `source` into classified spans.
///
/// The result is ordered by start offset, contiguous, free of empty spans,
/// and covers `0..source.len()` exactly. Scanning never fails: an
/// unterminated construct is returned as a non-code span ending at the end
/// of the input.
///
/// # Examples
///
/// ```
/// use cscan_lex::{scan, LexSpan, ScanRules, SpanKind};
///
/// let spans = scan("code /* open", &ScanRules::default());
/// assert_eq!(
///     spans,
///     vec![
///         LexSpan::new(SpanKind::Code, 0, 5),
///         LexSpan::new(SpanKind::BlockComment, 5, 12),
///     ]
/// );
/// ```
pub fn scan(source: &str, rules: &ScanRules) -> Vec<LexSpan> {
    Scanner::new(source, rules).collect()
}
