//! Rebuilding text from scanned spans.
//!
//! Comment stripping drops comment spans and stitches the rest back
//! together under a [`ReassemblyPolicy`]:
//!
//! - [`ReassemblyPolicy::PreserveLines`] replaces a removed comment by the
//!   line breaks it contained, so every code line keeps its line number and
//!   a line that held only a comment becomes an empty line.
//! - [`ReassemblyPolicy::CollapseLines`] drops the line breaks inside removed
//!   comments, and drops lines left empty by the removal. Lines that were
//!   already blank are kept.
//!
//! Under both policies a single space is inserted where a comment separated
//! two non-whitespace characters, and trailing spaces and tabs are trimmed
//! from lines that lost a comment. Trimming never reaches into a literal.
//!
//! # Examples
//!
//! ```
//! use cscan_lex::{strip_source, ReassemblyPolicy, ScanRules};
//!
//! let rules = ScanRules::default();
//! let source = "int a; // one\n// two\nint/* three */b;\n";
//!
//! let kept = strip_source(source, &rules, ReassemblyPolicy::PreserveLines);
//! assert_eq!(kept, "int a;\n\nint b;\n");
//!
//! let collapsed = strip_source(source, &rules, ReassemblyPolicy::CollapseLines);
//! assert_eq!(collapsed, "int a;\nint b;\n");
//! ```

use std::fmt;
use std::str::FromStr;

use cscan_util::Span;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::ScanRules;
use crate::scanner::scan;
use crate::token::{LexSpan, SpanKind};

/// How line structure is rebuilt after comments are removed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReassemblyPolicy {
    /// Keep every line; comment-only lines become empty
    #[default]
    #[serde(rename = "preserve")]
    PreserveLines,
    /// Drop lines emptied by comment removal
    #[serde(rename = "collapse")]
    CollapseLines,
}

impl ReassemblyPolicy {
    /// Short name, as accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            ReassemblyPolicy::PreserveLines => "preserve",
            ReassemblyPolicy::CollapseLines => "collapse",
        }
    }
}

impl fmt::Display for ReassemblyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized policy name
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown reassembly policy `{0}` (expected `preserve` or `collapse`)")]
pub struct UnknownPolicy(pub String);

impl FromStr for ReassemblyPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "preserve" | "preserve-lines" => Ok(ReassemblyPolicy::PreserveLines),
            "collapse" | "collapse-lines" => Ok(ReassemblyPolicy::CollapseLines),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Per-line bookkeeping for the output being built
#[derive(Clone, Copy, Debug)]
struct LineState {
    /// Byte offset of the line in the output
    start: usize,
    /// Trimming may not cut below this output offset
    floor: usize,
    /// A comment was removed from this line
    touched: bool,
}

impl LineState {
    fn at(offset: usize) -> Self {
        Self {
            start: offset,
            floor: offset,
            touched: false,
        }
    }
}

struct Output {
    text: String,
    done: Vec<LineState>,
    line: LineState,
}

impl Output {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            done: Vec::new(),
            line: LineState::at(0),
        }
    }

    /// Append kept source text. `protect` marks literal text, which trimming
    /// must not touch.
    fn push(&mut self, text: &str, protect: bool) {
        for piece in text.split_inclusive('\n') {
            self.text.push_str(piece);
            if protect {
                self.line.floor = self.text.len();
            }
            if piece.ends_with('\n') {
                self.new_line();
            }
        }
    }

    fn new_line(&mut self) {
        let next = LineState::at(self.text.len());
        self.done.push(std::mem::replace(&mut self.line, next));
    }

    /// Drop spaces and tabs at the end of the output, down to the floor.
    fn trim_blanks(&mut self) {
        let floor = self.line.floor;
        let kept = self.text[floor..].trim_end_matches([' ', '\t']).len();
        self.text.truncate(floor + kept);
    }

    fn remove_comment(&mut self, comment: &str, next: Option<char>, policy: ReassemblyPolicy) {
        self.line.touched = true;
        if next.map_or(true, char::is_whitespace) || comment.contains('\n') {
            self.trim_blanks();
        }
        if policy == ReassemblyPolicy::PreserveLines && comment.contains('\n') {
            for piece in comment.split_inclusive('\n').filter(|p| p.ends_with('\n')) {
                self.text
                    .push_str(if piece.ends_with("\r\n") { "\r\n" } else { "\n" });
                self.new_line();
                self.line.touched = true;
            }
            return;
        }
        let solid = |c: Option<char>| c.is_some_and(|c| !c.is_whitespace());
        if solid(self.text.chars().next_back()) && solid(next) {
            self.text.push(' ');
        }
    }

    fn finish(mut self, policy: ReassemblyPolicy) -> String {
        self.new_line();
        let mut out = String::with_capacity(self.text.len());
        let ends = self
            .done
            .iter()
            .skip(1)
            .map(|line| line.start)
            .chain(std::iter::once(self.text.len()));
        for (line, end) in self.done.iter().zip(ends) {
            let raw = &self.text[line.start..end];
            if !line.touched {
                out.push_str(raw);
                continue;
            }
            let (body, terminator) = split_terminator(raw);
            let floor = (line.floor - line.start).min(body.len());
            let trimmed = floor + body[floor..].trim_end_matches([' ', '\t']).len();
            let body = &body[..trimmed];
            if policy == ReassemblyPolicy::CollapseLines && body.is_empty() {
                continue;
            }
            out.push_str(body);
            out.push_str(terminator);
        }
        out
    }
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Remove comment spans from `source` under `policy`.
///
/// `spans` must be the result of scanning `source`.
pub fn strip_comments(source: &str, spans: &[LexSpan], policy: ReassemblyPolicy) -> String {
    let mut out = Output::with_capacity(source.len());
    for span in spans {
        let text = span.text(source);
        if span.kind.is_comment() {
            let next = source[span.end()..].chars().next();
            out.remove_comment(text, next, policy);
        } else {
            out.push(text, span.kind.is_literal());
        }
    }
    out.finish(policy)
}

/// Scan `source` and remove its comments.
///
/// The result contains no comments when rescanned with the same rules,
/// and stripping it again returns it unchanged.
pub fn strip_source(source: &str, rules: &ScanRules, policy: ReassemblyPolicy) -> String {
    strip_comments(source, &scan(source, rules), policy)
}

/// Concatenate the non-comment spans verbatim, with no line repair.
///
/// Neighbouring code is joined as-is, so the result may form new comment
/// openers (`-/**/-` becomes `--` under SQL rules). Use [`strip_source`]
/// for text that will be scanned again.
///
/// # Examples
///
/// ```
/// use cscan_lex::{code_text, scan, ScanRules};
///
/// let source = "a/* x */b // y\n";
/// assert_eq!(code_text(source, &scan(source, &ScanRules::default())), "ab \n");
/// ```
pub fn code_text(source: &str, spans: &[LexSpan]) -> String {
    spans
        .iter()
        .filter(|span| !span.kind.is_comment())
        .map(|span| span.text(source))
        .collect()
}

/// A comment found in a source text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comment<'a> {
    /// Line or block comment
    pub kind: SpanKind,
    /// Byte range in the source
    pub span: Span,
    /// 1-based line the comment starts on
    pub line: usize,
    /// Full text, delimiters included
    pub text: &'a str,
    /// False for a block comment that runs off the end of the input
    pub terminated: bool,
}

impl<'a> Comment<'a> {
    /// The comment text without its delimiters
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_lex::{extract_comments, scan, ScanRules};
    ///
    /// let rules = ScanRules::default();
    /// let source = "x; /* note */ // more";
    /// let comments = extract_comments(source, &scan(source, &rules), &rules);
    /// assert_eq!(comments[0].body(&rules), " note ");
    /// assert_eq!(comments[1].body(&rules), " more");
    /// ```
    pub fn body(&self, rules: &ScanRules) -> &'a str {
        let text = self.text;
        match self.kind {
            SpanKind::LineComment => rules
                .line_comment()
                .and_then(|start| text.strip_prefix(start))
                .unwrap_or(text),
            SpanKind::BlockComment => {
                let Some((start, end)) = rules.block_comment() else {
                    return text;
                };
                let inner = text.strip_prefix(start).unwrap_or(text);
                if self.terminated {
                    inner.strip_suffix(end).unwrap_or(inner)
                } else {
                    inner
                }
            },
            _ => text,
        }
    }
}

/// Collect the comments of `source` in order.
///
/// `spans` must be the result of scanning `source` with `rules`.
pub fn extract_comments<'a>(
    source: &'a str,
    spans: &[LexSpan],
    rules: &ScanRules,
) -> Vec<Comment<'a>> {
    let mut line = 1;
    let mut comments = Vec::new();
    for span in spans {
        let text = span.text(source);
        if span.kind.is_comment() {
            comments.push(Comment {
                kind: span.kind,
                span: span.span,
                line,
                text,
                terminated: span.is_terminated(source, rules),
            });
        }
        line += text.bytes().filter(|&b| b == b'\n').count();
    }
    comments
}
