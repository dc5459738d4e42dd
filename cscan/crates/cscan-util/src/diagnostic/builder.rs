//! Diagnostic builder for fluent diagnostic construction.
//!
//! This module provides the [`DiagnosticBuilder`] type for constructing
//! diagnostics with a fluent API, including source code snippets.

use super::{Diagnostic, DiagnosticCode, Handler, Level};
use crate::span::{SourceFile, Span};

/// A source code snippet for display in diagnostics
///
/// Contains the first source line affected by the diagnostic, with
/// highlighting of the specific column range on that line.
///
/// # Examples
///
/// ```
/// use cscan_util::diagnostic::SourceSnippet;
///
/// let snippet = SourceSnippet::new("  /* open", 3, 3, 10, Some("starts here"));
/// assert_eq!(snippet.format(), "  3 |   /* open\n    |   ^^^^^^^ starts here");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSnippet {
    /// The source line content
    pub line: String,
    /// Line number (1-based)
    pub line_number: usize,
    /// Column where the issue starts (1-based)
    pub start_column: usize,
    /// Column where the issue ends (1-based, exclusive)
    pub end_column: usize,
    /// Optional label to display under the highlighted range
    pub label: Option<String>,
}

impl SourceSnippet {
    /// Create a new source snippet
    pub fn new(
        line: impl Into<String>,
        line_number: usize,
        start_column: usize,
        end_column: usize,
        label: Option<impl Into<String>>,
    ) -> Self {
        Self {
            line: line.into(),
            line_number,
            start_column,
            end_column,
            label: label.map(Into::into),
        }
    }

    /// Create a snippet for a span of a source file
    ///
    /// Spans that cross a line boundary are underlined up to the end of the
    /// first line.
    pub fn from_span(file: &SourceFile, span: Span) -> Self {
        let (line_number, start_column) = file.offset_to_line_col(span.start);
        let line = file.line_at(line_number).unwrap_or_default();
        let (end_line, end_col) = file.offset_to_line_col(span.end);
        let end_column = if end_line == line_number {
            end_col
        } else {
            line.chars().count() + 1
        };
        Self {
            line: line.to_string(),
            line_number,
            start_column,
            end_column: end_column.max(start_column + 1),
            label: None,
        }
    }

    /// Set the label for this snippet
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Format the snippet for display
    ///
    /// Returns a formatted string showing the source line with carets (^)
    /// under the relevant range.
    pub fn format(&self) -> String {
        let width = self.line_number.to_string().len().max(3);
        let underline_start = self.start_column.saturating_sub(1);
        let underline_len = self.end_column.saturating_sub(self.start_column).max(1);

        let mut result = format!("{:>width$} | {}\n", self.line_number, self.line);
        result.push_str(&format!("{:>width$} | ", ""));
        result.push_str(&" ".repeat(underline_start));
        result.push_str(&"^".repeat(underline_len));
        if let Some(ref label) = self.label {
            result.push(' ');
            result.push_str(label);
        }
        result
    }
}

/// Builder for constructing diagnostics with a fluent API
///
/// # Examples
///
/// ```
/// use cscan_util::diagnostic::{DiagnosticBuilder, DiagnosticCode, Level};
/// use cscan_util::span::Span;
///
/// let diag = DiagnosticBuilder::warning("unterminated block comment")
///     .code(DiagnosticCode::W_UNTERMINATED_BLOCK_COMMENT)
///     .span(Span::new(5, 12))
///     .help("add the closing `*/`")
///     .build();
/// assert_eq!(diag.level, Level::Warning);
/// ```
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
    code: Option<DiagnosticCode>,
    notes: Vec<String>,
    helps: Vec<String>,
    snippets: Vec<SourceSnippet>,
}

impl DiagnosticBuilder {
    /// Create a new diagnostic builder
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: Span::DUMMY,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    /// Create an error builder
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Create a warning builder
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    /// Set the diagnostic code
    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the source span
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Add a note to the diagnostic
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a help suggestion to the diagnostic
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    /// Add a source code snippet
    pub fn snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }

    /// Build the diagnostic
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            span: self.span,
            code: self.code,
            notes: self.notes,
            helps: self.helps,
            snippets: self.snippets,
        }
    }

    /// Build and emit the diagnostic to the given handler
    pub fn emit(self, handler: &Handler) {
        handler.emit_diagnostic(self.build());
    }
}
