//! Diagnostic module - Warning and error reporting infrastructure.
//!
//! This module provides types for creating, collecting and rendering
//! diagnostics about scanned sources (unterminated comments and literals,
//! unreadable inputs, bad rule sets).
//!
//! # Examples
//!
//! ```
//! use cscan_util::diagnostic::{DiagnosticBuilder, DiagnosticCode, Handler};
//! use cscan_util::span::Span;
//!
//! let handler = Handler::new();
//! DiagnosticBuilder::warning("unterminated block comment")
//!     .code(DiagnosticCode::W_UNTERMINATED_BLOCK_COMMENT)
//!     .span(Span::new(5, 12))
//!     .emit(&handler);
//!
//! assert_eq!(handler.warning_count(), 1);
//! assert!(!handler.has_errors());
//! ```

mod builder;
mod codes;
mod level;

pub use builder::{DiagnosticBuilder, SourceSnippet};
pub use codes::DiagnosticCode;
pub use level::Level;

use std::cell::RefCell;
use std::fmt::Write as _;

use crate::span::{SourceFile, Span};

/// A diagnostic message with severity and location
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic severity level
    pub level: Level,
    /// Main diagnostic message
    pub message: String,
    /// Source location
    pub span: Span,
    /// Optional diagnostic code
    pub code: Option<DiagnosticCode>,
    /// Additional notes for context
    pub notes: Vec<String>,
    /// Help suggestions for fixing the issue
    pub helps: Vec<String>,
    /// Source code snippets for display
    pub snippets: Vec<SourceSnippet>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Change the severity, keeping everything else
    ///
    /// Used to promote warnings to errors under strict checking.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Render the diagnostic against the file it was reported for
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_util::diagnostic::{Diagnostic, DiagnosticCode};
    /// use cscan_util::span::{SourceFile, Span};
    ///
    /// let file = SourceFile::new("A.java", "int a; /* open");
    /// let diag = Diagnostic::warning("unterminated block comment", Span::new(7, 14))
    ///     .with_code(DiagnosticCode::W_UNTERMINATED_BLOCK_COMMENT);
    /// let text = diag.render(&file, false);
    /// assert!(text.starts_with("warning[W0101]: unterminated block comment\n"));
    /// assert!(text.contains("--> A.java:1:8"));
    /// ```
    pub fn render(&self, file: &SourceFile, color: bool) -> String {
        let mut out = String::new();
        let header = match self.code {
            Some(code) => format!("{}[{}]", self.level, code),
            None => self.level.to_string(),
        };
        if color {
            let _ = write!(out, "\x1b[1;{}m{}\x1b[0m", self.level.color_code(), header);
        } else {
            out.push_str(&header);
        }
        let _ = writeln!(out, ": {}", self.message);

        let (line, col) = file.offset_to_line_col(self.span.start);
        let _ = writeln!(out, "   --> {}:{}:{}", file.name(), line, col);
        for snippet in &self.snippets {
            let _ = writeln!(out, "{}", snippet.format());
        }
        for note in &self.notes {
            let _ = writeln!(out, "    = note: {}", note);
        }
        for help in &self.helps {
            let _ = writeln!(out, "    = help: {}", help);
        }
        out
    }
}

/// Handler for collecting and reporting diagnostics
///
/// The `Handler` collects diagnostics through a shared reference and
/// provides methods for querying their counts. It is deliberately `!Sync`:
/// parallel callers create one handler per file and merge the results.
pub struct Handler {
    /// Collected diagnostics
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new handler
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Emit a pre-built diagnostic
    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Create a diagnostic builder for a warning at `span`
    pub fn build_warning(&self, span: Span, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::warning(message).span(span)
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level.is_error())
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.count(Level::Error)
    }

    /// Get the number of warnings
    pub fn warning_count(&self) -> usize {
        self.count(Level::Warning)
    }

    fn count(&self, level: Level) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == level)
            .count()
    }

    /// Returns true if nothing has been reported
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    /// Take all collected diagnostics, leaving the handler empty
    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }

    /// Consume the handler, returning the collected diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
