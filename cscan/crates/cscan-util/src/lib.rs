//! cscan-util - Core Utilities and Foundation Types
//!
//! This crate provides the small set of types shared by the scanner and the
//! command-line tool:
//!
//! - [`span`] - byte-range [`Span`]s and [`SourceFile`] line lookup
//! - [`diagnostic`] - warnings/errors about scanned sources, with rendering
//!
//! Offsets are byte offsets into UTF-8 text. Every span the scanner emits
//! starts and ends on a character boundary, so `&source[span.start..span.end]`
//! is always valid.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level, SourceSnippet};
pub use span::{SourceFile, Span};
