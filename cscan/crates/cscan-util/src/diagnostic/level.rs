//! Diagnostic severity levels.
//!
//! # Examples
//!
//! ```
//! use cscan_util::diagnostic::Level;
//!
//! assert!(Level::Error.is_error());
//! assert!(!Level::Warning.is_error());
//! assert_eq!(format!("{}", Level::Warning), "warning");
//! ```

use std::fmt;

/// Diagnostic severity level
///
/// The scanner itself never fails; levels classify what callers choose to
/// report about its output (an unterminated comment is a [`Level::Warning`]
/// by default, promoted to an error under strict checking).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// An error that fails the run
    Error,
    /// A warning that doesn't fail the run
    Warning,
    /// Additional information about a diagnostic
    Note,
    /// A suggestion for fixing an issue
    Help,
}

impl Level {
    /// Returns true if this level represents an error
    #[inline]
    pub const fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }

    /// Returns true if this level represents a warning
    #[inline]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Level::Warning)
    }

    /// Returns true if this level is informational (Note or Help)
    #[inline]
    pub const fn is_info(&self) -> bool {
        matches!(self, Level::Note | Level::Help)
    }

    /// Returns the canonical name for this level
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
            Level::Help => "help",
        }
    }

    /// Returns the ANSI color code for this level
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_util::diagnostic::Level;
    ///
    /// assert_eq!(Level::Error.color_code(), "31");
    /// assert_eq!(Level::Warning.color_code(), "33");
    /// ```
    #[inline]
    pub const fn color_code(&self) -> &'static str {
        match self {
            Level::Error => "31",   // Red
            Level::Warning => "33", // Yellow
            Level::Note => "36",    // Cyan
            Level::Help => "32",    // Green
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
