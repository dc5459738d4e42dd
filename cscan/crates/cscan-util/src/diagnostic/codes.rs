//! Diagnostic codes for categorizing scan findings.
//!
//! # Examples
//!
//! ```
//! use cscan_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::W_UNTERMINATED_BLOCK_COMMENT;
//! assert_eq!(code.prefix(), "W");
//! assert_eq!(code.as_str(), "W0101");
//! ```

/// A unique code identifying a diagnostic message
///
/// Diagnostic codes follow the format `{prefix}{number}` where:
/// - `prefix` is "E" for errors or "W" for warnings
/// - `number` is a 4-digit number (padded with zeros)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiagnosticCode {
    /// The prefix (e.g., "E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    /// Create a new diagnostic code
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    /// Get the prefix
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Get the numeric identifier
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g., "W0101")
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // ERROR CODES (E0001-E9999)
    // =========================================================================

    /// E0001: Input could not be read
    pub const E_UNREADABLE_INPUT: Self = Self::new("E", 1);

    // =========================================================================
    // WARNING CODES (W0001-W9999)
    // =========================================================================

    /// W0101: Block comment reaches end of input without its end token
    pub const W_UNTERMINATED_BLOCK_COMMENT: Self = Self::new("W", 101);
    /// W0102: String literal is not closed
    pub const W_UNTERMINATED_STRING: Self = Self::new("W", 102);
    /// W0103: Char literal is not closed
    pub const W_UNTERMINATED_CHAR: Self = Self::new("W", 103);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
