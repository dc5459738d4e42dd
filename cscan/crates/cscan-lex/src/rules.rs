//! Scan rules: the delimiters and escape character of a language.
//!
//! A [`ScanRules`] value is only obtainable through [`ScanRulesBuilder::build`]
//! (or [`ScanRules::default`] and the [`Language`](crate::Language) presets),
//! so every rule set the scanner sees has already been validated:
//!
//! - no delimiter token is empty or contains whitespace,
//! - no two openers are identical,
//! - the escape character is not also a quote,
//! - at least one opener exists.
//!
//! Keeping whitespace out of tokens is what lets comment stripping insert
//! spaces and newlines without ever creating a new opener.
//!
//! # Examples
//!
//! ```
//! use cscan_lex::{ScanRules, RulesError};
//!
//! let sql = ScanRules::builder()
//!     .line_comment("--")
//!     .block_comment("/*", "*/")
//!     .string_quote('\'')
//!     .build()
//!     .unwrap();
//! assert_eq!(sql.line_comment(), Some("--"));
//!
//! let err = ScanRules::builder().line_comment("#").string_quote('#').build();
//! assert!(matches!(err, Err(RulesError::ConflictingOpeners { .. })));
//! ```

use thiserror::Error;

use crate::token::SpanKind;

/// Errors reported when a rule set is rejected
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A delimiter token is the empty string
    #[error("{which} must not be empty")]
    EmptyToken {
        /// Which delimiter
        which: &'static str,
    },

    /// A delimiter token contains whitespace
    #[error("{which} must not contain whitespace")]
    WhitespaceInToken {
        /// Which delimiter
        which: &'static str,
    },

    /// Two constructs start with the same token
    #[error("{first} and {second} use the same start token `{token}`")]
    ConflictingOpeners {
        /// Name of the first construct
        first: &'static str,
        /// Name of the second construct
        second: &'static str,
        /// The shared token
        token: String,
    },

    /// The escape character is also a quote character
    #[error("escape character `{0}` is also used as a quote")]
    EscapeIsQuote(char),

    /// Neither comments nor literals are configured
    #[error("rule set has no comment or literal delimiters")]
    NoOpeners,
}

/// A token that switches the scanner out of code mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Opener {
    pub(crate) token: String,
    pub(crate) kind: SpanKind,
}

/// Immutable delimiter configuration for one language
///
/// Reusable across any number of scans, and shareable between threads
/// without synchronization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanRules {
    line_comment: Option<String>,
    block_comment: Option<(String, String)>,
    string_quote: Option<char>,
    char_quote: Option<char>,
    escape: Option<char>,
    allow_multiline_literals: bool,
    /// Openers in match priority order
    openers: Vec<Opener>,
}

impl ScanRules {
    /// Start an empty builder
    pub fn builder() -> ScanRulesBuilder {
        ScanRulesBuilder::default()
    }

    /// A builder pre-filled with these rules, for deriving a variant
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_lex::ScanRules;
    ///
    /// let rules = ScanRules::default()
    ///     .to_builder()
    ///     .allow_multiline_literals(true)
    ///     .build()
    ///     .unwrap();
    /// assert!(rules.allow_multiline_literals());
    /// assert_eq!(rules.line_comment(), Some("//"));
    /// ```
    pub fn to_builder(&self) -> ScanRulesBuilder {
        ScanRulesBuilder {
            line_comment: self.line_comment.clone(),
            block_comment: self.block_comment.clone(),
            string_quote: self.string_quote,
            char_quote: self.char_quote,
            escape: self.escape,
            allow_multiline_literals: self.allow_multiline_literals,
        }
    }

    /// Line comment start token
    pub fn line_comment(&self) -> Option<&str> {
        self.line_comment.as_deref()
    }

    /// Block comment start and end tokens
    pub fn block_comment(&self) -> Option<(&str, &str)> {
        self.block_comment
            .as_ref()
            .map(|(start, end)| (start.as_str(), end.as_str()))
    }

    /// String literal quote
    pub fn string_quote(&self) -> Option<char> {
        self.string_quote
    }

    /// Char literal quote
    pub fn char_quote(&self) -> Option<char> {
        self.char_quote
    }

    /// Escape character recognized inside literals
    pub fn escape(&self) -> Option<char> {
        self.escape
    }

    /// Whether a literal may continue past an unescaped line end
    pub fn allow_multiline_literals(&self) -> bool {
        self.allow_multiline_literals
    }

    /// The opener matching at the start of `input`, honoring priority
    #[inline]
    pub(crate) fn match_opener(&self, input: &str) -> Option<&Opener> {
        self.openers
            .iter()
            .find(|opener| input.starts_with(opener.token.as_str()))
    }

    /// The block comment end token, if block comments are configured
    #[inline]
    pub(crate) fn block_end(&self) -> &str {
        self.block_comment
            .as_ref()
            .map_or("", |(_, end)| end.as_str())
    }
}

impl Default for ScanRules {
    /// Java/C family: `//`, `/* */`, `"`, `'`, `\`, single-line literals
    fn default() -> Self {
        Self::preset(Some("//"), Some(("/*", "*/")), Some('"'), Some('\''), Some('\\'))
    }
}

impl ScanRules {
    /// Build a rule set from tokens known to be valid
    ///
    /// Only used for the built-in presets; a test checks that each of them
    /// passes [`ScanRulesBuilder::build`].
    pub(crate) fn preset(
        line_comment: Option<&str>,
        block_comment: Option<(&str, &str)>,
        string_quote: Option<char>,
        char_quote: Option<char>,
        escape: Option<char>,
    ) -> Self {
        let line_comment = line_comment.map(str::to_string);
        let block_comment = block_comment.map(|(start, end)| (start.to_string(), end.to_string()));
        let openers = priority_order(&line_comment, &block_comment, string_quote, char_quote);
        Self {
            line_comment,
            block_comment,
            string_quote,
            char_quote,
            escape,
            allow_multiline_literals: false,
            openers,
        }
    }
}

/// Fluent builder for [`ScanRules`]
///
/// Every delimiter starts unset; [`ScanRulesBuilder::build`] validates the
/// combination.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanRulesBuilder {
    line_comment: Option<String>,
    block_comment: Option<(String, String)>,
    string_quote: Option<char>,
    char_quote: Option<char>,
    escape: Option<char>,
    allow_multiline_literals: bool,
}

impl ScanRulesBuilder {
    /// Set the line comment start token
    pub fn line_comment(mut self, token: impl Into<String>) -> Self {
        self.line_comment = Some(token.into());
        self
    }

    /// Remove line comments
    pub fn no_line_comment(mut self) -> Self {
        self.line_comment = None;
        self
    }

    /// Set the block comment start and end tokens
    pub fn block_comment(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.block_comment = Some((start.into(), end.into()));
        self
    }

    /// Remove block comments
    pub fn no_block_comment(mut self) -> Self {
        self.block_comment = None;
        self
    }

    /// Set the string quote
    pub fn string_quote(mut self, quote: char) -> Self {
        self.string_quote = Some(quote);
        self
    }

    /// Remove string literals
    pub fn no_string_quote(mut self) -> Self {
        self.string_quote = None;
        self
    }

    /// Set the char quote
    pub fn char_quote(mut self, quote: char) -> Self {
        self.char_quote = Some(quote);
        self
    }

    /// Remove char literals
    pub fn no_char_quote(mut self) -> Self {
        self.char_quote = None;
        self
    }

    /// Set the escape character
    pub fn escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Remove escapes; quotes then always close a literal
    pub fn no_escape(mut self) -> Self {
        self.escape = None;
        self
    }

    /// Allow literals to span lines
    pub fn allow_multiline_literals(mut self, allow: bool) -> Self {
        self.allow_multiline_literals = allow;
        self
    }

    /// Validate and build the rule set
    pub fn build(self) -> Result<ScanRules, RulesError> {
        if let Some(token) = &self.line_comment {
            check_token(token, "line comment start")?;
        }
        if let Some((start, end)) = &self.block_comment {
            check_token(start, "block comment start")?;
            check_token(end, "block comment end")?;
        }
        if self.string_quote.is_some_and(char::is_whitespace) {
            return Err(RulesError::WhitespaceInToken {
                which: "string quote",
            });
        }
        if self.char_quote.is_some_and(char::is_whitespace) {
            return Err(RulesError::WhitespaceInToken { which: "char quote" });
        }
        if let Some(escape) = self.escape {
            if escape.is_whitespace() {
                return Err(RulesError::WhitespaceInToken {
                    which: "escape character",
                });
            }
            if self.string_quote == Some(escape) || self.char_quote == Some(escape) {
                return Err(RulesError::EscapeIsQuote(escape));
            }
        }

        let openers = priority_order(
            &self.line_comment,
            &self.block_comment,
            self.string_quote,
            self.char_quote,
        );
        if openers.is_empty() {
            return Err(RulesError::NoOpeners);
        }
        for (i, a) in openers.iter().enumerate() {
            if let Some(b) = openers[i + 1..].iter().find(|b| b.token == a.token) {
                return Err(RulesError::ConflictingOpeners {
                    first: opener_name(a.kind),
                    second: opener_name(b.kind),
                    token: a.token.clone(),
                });
            }
        }

        Ok(ScanRules {
            line_comment: self.line_comment,
            block_comment: self.block_comment,
            string_quote: self.string_quote,
            char_quote: self.char_quote,
            escape: self.escape,
            allow_multiline_literals: self.allow_multiline_literals,
            openers,
        })
    }
}

fn check_token(token: &str, which: &'static str) -> Result<(), RulesError> {
    if token.is_empty() {
        return Err(RulesError::EmptyToken { which });
    }
    if token.chars().any(char::is_whitespace) {
        return Err(RulesError::WhitespaceInToken { which });
    }
    Ok(())
}

fn opener_name(kind: SpanKind) -> &'static str {
    match kind {
        SpanKind::LineComment => "line comment",
        SpanKind::BlockComment => "block comment",
        SpanKind::StringLiteral => "string literal",
        SpanKind::CharLiteral => "char literal",
        SpanKind::Code => "code",
    }
}

/// Longest token first; equal lengths keep block, line, string, char order.
fn priority_order(
    line_comment: &Option<String>,
    block_comment: &Option<(String, String)>,
    string_quote: Option<char>,
    char_quote: Option<char>,
) -> Vec<Opener> {
    let candidates = [
        block_comment
            .as_ref()
            .map(|(start, _)| (start.clone(), SpanKind::BlockComment)),
        line_comment
            .as_ref()
            .map(|token| (token.clone(), SpanKind::LineComment)),
        string_quote.map(|q| (q.to_string(), SpanKind::StringLiteral)),
        char_quote.map(|q| (q.to_string(), SpanKind::CharLiteral)),
    ];
    let mut openers: Vec<Opener> = candidates
        .into_iter()
        .flatten()
        .map(|(token, kind)| Opener { token, kind })
        .collect();
    // Stable sort keeps the class order among equal lengths.
    openers.sort_by(|a, b| b.token.chars().count().cmp(&a.token.chars().count()));
    openers
}
