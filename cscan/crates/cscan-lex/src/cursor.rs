//! Character cursor for traversing source text.
//!
//! This module provides the `Cursor` struct which maintains the byte
//! position while the scanner walks the source. It always advances by whole
//! UTF-8 characters, so every position it reports is a char boundary.

/// A cursor for traversing source text character by character.
///
/// The cursor maintains the current position in the source string and
/// provides methods for advancing, peeking ahead, and matching delimiter
/// tokens at the current position.
///
/// # Example
///
/// ```
/// use cscan_lex::cursor::Cursor;
///
/// let source = "int x; // y";
/// let mut cursor = Cursor::new(source);
///
/// assert_eq!(cursor.current_char(), 'i');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), 'n');
/// ```
pub struct Cursor<'a> {
    /// The source text being traversed.
    source: &'a str,

    /// Current byte position in the source.
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor for the given source text.
    ///
    /// # Arguments
    ///
    /// * `source` - The source text to traverse
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Returns the current character at the cursor position.
    ///
    /// Returns '\0' (null character) if at the end of the source.
    ///
    /// # Example
    ///
    /// ```
    /// use cscan_lex::cursor::Cursor;
    ///
    /// let cursor = Cursor::new("abc");
    /// assert_eq!(cursor.current_char(), 'a');
    /// assert_eq!(Cursor::new("").current_char(), '\0');
    /// ```
    #[inline]
    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    /// Returns the character starting at the given byte offset from the
    /// current position.
    ///
    /// # Arguments
    ///
    /// * `offset` - Number of bytes to look ahead
    #[inline]
    pub fn char_at(&self, offset: usize) -> char {
        let pos = self.position + offset;
        if pos >= self.source.len() {
            return '\0';
        }

        // Fast path for ASCII (most common case)
        let b = self.source.as_bytes()[pos];
        if b < 128 {
            return b as char;
        }

        // Slow path for UTF-8
        self.source
            .get(pos..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\0')
    }

    /// Returns true if the remaining input starts with `token`.
    ///
    /// # Example
    ///
    /// ```
    /// use cscan_lex::cursor::Cursor;
    ///
    /// let cursor = Cursor::new("/* c */");
    /// assert!(cursor.starts_with("/*"));
    /// assert!(!cursor.starts_with("//"));
    /// ```
    #[inline]
    pub fn starts_with(&self, token: &str) -> bool {
        self.source.as_bytes()[self.position..].starts_with(token.as_bytes())
    }

    /// Returns true if the cursor sits on a line terminator: `\n`, or a `\r`
    /// directly followed by `\n`.
    ///
    /// A lone `\r` is ordinary content.
    ///
    /// # Example
    ///
    /// ```
    /// use cscan_lex::cursor::Cursor;
    ///
    /// assert!(Cursor::new("\nx").at_line_end());
    /// assert!(Cursor::new("\r\nx").at_line_end());
    /// assert!(!Cursor::new("\rx").at_line_end());
    /// ```
    #[inline]
    pub fn at_line_end(&self) -> bool {
        match self.current_char() {
            '\n' => true,
            '\r' => self.char_at(1) == '\n',
            _ => false,
        }
    }

    /// Advances the cursor to the next character.
    ///
    /// Does nothing if already at end.
    ///
    /// # Example
    ///
    /// ```
    /// use cscan_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("éa");
    /// cursor.advance();
    /// assert_eq!(cursor.position(), 2);
    /// assert_eq!(cursor.current_char(), 'a');
    /// ```
    #[inline]
    pub fn advance(&mut self) {
        if self.position >= self.source.len() {
            return;
        }

        // Fast path for ASCII (most common)
        let b = self.source.as_bytes()[self.position];
        if b < 128 {
            self.position += 1;
            return;
        }

        // Slow path for UTF-8 multi-byte characters
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
        }
    }

    /// Advances past a line terminator, treating `\r\n` as one unit.
    ///
    /// Behaves like [`Cursor::advance`] on any other character.
    pub fn advance_line_aware(&mut self) {
        if self.current_char() == '\r' && self.char_at(1) == '\n' {
            self.position += 2;
        } else {
            self.advance();
        }
    }

    /// Advances by the given byte count.
    ///
    /// Callers pass the length of a token that [`Cursor::starts_with`] just
    /// matched, which keeps the position on a char boundary.
    #[inline]
    pub fn advance_bytes(&mut self, count: usize) {
        let remaining = self.source.len() - self.position;
        self.position += count.min(remaining);
    }

    /// Returns true if the cursor is at the end of the source.
    ///
    /// # Example
    ///
    /// ```
    /// use cscan_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("a");
    /// assert!(!cursor.is_at_end());
    /// cursor.advance();
    /// assert!(cursor.is_at_end());
    /// ```
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Returns the current byte position in the source.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the source text from the current position to the end.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }
}
