//! Source files and line/column lookup.
//!
//! This module provides the [`SourceFile`] type, which owns a source buffer
//! together with a precomputed table of line start offsets.

use std::sync::Arc;

/// A source file with its content and metadata
///
/// # Examples
///
/// ```
/// use cscan_util::span::SourceFile;
///
/// let file = SourceFile::new("Main.java", "class Main {}");
/// assert_eq!(file.name(), "Main.java");
/// assert_eq!(file.content(), "class Main {}");
/// ```
#[derive(Clone)]
pub struct SourceFile {
    /// File name (path or display name)
    name: String,
    /// File content
    content: Arc<str>,
    /// Precomputed line start offsets
    line_starts: Arc<[usize]>,
}

impl SourceFile {
    /// Create a new source file
    ///
    /// # Arguments
    ///
    /// * `name` - File name or path
    /// * `content` - File content
    pub fn new(name: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = Self::line_starts(&content);
        Self {
            name: name.into(),
            content,
            line_starts,
        }
    }

    /// Compute line start offsets from content
    fn line_starts(content: &str) -> Arc<[usize]> {
        std::iter::once(0)
            .chain(
                content
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect()
    }

    /// Get the file name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the file content
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the total number of lines
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_util::span::SourceFile;
    ///
    /// let file = SourceFile::new("Main.java", "line1\nline2\nline3");
    /// assert_eq!(file.line_count(), 3);
    /// ```
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset where a line starts (0-indexed line number)
    #[inline]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Convert a byte offset to (line, column) coordinates
    ///
    /// Line and column are 1-indexed. Column counts characters, not bytes,
    /// so multi-byte identifiers do not shift carets in rendered snippets.
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_util::span::SourceFile;
    ///
    /// let file = SourceFile::new("Main.java", "int a;\n// b");
    /// assert_eq!(file.offset_to_line_col(0), (1, 1));
    /// assert_eq!(file.offset_to_line_col(7), (2, 1));
    /// assert_eq!(file.offset_to_line_col(10), (2, 4));
    /// ```
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.content.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts[line];
        let col = self
            .content
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        (line + 1, col + 1)
    }

    /// Get a line by its 1-based number, without the line terminator
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_util::span::SourceFile;
    ///
    /// let file = SourceFile::new("Main.java", "line1\r\nline2");
    /// assert_eq!(file.line_at(1), Some("line1"));
    /// assert_eq!(file.line_at(2), Some("line2"));
    /// assert_eq!(file.line_at(3), None);
    /// ```
    pub fn line_at(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }
        let start = self.line_start(line - 1)?;
        let end = self.line_start(line).unwrap_or(self.content.len());
        Some(self.content[start..end].trim_end_matches(['\n', '\r']))
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("len", &self.content.len())
            .field("lines", &self.line_count())
            .finish()
    }
}
