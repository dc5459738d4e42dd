//! Span module - Source location tracking.
//!
//! This module provides the byte-range [`Span`] used by every scanner output,
//! and [`SourceFile`] for turning byte offsets back into line/column pairs.
//!
//! # Examples
//!
//! ```
//! use cscan_util::span::Span;
//!
//! let source = "int x; // note";
//! let span = Span::new(7, 14);
//! assert_eq!(span.text(source), "// note");
//! ```

mod source_map;

pub use source_map::SourceFile;

/// Half-open byte range `[start, end)` into a source buffer
///
/// Offsets always fall on UTF-8 character boundaries when produced by the
/// scanner, so [`Span::text`] never splits a code point.
///
/// # Examples
///
/// ```
/// use cscan_util::span::Span;
///
/// let span = Span::new(10, 20);
/// assert_eq!(span.len(), 10);
/// assert!(span.contains(15));
/// assert!(!span.contains(20));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// Start byte offset in source (inclusive)
    pub start: usize,
    /// End byte offset in source (exclusive)
    pub end: usize,
}

impl Span {
    /// Dummy span for diagnostics that have no location
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_util::span::Span;
    ///
    /// let span = Span::new(3, 8);
    /// assert_eq!(span.start, 3);
    /// assert_eq!(span.end, 8);
    /// ```
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Returns true if this span is empty (start == end)
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the length of the span in bytes
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if this span contains a byte offset
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Join two adjacent spans into a single span
    ///
    /// Returns `None` if the spans are not adjacent (self.end != other.start).
    ///
    /// # Examples
    ///
    /// ```
    /// use cscan_util::span::Span;
    ///
    /// let joined = Span::new(10, 20).join(Span::new(20, 30)).unwrap();
    /// assert_eq!(joined, Span::new(10, 30));
    /// assert!(Span::new(10, 20).join(Span::new(25, 30)).is_none());
    /// ```
    #[inline]
    pub fn join(self, other: Span) -> Option<Span> {
        (self.end == other.start).then_some(Span {
            start: self.start,
            end: other.end,
        })
    }

    /// Borrow the text covered by this span
    ///
    /// # Panics
    ///
    /// Panics if the span is out of bounds for `source` or does not fall on
    /// character boundaries.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_is_empty() {
        assert!(Span::new(10, 10).is_empty());
        assert!(!Span::new(10, 20).is_empty());
    }

    #[test]
    fn test_span_contains_is_half_open() {
        let span = Span::new(10, 20);
        assert!(span.contains(10));
        assert!(span.contains(19));
        assert!(!span.contains(20));
        assert!(!span.contains(9));
    }

    #[test]
    fn test_span_join() {
        assert_eq!(
            Span::new(0, 4).join(Span::new(4, 9)),
            Some(Span::new(0, 9))
        );
        assert_eq!(Span::new(0, 4).join(Span::new(5, 9)), None);
    }

    #[test]
    fn test_span_text_multibyte() {
        let source = "a = \"π\";";
        let span = Span::new(4, 8);
        assert_eq!(span.text(source), "\"π\"");
    }

    #[test]
    fn test_span_ordering_by_start() {
        let mut spans = vec![Span::new(5, 7), Span::new(0, 5), Span::new(7, 7)];
        spans.sort();
        assert_eq!(spans[0], Span::new(0, 5));
        assert_eq!(spans[2], Span::new(7, 7));
    }
}
