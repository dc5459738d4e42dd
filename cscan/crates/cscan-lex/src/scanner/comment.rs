//! Comment scanning.
//!
//! Line comments run to the end of the line; block comments run to the
//! first end token and do not nest.

use super::core::{Mode, Scanner};
use crate::token::LexSpan;

impl<'a> Scanner<'a> {
    /// One step inside a line comment.
    ///
    /// The line terminator (`\n` or `\r\n`) is left for the following code
    /// span.
    pub(crate) fn line_comment_step(&mut self) -> Option<LexSpan> {
        if self.cursor.at_line_end() {
            return self.finish(Mode::Code);
        }
        self.cursor.advance();
        None
    }

    /// One step inside a block comment.
    ///
    /// The end token is searched for only after the start token, so `/*/`
    /// does not close itself.
    pub(crate) fn block_comment_step(&mut self) -> Option<LexSpan> {
        let end = self.rules.block_end();
        if !end.is_empty() && self.cursor.starts_with(end) {
            self.cursor.advance_bytes(end.len());
            return self.finish(Mode::Code);
        }
        self.cursor.advance();
        None
    }
}
