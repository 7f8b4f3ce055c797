//! Line cursor handed to block parsers.

use xi_rope::Rope;

use super::rope::{LineRef, Span, lines_with_spans, slice_to_string};

/// Cursor over the physical lines of a rope.
///
/// The cursor sits on one line at a time; `peek_line` returns what remains of
/// that line from the current column. Advancing past the end of a line moves
/// on to the next one.
pub struct LineReader<'a> {
    rope: &'a Rope,
    lines: Vec<LineRef>,
    line: usize,
    col: usize,
}

impl<'a> LineReader<'a> {
    pub fn new(rope: &'a Rope) -> Self {
        Self {
            rope,
            lines: lines_with_spans(rope).collect(),
            line: 0,
            col: 0,
        }
    }

    /// Remainder of the current line and its span, or `None` at end of input.
    pub fn peek_line(&self) -> Option<(&str, Span)> {
        let lr = self.lines.get(self.line)?;
        let span = Span::new(lr.span.start + self.col, lr.span.end);
        Some((&lr.text[self.col..], span))
    }

    /// Moves the cursor `n` bytes forward within the current line.
    pub fn advance(&mut self, n: usize) {
        let Some(lr) = self.lines.get(self.line) else {
            return;
        };
        self.col += n;
        if self.col >= lr.text.len() {
            self.advance_line();
        } else {
            while !lr.text.is_char_boundary(self.col) {
                self.col += 1;
            }
        }
    }

    /// Skips whatever remains of the current line.
    pub fn advance_line(&mut self) {
        if self.line < self.lines.len() {
            self.line += 1;
            self.col = 0;
        }
    }

    /// Absolute byte offset of the cursor.
    pub fn position(&self) -> usize {
        match self.lines.get(self.line) {
            Some(lr) => lr.span.start + self.col,
            None => self.rope.len(),
        }
    }

    /// Zero-based index of the current line.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Source text for `span`.
    pub fn value(&self, span: Span) -> String {
        slice_to_string(self.rope, span)
    }
}
