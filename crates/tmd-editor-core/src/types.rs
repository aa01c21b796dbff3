//! Core editor types: positions, selections and line ranges.
//!
//! Positions are line based, matching how the formatting actions address the
//! document. Character offsets inside a line are Unicode scalar values, not
//! bytes or UTF-16 code units.

use std::ops::RangeInclusive;

/// A position in the document: zero-based line index and char offset within it.
#[derive(Clone, Debug, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }

    /// Start of the given line.
    pub fn line_start(line: usize) -> Self {
        Self { line, ch: 0 }
    }

    /// Same line, char offset moved left by `n` (saturating at the line start).
    pub fn shifted_left(self, n: usize) -> Self {
        Self {
            line: self.line,
            ch: self.ch.saturating_sub(n),
        }
    }

    /// Same line, char offset moved right by `n`.
    pub fn shifted_right(self, n: usize) -> Self {
        Self {
            line: self.line,
            ch: self.ch + n,
        }
    }
}

/// A selection as the user made it. `head` is the caret end and may come
/// before `anchor`.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// An empty selection at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Earlier of the two ends.
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// Later of the two ends.
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }

    /// Check if the selection is collapsed (caret only).
    pub fn is_caret(&self) -> bool {
        self.anchor == self.head
    }

    /// Head before anchor.
    pub fn is_backwards(&self) -> bool {
        self.head < self.anchor
    }

    /// Whether both ends sit on the same line.
    pub fn is_single_line(&self) -> bool {
        self.anchor.line == self.head.line
    }

    /// Inclusive range of lines touched by the selection.
    pub fn lines(&self) -> RangeInclusive<usize> {
        self.start().line..=self.end().line
    }

    /// Build a selection covering `start..end`, keeping this selection's direction.
    ///
    /// A caret stays a caret: if `self` is collapsed, only `start` is used.
    pub fn remapped(&self, start: Position, end: Position) -> Self {
        if self.is_caret() {
            Self::caret(start)
        } else if self.is_backwards() {
            Self::new(end, start)
        } else {
            Self::new(start, end)
        }
    }
}

/// Direction for indenting a single line.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum IndentDirection {
    Add,
    Subtract,
}

/// Default indentation unit in columns.
///
/// Indented code needs four columns of indentation, so one unit removes it.
pub const DEFAULT_INDENT_UNIT: usize = 4;

/// Tab stops used when measuring leading whitespace.
pub const TAB_WIDTH: usize = 4;

/// Measure the leading whitespace of `line` in columns, returning
/// `(columns, chars)`.
pub fn leading_indent(line: &str) -> (usize, usize) {
    let mut cols = 0;
    let mut chars = 0;
    for c in line.chars() {
        match c {
            ' ' => cols += 1,
            '\t' => cols += TAB_WIDTH - cols % TAB_WIDTH,
            _ => break,
        }
        chars += 1;
    }
    (cols, chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_bounds() {
        // Forward selection
        let sel = Selection::new(Position::new(0, 5), Position::new(1, 2));
        assert_eq!(sel.start(), Position::new(0, 5));
        assert_eq!(sel.end(), Position::new(1, 2));
        assert!(!sel.is_backwards());

        // Backward selection
        let sel = Selection::new(Position::new(1, 2), Position::new(0, 5));
        assert_eq!(sel.start(), Position::new(0, 5));
        assert_eq!(sel.end(), Position::new(1, 2));
        assert!(sel.is_backwards());
        assert_eq!(sel.lines(), 0..=1);
    }

    #[test]
    fn test_remapped_keeps_direction() {
        let fwd = Selection::new(Position::new(0, 1), Position::new(0, 4));
        let r = fwd.remapped(Position::new(0, 3), Position::new(0, 6));
        assert_eq!(r.anchor, Position::new(0, 3));
        assert_eq!(r.head, Position::new(0, 6));

        let back = Selection::new(Position::new(0, 4), Position::new(0, 1));
        let r = back.remapped(Position::new(0, 3), Position::new(0, 6));
        assert_eq!(r.anchor, Position::new(0, 6));
        assert_eq!(r.head, Position::new(0, 3));

        let caret = Selection::caret(Position::new(0, 2));
        let r = caret.remapped(Position::new(0, 4), Position::new(0, 9));
        assert!(r.is_caret());
        assert_eq!(r.head, Position::new(0, 4));
    }

    #[test]
    fn test_leading_indent() {
        assert_eq!(leading_indent("    code"), (4, 4));
        assert_eq!(leading_indent("\tcode"), (4, 1));
        assert_eq!(leading_indent("  \tcode"), (4, 3));
        assert_eq!(leading_indent("code"), (0, 0));
        assert_eq!(leading_indent("   "), (3, 3));
    }
}
