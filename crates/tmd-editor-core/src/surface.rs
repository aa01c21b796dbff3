//! The editing surface the formatting actions run against.
//!
//! Defines the `MarkdownSurface` trait, the capability set an editing
//! component has to offer (line storage, selection, token lookup, indentation
//! and undo), and `PlainEditor`, a field-based implementation over any
//! `TextBuffer + UndoManager` used by hosts without their own editing
//! component and by the tests.

use std::cell::OnceCell;

use smol_str::SmolStr;

use crate::highlight::highlight;
use crate::options::EditorOptions;
use crate::style::{LineTokens, Token};
use crate::text::{EditorRope, TextBuffer};
use crate::types::{DEFAULT_INDENT_UNIT, IndentDirection, Position, Selection, leading_indent};
use crate::undo::{UndoManager, UndoableBuffer};

/// Capabilities the formatting actions need from an editing component.
///
/// Implementations own the document; actions read fresh state on every call
/// and write back through `replace_range`, which must map the selection the
/// way an editor does: positions before the edit stay put, positions inside
/// the replaced range (or at its end) move to the end of the inserted text,
/// later positions shift.
pub trait MarkdownSurface {
    /// Whether the component is initialized and can take edits.
    fn is_ready(&self) -> bool {
        true
    }

    fn line_count(&self) -> usize;

    /// Text of line `idx` without its terminator.
    fn line(&self, idx: usize) -> Option<SmolStr>;

    fn selection(&self) -> Selection;

    fn set_selection(&mut self, selection: Selection);

    /// Replace the text between two positions. `from` and `to` may come in
    /// either order and are clamped to the document.
    fn replace_range(&mut self, from: Position, to: Position, text: &str);

    /// Token used to classify `pos`: the one covering the char before it, or
    /// the first char at `ch == 0`.
    fn token_at(&self, pos: Position) -> Option<Token>;

    /// Indent or outdent a line by one indentation unit.
    fn indent_line(&mut self, line: usize, direction: IndentDirection);

    /// Run several edits as one atomic, single-undo-step operation.
    fn batch<F>(&mut self, f: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        f(self)
    }

    fn undo(&mut self) -> bool {
        false
    }

    fn redo(&mut self) -> bool {
        false
    }

    // === Provided: line helpers ===

    /// Length of line `idx` in chars, 0 for missing lines.
    fn line_len(&self, idx: usize) -> usize {
        self.line(idx).map_or(0, |l| l.chars().count())
    }

    /// Replace the full text of a line, keeping its terminator.
    fn replace_line(&mut self, idx: usize, text: &str) {
        let len = self.line_len(idx);
        self.replace_range(Position::line_start(idx), Position::new(idx, len), text);
    }

    /// Remove a line together with one line break.
    fn delete_line(&mut self, idx: usize) {
        let count = self.line_count();
        if idx + 1 < count {
            self.replace_range(Position::line_start(idx), Position::line_start(idx + 1), "");
        } else if idx > 0 && idx < count {
            let prev_end = Position::new(idx - 1, self.line_len(idx - 1));
            self.replace_range(prev_end, Position::new(idx, self.line_len(idx)), "");
        } else {
            self.replace_line(idx, "");
        }
    }

    /// Insert `text` as a new line before line `idx`, or after the last line
    /// when `idx` is past the end.
    fn insert_line(&mut self, idx: usize, text: &str) {
        let count = self.line_count();
        if idx < count {
            self.replace_range(
                Position::line_start(idx),
                Position::line_start(idx),
                &format!("{text}\n"),
            );
        } else {
            let last = count.saturating_sub(1);
            let end = Position::new(last, self.line_len(last));
            self.replace_range(end, end, &format!("\n{text}"));
        }
    }
}

/// Simple field-based implementation of `MarkdownSurface`.
///
/// Stores the selection as plain positions and highlights lazily: the token
/// stream is computed on the first lookup after an edit.
#[derive(Clone)]
pub struct PlainEditor<T: TextBuffer + UndoManager> {
    buffer: T,
    selection: Selection,
    indent_unit: usize,
    tokens: OnceCell<Vec<LineTokens>>,
}

impl<T: TextBuffer + UndoManager + Default> Default for PlainEditor<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: TextBuffer + UndoManager> PlainEditor<T> {
    /// Create a new editor with the given buffer and a caret at the start.
    pub fn new(buffer: T) -> Self {
        Self {
            buffer,
            selection: Selection::default(),
            indent_unit: DEFAULT_INDENT_UNIT,
            tokens: OnceCell::new(),
        }
    }

    /// Set the number of columns `indent_line` adds or removes.
    pub fn with_indent_unit(mut self, indent_unit: usize) -> Self {
        self.indent_unit = indent_unit.max(1);
        self
    }

    /// Take the surface-side settings (the indent unit) from `options`.
    pub fn with_options(self, options: &EditorOptions) -> Self {
        self.with_indent_unit(options.indent_unit)
    }

    /// Get direct access to the inner buffer.
    pub fn inner(&self) -> &T {
        &self.buffer
    }

    /// The whole document.
    pub fn content_string(&self) -> String {
        self.buffer.to_string()
    }

    /// All lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        (0..self.buffer.len_lines())
            .map(|i| self.buffer.line(i).map(|l| l.to_string()).unwrap_or_default())
            .collect()
    }

    /// Token stream for every line, highlighting if the cache is cold.
    pub fn line_tokens(&self) -> &[LineTokens] {
        self.tokens.get_or_init(|| highlight(&self.lines()))
    }

    pub fn can_undo(&self) -> bool {
        self.buffer.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.buffer.can_redo()
    }

    fn clamp(&self, pos: Position) -> Position {
        let last = self.buffer.len_lines().saturating_sub(1);
        let line = pos.line.min(last);
        Position::new(line, pos.ch.min(self.buffer.line_len(line)))
    }

    fn to_offset(&self, pos: Position) -> usize {
        let pos = self.clamp(pos);
        self.buffer.line_to_char(pos.line) + pos.ch
    }

    fn to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.buffer.len_chars());
        let line = self.buffer.char_to_line(offset);
        Position::new(line, offset - self.buffer.line_to_char(line))
    }

    fn invalidate(&mut self) {
        self.tokens.take();
    }

    fn clamp_selection(&mut self) {
        self.selection = Selection::new(
            self.clamp(self.selection.anchor),
            self.clamp(self.selection.head),
        );
    }
}

impl PlainEditor<UndoableBuffer<EditorRope>> {
    /// Editor over a rope with 100 undo steps, the usual local setup.
    pub fn from_markdown(text: &str) -> Self {
        Self::new(UndoableBuffer::new(EditorRope::from_str(text), 100))
    }
}

impl<T: TextBuffer + UndoManager> MarkdownSurface for PlainEditor<T> {
    fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    fn line(&self, idx: usize) -> Option<SmolStr> {
        self.buffer.line(idx)
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = Selection::new(self.clamp(selection.anchor), self.clamp(selection.head));
    }

    fn replace_range(&mut self, from: Position, to: Position, text: &str) {
        let a = self.to_offset(from.min(to));
        let b = self.to_offset(from.max(to));
        let anchor = self.to_offset(self.selection.anchor);
        let head = self.to_offset(self.selection.head);

        self.buffer.replace(a..b, text);
        self.invalidate();

        let inserted = text.chars().count();
        let map = |p: usize| {
            if p < a {
                p
            } else if p <= b {
                a + inserted
            } else {
                p + inserted - (b - a)
            }
        };
        self.selection = Selection::new(self.to_position(map(anchor)), self.to_position(map(head)));
    }

    fn token_at(&self, pos: Position) -> Option<Token> {
        self.line_tokens().get(pos.line)?.token_at(pos.ch).cloned()
    }

    fn indent_line(&mut self, line: usize, direction: IndentDirection) {
        let Some(text) = self.buffer.line(line) else {
            return;
        };
        let (cols, chars) = leading_indent(&text);
        let target = match direction {
            IndentDirection::Add => cols + self.indent_unit,
            IndentDirection::Subtract => cols.saturating_sub(self.indent_unit),
        };
        if target == cols && chars == cols {
            return;
        }
        self.replace_range(
            Position::line_start(line),
            Position::new(line, chars),
            &" ".repeat(target),
        );
    }

    fn batch<F>(&mut self, f: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        self.buffer.begin_group();
        f(self);
        self.buffer.end_group();
    }

    fn undo(&mut self) -> bool {
        let done = self.buffer.undo();
        if done {
            self.invalidate();
            self.clamp_selection();
        }
        done
    }

    fn redo(&mut self) -> bool {
        let done = self.buffer.redo();
        if done {
            self.invalidate();
            self.clamp_selection();
        }
        done
    }
}
