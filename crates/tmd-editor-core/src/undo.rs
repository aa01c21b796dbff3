//! Grouped undo history over a `TextBuffer`.
//!
//! Formatting actions often touch several places at once (both fences of a
//! code block, every line of a list). `UndoableBuffer` records each buffer
//! mutation as an `Edit` and lets the surface bracket an action with
//! `begin_group`/`end_group` so the whole action undoes as one step.

use std::collections::VecDeque;
use std::ops::Range;

use smol_str::{SmolStr, ToSmolStr};

use crate::text::TextBuffer;

/// Undo capability of a buffer.
///
/// `undo` and `redo` apply the change and report whether there was one.
pub trait UndoManager {
    fn can_undo(&self) -> bool;

    fn can_redo(&self) -> bool;

    fn undo(&mut self) -> bool;

    fn redo(&mut self) -> bool;

    /// Forget all history in both directions.
    fn clear_history(&mut self);

    /// Start collecting edits into a single undo step. Groups nest; only the
    /// outermost `end_group` closes the step.
    fn begin_group(&mut self);

    fn end_group(&mut self);
}

/// One replacement at a char offset.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    at: usize,
    removed: SmolStr,
    inserted: SmolStr,
}

impl Edit {
    /// The edit that takes the buffer back.
    fn inverse(&self) -> Self {
        Self {
            at: self.at,
            removed: self.inserted.clone(),
            inserted: self.removed.clone(),
        }
    }

    fn apply<T: TextBuffer>(&self, buffer: &mut T) {
        let end = self.at + self.removed.chars().count();
        buffer.replace(self.at..end, &self.inserted);
    }
}

type Step = Vec<Edit>;

/// A `TextBuffer` that records its edits for undo and redo.
///
/// History is bounded: past `max_steps`, the oldest step is dropped.
#[derive(Clone)]
pub struct UndoableBuffer<T> {
    buffer: T,
    done: VecDeque<Step>,
    undone: Vec<Step>,
    pending: Step,
    depth: usize,
    max_steps: usize,
}

impl<T: TextBuffer + Default> Default for UndoableBuffer<T> {
    fn default() -> Self {
        Self::new(T::default(), 100)
    }
}

impl<T: TextBuffer> UndoableBuffer<T> {
    pub fn new(buffer: T, max_steps: usize) -> Self {
        Self {
            buffer,
            done: VecDeque::new(),
            undone: Vec::new(),
            pending: Vec::new(),
            depth: 0,
            max_steps: max_steps.max(1),
        }
    }

    /// The wrapped buffer.
    pub fn inner(&self) -> &T {
        &self.buffer
    }

    fn record(&mut self, edit: Edit) {
        self.undone.clear();
        self.pending.push(edit);
        if self.depth == 0 {
            self.commit();
        }
    }

    fn commit(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        self.done.push_back(std::mem::take(&mut self.pending));
        if self.done.len() > self.max_steps {
            self.done.pop_front();
        }
    }
}

impl<T: TextBuffer> TextBuffer for UndoableBuffer<T> {
    fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    fn len_lines(&self) -> usize {
        self.buffer.len_lines()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.replace(char_offset..char_offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        self.replace(char_range, "");
    }

    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        let len = self.buffer.len_chars();
        let start = char_range.start.min(len);
        let end = char_range.end.clamp(start, len);
        let Some(removed) = self.buffer.slice(start..end) else {
            return;
        };
        if removed.is_empty() && text.is_empty() {
            return;
        }
        self.buffer.replace(start..end, text);
        self.record(Edit {
            at: start,
            removed,
            inserted: text.to_smolstr(),
        });
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        self.buffer.slice(char_range)
    }

    fn to_string(&self) -> String {
        self.buffer.to_string()
    }

    fn line_to_char(&self, line: usize) -> usize {
        self.buffer.line_to_char(line)
    }

    fn char_to_line(&self, char_offset: usize) -> usize {
        self.buffer.char_to_line(char_offset)
    }
}

impl<T: TextBuffer> UndoManager for UndoableBuffer<T> {
    fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    fn undo(&mut self) -> bool {
        let Some(step) = self.done.pop_back() else {
            return false;
        };
        for edit in step.iter().rev() {
            edit.inverse().apply(&mut self.buffer);
        }
        self.undone.push(step);
        true
    }

    fn redo(&mut self) -> bool {
        let Some(step) = self.undone.pop() else {
            return false;
        };
        for edit in &step {
            edit.apply(&mut self.buffer);
        }
        self.done.push_back(step);
        true
    }

    fn clear_history(&mut self) {
        self.done.clear();
        self.undone.clear();
    }

    fn begin_group(&mut self) {
        self.depth += 1;
    }

    fn end_group(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        if self.depth == 0 {
            self.commit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditorRope;

    fn buffer(text: &str) -> UndoableBuffer<EditorRope> {
        UndoableBuffer::new(EditorRope::from_str(text), 100)
    }

    #[test]
    fn test_wrap_undo_redo() {
        let mut buf = buffer("make bold");
        buf.replace(5..9, "**bold**");
        assert_eq!(buf.to_string(), "make **bold**");
        assert!(buf.can_undo());

        assert!(buf.undo());
        assert_eq!(buf.to_string(), "make bold");
        assert!(!buf.can_undo());
        assert!(buf.can_redo());

        assert!(buf.redo());
        assert_eq!(buf.to_string(), "make **bold**");
        assert!(!buf.can_redo());
    }

    #[test]
    fn test_ungrouped_edits_are_separate_steps() {
        let mut buf = buffer("item");
        buf.insert(0, "- ");
        buf.insert(0, "  ");
        assert_eq!(buf.to_string(), "  - item");

        assert!(buf.undo());
        assert_eq!(buf.to_string(), "- item");
        assert!(buf.undo());
        assert_eq!(buf.to_string(), "item");
    }

    #[test]
    fn test_fence_removal_undoes_as_one_step() {
        let mut buf = buffer("```\ncode\n```");
        buf.begin_group();
        buf.delete(8..12);
        buf.delete(0..4);
        buf.end_group();
        assert_eq!(buf.to_string(), "code");

        assert!(buf.undo());
        assert_eq!(buf.to_string(), "```\ncode\n```");
        assert!(!buf.can_undo());

        assert!(buf.redo());
        assert_eq!(buf.to_string(), "code");
    }

    #[test]
    fn test_nested_groups_collapse() {
        let mut buf = buffer("a\nb");
        buf.begin_group();
        buf.insert(2, "> ");
        buf.begin_group();
        buf.insert(0, "> ");
        buf.end_group();
        assert!(!buf.can_undo());
        buf.end_group();
        assert_eq!(buf.to_string(), "> a\n> b");

        assert!(buf.undo());
        assert_eq!(buf.to_string(), "a\nb");
        assert!(!buf.undo());
    }

    #[test]
    fn test_no_op_edits_record_nothing() {
        let mut buf = buffer("x");
        buf.begin_group();
        buf.end_group();
        buf.replace(1..1, "");
        buf.delete(0..0);
        assert!(!buf.can_undo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut buf = buffer("# a");
        buf.insert(0, "#");
        assert!(buf.undo());
        assert!(buf.can_redo());

        buf.delete(0..2);
        assert!(!buf.can_redo());
        assert_eq!(buf.to_string(), "a");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut buf = UndoableBuffer::new(EditorRope::from_str(""), 3);
        for (i, c) in ["a", "b", "c", "d"].into_iter().enumerate() {
            buf.insert(i, c);
        }
        assert_eq!(buf.to_string(), "abcd");

        assert!(buf.undo());
        assert!(buf.undo());
        assert!(buf.undo());
        assert!(!buf.undo());
        assert_eq!(buf.to_string(), "a");
    }
}
