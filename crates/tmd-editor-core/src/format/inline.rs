//! Emphasis toggles driven by marker pairs.

use crate::state::{TextState, classify_at_cursor};
use crate::surface::MarkdownSurface;

use super::{find_chars, line_chars, rfind_chars, selected_text, strip_pair, wrap_selection};

/// Inline emphasis constructs toggled by marker pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineStyle {
    Bold,
    Italic,
    Strikethrough,
}

impl InlineStyle {
    /// Marker inserted when wrapping.
    pub fn marker(self) -> &'static str {
        match self {
            InlineStyle::Bold => "**",
            InlineStyle::Italic => "*",
            InlineStyle::Strikethrough => "~~",
        }
    }

    /// Every marker spelling recognized when unwrapping or stripping.
    fn spellings(self) -> &'static [&'static str] {
        match self {
            InlineStyle::Bold => &["**", "__"],
            InlineStyle::Italic => &["*", "_"],
            InlineStyle::Strikethrough => &["~~"],
        }
    }

    fn is_active(self, state: &TextState) -> bool {
        match self {
            InlineStyle::Bold => state.bold,
            InlineStyle::Italic => state.italic,
            InlineStyle::Strikethrough => state.strikethrough,
        }
    }
}

/// Toggle an inline emphasis around the selection.
///
/// Only single-line selections are handled; a selection spanning lines is
/// ignored and returns `false`.
pub fn toggle_inline<S: MarkdownSurface>(surface: &mut S, style: InlineStyle) -> bool {
    let sel = surface.selection();
    if !sel.is_single_line() {
        tracing::debug!(target: "tmd::action", ?style, "multi-line inline toggle ignored");
        return false;
    }

    if style.is_active(&classify_at_cursor(surface)) {
        if unwrap_enclosing(surface, style) {
            return true;
        }
        tracing::debug!(target: "tmd::action", ?style, "no enclosing markers, wrapping instead");
    }

    let mut text = selected_text(surface, sel);
    for spelling in style.spellings() {
        text = text.replace(spelling, "");
    }
    let marker = style.marker();
    wrap_selection(surface, marker, &text, marker);
    true
}

/// Remove the innermost marker pair around the selection start: the last
/// marker before it and the first at or after it on the same line.
fn unwrap_enclosing<S: MarkdownSurface>(surface: &mut S, style: InlineStyle) -> bool {
    let start = surface.selection().start();
    let chars = line_chars(surface, start.line);
    let at = start.ch.min(chars.len());

    let open = style
        .spellings()
        .iter()
        .filter_map(|m| rfind_chars(&chars, m, at).map(|i| i..i + m.chars().count()))
        .max_by_key(|r| r.start);
    let close = style
        .spellings()
        .iter()
        .filter_map(|m| find_chars(&chars, m, at).map(|i| i..i + m.chars().count()))
        .min_by_key(|r| r.start);

    let (Some(open), Some(close)) = (open, close) else {
        return false;
    };
    strip_pair(surface, start.line, open, Some(close));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::classify_at_cursor;
    use crate::surface::PlainEditor;
    use crate::types::{Position, Selection};

    fn pos(line: usize, ch: usize) -> Position {
        Position::new(line, ch)
    }

    fn editor_with(content: &str, sel: Selection) -> PlainEditor<crate::UndoableBuffer<crate::EditorRope>> {
        let mut editor = PlainEditor::from_markdown(content);
        editor.set_selection(sel);
        editor
    }

    #[test]
    fn test_wrap_selection_in_bold() {
        let mut editor = editor_with("make this bold", Selection::new(pos(0, 10), pos(0, 14)));
        assert!(toggle_inline(&mut editor, InlineStyle::Bold));
        assert_eq!(editor.content_string(), "make this **bold**");
        assert_eq!(editor.selection(), Selection::new(pos(0, 12), pos(0, 16)));
        assert!(classify_at_cursor(&editor).bold);
    }

    #[test]
    fn test_unwrap_bold_round_trip() {
        let mut editor = editor_with("make this bold", Selection::new(pos(0, 10), pos(0, 14)));
        toggle_inline(&mut editor, InlineStyle::Bold);
        assert!(toggle_inline(&mut editor, InlineStyle::Bold));
        assert_eq!(editor.content_string(), "make this bold");
        assert_eq!(editor.selection(), Selection::new(pos(0, 10), pos(0, 14)));
    }

    #[test]
    fn test_caret_toggle_leaves_caret_between_markers() {
        let mut editor = editor_with("x ", Selection::caret(pos(0, 2)));
        toggle_inline(&mut editor, InlineStyle::Strikethrough);
        assert_eq!(editor.content_string(), "x ~~~~");
        assert_eq!(editor.selection(), Selection::caret(pos(0, 4)));
        assert!(classify_at_cursor(&editor).strikethrough);

        toggle_inline(&mut editor, InlineStyle::Strikethrough);
        assert_eq!(editor.content_string(), "x ");
        assert_eq!(editor.selection(), Selection::caret(pos(0, 2)));
    }

    #[test]
    fn test_italic_caret_toggle_round_trip() {
        let mut editor = editor_with("hello", Selection::caret(pos(0, 2)));
        assert!(toggle_inline(&mut editor, InlineStyle::Italic));
        assert_eq!(editor.content_string(), "he**llo");
        assert_eq!(editor.selection(), Selection::caret(pos(0, 3)));
        let state = classify_at_cursor(&editor);
        assert!(state.italic);
        assert!(!state.bold);

        assert!(toggle_inline(&mut editor, InlineStyle::Italic));
        assert_eq!(editor.content_string(), "hello");
        assert_eq!(editor.selection(), Selection::caret(pos(0, 2)));
    }

    #[test]
    fn test_bold_caret_toggle_round_trip() {
        let mut editor = editor_with("hello", Selection::caret(pos(0, 2)));
        toggle_inline(&mut editor, InlineStyle::Bold);
        assert_eq!(editor.content_string(), "he****llo");
        assert!(!classify_at_cursor(&editor).italic);

        toggle_inline(&mut editor, InlineStyle::Bold);
        assert_eq!(editor.content_string(), "hello");
    }

    #[test]
    fn test_wrap_strips_inner_markers() {
        let mut editor = editor_with("a *b* c", Selection::new(pos(0, 0), pos(0, 7)));
        // The selection starts outside the emphasis, so this wraps.
        toggle_inline(&mut editor, InlineStyle::Italic);
        assert_eq!(editor.content_string(), "*a b c*");
        assert_eq!(editor.selection(), Selection::new(pos(0, 1), pos(0, 6)));
    }

    #[test]
    fn test_unwrap_innermost_pair_only() {
        // Caret on "b" inside italic inside bold.
        let mut editor = editor_with("**a *b* c**", Selection::caret(pos(0, 6)));
        toggle_inline(&mut editor, InlineStyle::Italic);
        assert_eq!(editor.content_string(), "**a b c**");
        assert_eq!(editor.selection(), Selection::caret(pos(0, 5)));
    }

    #[test]
    fn test_unwrap_underscore_spelling() {
        let mut editor = editor_with("__strong__", Selection::caret(pos(0, 4)));
        toggle_inline(&mut editor, InlineStyle::Bold);
        assert_eq!(editor.content_string(), "strong");
        assert_eq!(editor.selection(), Selection::caret(pos(0, 2)));
    }

    #[test]
    fn test_backwards_selection_keeps_direction() {
        let mut editor = editor_with("word", Selection::new(pos(0, 4), pos(0, 0)));
        toggle_inline(&mut editor, InlineStyle::Bold);
        assert_eq!(editor.content_string(), "**word**");
        assert_eq!(editor.selection(), Selection::new(pos(0, 6), pos(0, 2)));
    }

    #[test]
    fn test_multi_line_selection_is_ignored() {
        let mut editor = editor_with("one\ntwo", Selection::new(pos(0, 1), pos(1, 1)));
        assert!(!toggle_inline(&mut editor, InlineStyle::Bold));
        assert_eq!(editor.content_string(), "one\ntwo");
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_toggle_is_one_undo_step() {
        let mut editor = editor_with("**x**", Selection::caret(pos(0, 3)));
        toggle_inline(&mut editor, InlineStyle::Bold);
        assert_eq!(editor.content_string(), "x");
        assert!(editor.undo());
        assert_eq!(editor.content_string(), "**x**");
    }
}
