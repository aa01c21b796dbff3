//! Property-based tests for the formatting toggles
//!
//! - Line-prefix and heading toggles come back to the starting text
//! - Wrapping a word (or a caret) in emphasis and toggling again restores it
//! - Every action undoes in a single step, whatever the input

use proptest::prelude::*;
use tmd_editor_core::format::{HeadingDirection, InlineStyle, LinePrefix};
use tmd_editor_core::format::{cycle_heading, toggle_inline, toggle_line_prefix};
use tmd_editor_core::{
    EditorAction, EditorOptions, EditorRope, MarkdownSurface, PlainEditor, Position, Selection,
    UndoableBuffer, execute_action,
};

type TestEditor = PlainEditor<UndoableBuffer<EditorRope>>;

fn select_all(editor: &mut TestEditor) {
    let last = editor.line_count() - 1;
    let end = Position::new(last, editor.line_len(last));
    editor.set_selection(Selection::new(Position::new(0, 0), end));
}

/// Plain lines: letters and spaces, optionally indented
fn plain_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[a-z][a-z ]{0,15}", "  [a-z][a-z ]{0,10}", Just(String::new()),]
}

/// Lines covering the block and inline constructs the actions look at
fn markdown_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{0,12}",
        Just("**bold** and *em*".to_string()),
        Just("~~gone~~".to_string()),
        Just("- item".to_string()),
        Just("1. first".to_string()),
        Just("> quoted".to_string()),
        Just("## heading".to_string()),
        Just("```".to_string()),
        Just("~~~".to_string()),
        Just("    indented code".to_string()),
        Just("a `code` span".to_string()),
        Just("[link](http://x) and ![img](y.png)".to_string()),
        Just(String::new()),
    ]
}

fn action_strategy() -> impl Strategy<Value = EditorAction> {
    prop::sample::select(
        EditorAction::ALL
            .into_iter()
            .filter(|a| !matches!(a, EditorAction::Undo | EditorAction::Redo))
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #[test]
    fn test_line_prefix_toggle_is_involutive(
        lines in prop::collection::vec(plain_line_strategy(), 1..6),
        kind in prop::sample::select(vec![
            LinePrefix::Quote,
            LinePrefix::UnorderedList,
            LinePrefix::OrderedList,
        ]),
    ) {
        let source = lines.join("\n");
        let mut editor = PlainEditor::from_markdown(&source);
        select_all(&mut editor);
        toggle_line_prefix(&mut editor, kind);
        prop_assert_ne!(editor.content_string(), source.clone());

        select_all(&mut editor);
        toggle_line_prefix(&mut editor, kind);
        prop_assert_eq!(editor.content_string(), source);
    }

    #[test]
    fn test_heading_cycle_has_period_seven(
        line in "[a-z][a-z ]{0,15}",
        bigger in any::<bool>(),
    ) {
        let direction = if bigger { HeadingDirection::Bigger } else { HeadingDirection::Smaller };
        let mut editor = PlainEditor::from_markdown(&line);
        for _ in 0..6 {
            cycle_heading(&mut editor, direction);
            prop_assert!(editor.content_string().starts_with('#'));
        }
        cycle_heading(&mut editor, direction);
        prop_assert_eq!(editor.content_string(), line);
    }

    #[test]
    fn test_emphasis_wrap_round_trip(
        before in "[a-z]{1,8}",
        word in "[a-z]{1,8}",
        after in "[a-z]{1,8}",
        style in prop::sample::select(vec![
            InlineStyle::Bold,
            InlineStyle::Italic,
            InlineStyle::Strikethrough,
        ]),
    ) {
        let source = format!("{before} {word} {after}");
        let start = before.len() + 1;
        let mut editor = PlainEditor::from_markdown(&source);
        editor.set_selection(Selection::new(
            Position::new(0, start),
            Position::new(0, start + word.len()),
        ));

        prop_assert!(toggle_inline(&mut editor, style));
        let marker = style.marker();
        prop_assert_eq!(editor.content_string(), format!("{before} {marker}{word}{marker} {after}"));

        prop_assert!(toggle_inline(&mut editor, style));
        prop_assert_eq!(editor.content_string(), source);
        prop_assert_eq!(
            editor.selection(),
            Selection::new(Position::new(0, start), Position::new(0, start + word.len()))
        );
    }

    #[test]
    fn test_emphasis_caret_round_trip(
        word in "[a-z]{1,12}",
        at in 0usize..13,
        style in prop::sample::select(vec![
            InlineStyle::Bold,
            InlineStyle::Italic,
            InlineStyle::Strikethrough,
        ]),
    ) {
        let at = at.min(word.len());
        let caret = Selection::caret(Position::new(0, at));
        let mut editor = PlainEditor::from_markdown(&word);
        editor.set_selection(caret);

        prop_assert!(toggle_inline(&mut editor, style));
        let marker = style.marker();
        prop_assert_eq!(
            editor.content_string(),
            format!("{}{marker}{marker}{}", &word[..at], &word[at..])
        );

        prop_assert!(toggle_inline(&mut editor, style));
        prop_assert_eq!(editor.content_string(), word);
        prop_assert_eq!(editor.selection(), caret);
    }

    #[test]
    fn test_every_action_undoes_in_one_step(
        lines in prop::collection::vec(markdown_line_strategy(), 1..7),
        anchor in (0usize..8, 0usize..20),
        head in (0usize..8, 0usize..20),
        action in action_strategy(),
    ) {
        let source = lines.join("\n");
        let mut editor = PlainEditor::from_markdown(&source);
        editor.set_selection(Selection::new(
            Position::new(anchor.0, anchor.1),
            Position::new(head.0, head.1),
        ));

        let changed = execute_action(&mut editor, &action, &EditorOptions::default());
        if editor.content_string() != source {
            prop_assert!(changed, "{} edited without reporting it", action);
            prop_assert!(editor.undo());
            prop_assert_eq!(editor.content_string(), source);
        }
    }
}
