//! Stripping block markup from the selected lines.

use crate::patterns::clean_block_prefix;
use crate::surface::MarkdownSurface;
use crate::types::Position;

/// Strip one leading block marker run from every selected line.
///
/// A single left-anchored pass: `## > - item` loses `## ` only.
pub fn clean_block<S: MarkdownSurface>(surface: &mut S) -> bool {
    let lines = surface.selection().lines();
    surface.batch(|s| {
        for line in lines {
            let Some(text) = s.line(line) else {
                continue;
            };
            let len = clean_block_prefix(&text);
            if len > 0 {
                s.replace_range(Position::line_start(line), Position::new(line, len), "");
            }
        }
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PlainEditor;
    use crate::types::Selection;

    #[test]
    fn test_single_pass() {
        let mut editor = PlainEditor::from_markdown("## > - item");
        clean_block(&mut editor);
        assert_eq!(editor.content_string(), "> - item");
        clean_block(&mut editor);
        assert_eq!(editor.content_string(), "- item");
        clean_block(&mut editor);
        assert_eq!(editor.content_string(), "item");
        clean_block(&mut editor);
        assert_eq!(editor.content_string(), "item");
    }

    #[test]
    fn test_every_selected_line() {
        let mut editor = PlainEditor::from_markdown("# a\n  * b\n1) c\nkeep\n> d");
        editor.set_selection(Selection::new(Position::new(0, 0), Position::new(3, 0)));
        clean_block(&mut editor);
        assert_eq!(editor.content_string(), "a\nb\nc\nkeep\n> d");
    }
}
