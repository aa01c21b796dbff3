//! ATX heading level changes.

use crate::patterns::heading_prefix;
use crate::surface::MarkdownSurface;
use crate::types::Position;

/// Direction of a heading cycle step, named after the rendered text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingDirection {
    /// More `#`: none, 1, 2, .. 6, none.
    Smaller,
    /// Fewer `#`: none, 6, 5, .. 1, none.
    Bigger,
}

fn next_level(current: u8, direction: HeadingDirection) -> u8 {
    match (current, direction) {
        (0, HeadingDirection::Bigger) => 6,
        (0, HeadingDirection::Smaller) => 1,
        (6.., HeadingDirection::Smaller) => 0,
        (n, HeadingDirection::Bigger) => n - 1,
        (n, HeadingDirection::Smaller) => n + 1,
    }
}

/// Step the heading level of every selected line.
pub fn cycle_heading<S: MarkdownSurface>(surface: &mut S, direction: HeadingDirection) -> bool {
    rewrite_headings(surface, |current| next_level(current, direction))
}

/// Make every selected line a heading of `level`, or plain text if it
/// already is one.
pub fn set_heading<S: MarkdownSurface>(surface: &mut S, level: u8) -> bool {
    let level = level.clamp(1, 6);
    rewrite_headings(surface, |current| if current == level { 0 } else { level })
}

/// Replace the `#` prefix of each selected line with the one for the level
/// `to_level` picks. The rest of each line is left alone.
fn rewrite_headings<S, F>(surface: &mut S, to_level: F) -> bool
where
    S: MarkdownSurface,
    F: Fn(u8) -> u8,
{
    let lines = surface.selection().lines();
    surface.batch(|s| {
        for line in lines {
            let Some(text) = s.line(line) else {
                continue;
            };
            let prefix = heading_prefix(&text);
            let current = prefix.map_or(0, |p| p.level);
            let target = to_level(current);
            let replacement = match target {
                0 => String::new(),
                n => format!("{} ", "#".repeat(n as usize)),
            };
            let prefix_len = prefix.map_or(0, |p| p.len);
            s.replace_range(
                Position::line_start(line),
                Position::new(line, prefix_len),
                &replacement,
            );
        }
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PlainEditor;
    use crate::types::Selection;

    fn cycle(text: &str, direction: HeadingDirection, times: usize) -> Vec<String> {
        let mut editor = PlainEditor::from_markdown(text);
        let mut seen = Vec::new();
        for _ in 0..times {
            cycle_heading(&mut editor, direction);
            seen.push(editor.content_string());
        }
        seen
    }

    #[test]
    fn test_bigger_cycle() {
        assert_eq!(
            cycle("plain text", HeadingDirection::Bigger, 7),
            vec![
                "###### plain text",
                "##### plain text",
                "#### plain text",
                "### plain text",
                "## plain text",
                "# plain text",
                "plain text",
            ]
        );
    }

    #[test]
    fn test_smaller_cycle() {
        assert_eq!(
            cycle("plain text", HeadingDirection::Smaller, 7),
            vec![
                "# plain text",
                "## plain text",
                "### plain text",
                "#### plain text",
                "##### plain text",
                "###### plain text",
                "plain text",
            ]
        );
    }

    #[test]
    fn test_levels_past_six_count_as_six() {
        assert_eq!(
            cycle("######## deep", HeadingDirection::Smaller, 1),
            vec!["deep"]
        );
        assert_eq!(
            cycle("######## deep", HeadingDirection::Bigger, 1),
            vec!["##### deep"]
        );
    }

    #[test]
    fn test_applies_to_each_selected_line() {
        let mut editor = PlainEditor::from_markdown("a\n## b\n###### c");
        editor.set_selection(Selection::new(Position::new(0, 0), Position::new(2, 1)));
        cycle_heading(&mut editor, HeadingDirection::Smaller);
        assert_eq!(editor.content_string(), "# a\n### b\nc");
        assert!(editor.undo());
        assert_eq!(editor.content_string(), "a\n## b\n###### c");
    }

    #[test]
    fn test_caret_follows_text() {
        let mut editor = PlainEditor::from_markdown("## title");
        editor.set_selection(Selection::caret(Position::new(0, 5)));
        cycle_heading(&mut editor, HeadingDirection::Bigger);
        assert_eq!(editor.content_string(), "# title");
        assert_eq!(editor.selection(), Selection::caret(Position::new(0, 4)));
    }

    #[test]
    fn test_set_heading() {
        let mut editor = PlainEditor::from_markdown("title");
        set_heading(&mut editor, 2);
        assert_eq!(editor.content_string(), "## title");
        set_heading(&mut editor, 1);
        assert_eq!(editor.content_string(), "# title");
        set_heading(&mut editor, 1);
        assert_eq!(editor.content_string(), "title");
    }
}
