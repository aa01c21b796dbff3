//! Template insertions and link or image unwrapping.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::surface::MarkdownSurface;
use crate::types::{Position, Selection};

use super::{selected_text, wrap_selection};

/// Placeholder in a template suffix replaced by the caller's URL.
pub const URL_PLACEHOLDER: &str = "#url#";

/// URL inserted by link and image actions unless configured otherwise.
pub const DEFAULT_URL: &str = "http://";

/// `[label](target)` or `![label](target)` with a bracket-free label.
static LINK_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\[\]]*)\]\([^()]*\)").unwrap());

/// Text placed around the selection by an insertion action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupTemplate {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl MarkupTemplate {
    pub const LINK: Self = Self {
        prefix: "[",
        suffix: "](#url#)",
    };

    pub const IMAGE: Self = Self {
        prefix: "![",
        suffix: "](#url#)",
    };

    pub const HORIZONTAL_RULE: Self = Self {
        prefix: "",
        suffix: "\n\n-----\n\n",
    };

    pub const TABLE: Self = Self {
        prefix: "",
        suffix: "\n\n| Column 1 | Column 2 | Column 3 |\n| -------- | -------- | -------- |\n| Text     | Text     | Text     |\n\n",
    };

    fn is_image(&self) -> bool {
        self.prefix == "!["
    }
}

/// Insert markup around the selection, or remove it when `active`.
///
/// When active, the innermost link or image span (matching the template
/// kind) on the selection's start line that contains the selection start is
/// replaced by its label. Otherwise the selection is wrapped, `#url#` in the
/// suffix becomes `url`, and the originally selected text stays selected.
pub fn insert_markup<S: MarkdownSurface>(
    surface: &mut S,
    template: &MarkupTemplate,
    url: &str,
    active: bool,
) -> bool {
    if active {
        if unwrap_span(surface, template) {
            return true;
        }
        tracing::debug!(target: "tmd::action", prefix = template.prefix, "no span to unwrap");
        return false;
    }

    let text = selected_text(surface, surface.selection());
    let suffix = template.suffix.replace(URL_PLACEHOLDER, url);
    wrap_selection(surface, template.prefix, &text, &suffix);
    true
}

struct Span {
    whole: Range<usize>,
    label: Range<usize>,
}

fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

fn spans(text: &str, image: bool) -> Vec<Span> {
    LINK_SPAN
        .captures_iter(text)
        .filter(|caps| caps.get(1).is_some_and(|bang| bang.is_empty() != image))
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let label = caps.get(2)?;
            Some(Span {
                whole: char_offset(text, whole.start())..char_offset(text, whole.end()),
                label: char_offset(text, label.start())..char_offset(text, label.end()),
            })
        })
        .collect()
}

fn unwrap_span<S: MarkdownSurface>(surface: &mut S, template: &MarkupTemplate) -> bool {
    let sel = surface.selection();
    let start = sel.start();
    let Some(text) = surface.line(start.line) else {
        return false;
    };
    let Some(span) = spans(&text, template.is_image())
        .into_iter()
        .filter(|s| s.whole.start <= start.ch && start.ch <= s.whole.end)
        .min_by_key(|s| s.whole.len())
    else {
        return false;
    };

    let label: String = text
        .chars()
        .skip(span.label.start)
        .take(span.label.len())
        .collect();
    let open_len = span.label.start - span.whole.start;
    let removed = span.whole.len() - span.label.len();
    let map = |p: Position| {
        if p.line != start.line || p.ch <= span.whole.start {
            p
        } else if p.ch >= span.whole.end {
            p.shifted_left(removed)
        } else {
            let ch = p.ch.saturating_sub(open_len).max(span.whole.start);
            Position::new(p.line, ch.min(span.whole.start + span.label.len()))
        }
    };
    let mapped = Selection::new(map(sel.anchor), map(sel.head));

    surface.replace_range(
        Position::new(start.line, span.whole.start),
        Position::new(start.line, span.whole.end),
        &label,
    );
    surface.set_selection(mapped);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::classify_at_cursor;
    use crate::surface::PlainEditor;

    fn pos(line: usize, ch: usize) -> Position {
        Position::new(line, ch)
    }

    #[test]
    fn test_wrap_link() {
        let mut editor = PlainEditor::from_markdown("see docs here");
        editor.set_selection(Selection::new(pos(0, 4), pos(0, 8)));
        assert!(insert_markup(&mut editor, &MarkupTemplate::LINK, DEFAULT_URL, false));
        assert_eq!(editor.content_string(), "see [docs](http://) here");
        assert_eq!(editor.selection(), Selection::new(pos(0, 5), pos(0, 9)));
        assert!(classify_at_cursor(&editor).link);
    }

    #[test]
    fn test_wrap_image_with_caret() {
        let mut editor = PlainEditor::from_markdown("");
        insert_markup(&mut editor, &MarkupTemplate::IMAGE, "a.png", false);
        assert_eq!(editor.content_string(), "![](a.png)");
        assert_eq!(editor.selection(), Selection::caret(pos(0, 2)));
        assert!(classify_at_cursor(&editor).image);
    }

    #[test]
    fn test_unwrap_link_keeps_label() {
        let mut editor = PlainEditor::from_markdown("a [docs](http://x) b");
        editor.set_selection(Selection::new(pos(0, 3), pos(0, 7)));
        assert!(insert_markup(&mut editor, &MarkupTemplate::LINK, DEFAULT_URL, true));
        assert_eq!(editor.content_string(), "a docs b");
        assert_eq!(editor.selection(), Selection::new(pos(0, 2), pos(0, 6)));
    }

    #[test]
    fn test_unwrap_picks_innermost_of_matching_kind() {
        let mut editor = PlainEditor::from_markdown("[![pic](p.png)](http://x)");
        editor.set_selection(Selection::caret(pos(0, 4)));
        insert_markup(&mut editor, &MarkupTemplate::IMAGE, DEFAULT_URL, true);
        assert_eq!(editor.content_string(), "[pic](http://x)");
        assert_eq!(editor.selection(), Selection::caret(pos(0, 2)));
    }

    #[test]
    fn test_unwrap_without_span_is_a_no_op() {
        let mut editor = PlainEditor::from_markdown("[dangling");
        editor.set_selection(Selection::caret(pos(0, 3)));
        assert!(!insert_markup(&mut editor, &MarkupTemplate::LINK, DEFAULT_URL, true));
        assert_eq!(editor.content_string(), "[dangling");
    }

    #[test]
    fn test_horizontal_rule_and_table() {
        let mut editor = PlainEditor::from_markdown("above");
        editor.set_selection(Selection::caret(pos(0, 5)));
        insert_markup(&mut editor, &MarkupTemplate::HORIZONTAL_RULE, DEFAULT_URL, false);
        assert_eq!(editor.content_string(), "above\n\n-----\n\n");
        assert_eq!(editor.selection(), Selection::caret(pos(0, 5)));

        let mut editor = PlainEditor::from_markdown("");
        insert_markup(&mut editor, &MarkupTemplate::TABLE, DEFAULT_URL, false);
        assert_eq!(editor.lines()[2], "| Column 1 | Column 2 | Column 3 |");
        assert_eq!(editor.line_count(), 7);
    }
}
