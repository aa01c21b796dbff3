//! Per-line quote and list marker toggles.

use std::ops::Range;

use crate::patterns::{ordered_marker, quote_marker, unordered_marker};
use crate::surface::MarkdownSurface;
use crate::types::{Position, leading_indent};

/// Block markers toggled per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinePrefix {
    Quote,
    UnorderedList,
    OrderedList,
}

impl LinePrefix {
    /// Marker inserted on lines that don't carry one.
    pub fn marker(self) -> &'static str {
        match self {
            LinePrefix::Quote => "> ",
            LinePrefix::UnorderedList => "- ",
            LinePrefix::OrderedList => "1. ",
        }
    }

    /// Char range of an existing marker, after any indentation.
    pub fn find(self, line: &str) -> Option<Range<usize>> {
        match self {
            LinePrefix::Quote => quote_marker(line),
            LinePrefix::UnorderedList => unordered_marker(line),
            LinePrefix::OrderedList => ordered_marker(line),
        }
    }
}

/// Toggle a block marker on every selected line.
///
/// Lines are decided independently: a line with the marker loses it, a line
/// without gains it after its indentation. Ordered items are not renumbered.
pub fn toggle_line_prefix<S: MarkdownSurface>(surface: &mut S, kind: LinePrefix) -> bool {
    let lines = surface.selection().lines();
    surface.batch(|s| {
        for line in lines {
            let Some(text) = s.line(line) else {
                continue;
            };
            match kind.find(&text) {
                Some(marker) => s.replace_range(
                    Position::new(line, marker.start),
                    Position::new(line, marker.end),
                    "",
                ),
                None => {
                    let (_, indent) = leading_indent(&text);
                    let at = Position::new(line, indent);
                    s.replace_range(at, at, kind.marker());
                }
            }
        }
    });
    true
}
