//! Formatting actions: text surgery on the Markdown source.
//!
//! Every action reads the current selection and tokens from the surface,
//! edits the smallest region it can, and leaves the selection on the text
//! the user was working with. Multi-edit actions run inside
//! `MarkdownSurface::batch` so they undo as one step.

mod clean;
mod code_block;
mod heading;
mod inline;
mod line_prefix;
mod markup;

use std::ops::Range;

pub use clean::clean_block;
pub use code_block::{DEFAULT_FENCE, indented_block_bounds, toggle_code_block};
pub use heading::{HeadingDirection, cycle_heading, set_heading};
pub use inline::{InlineStyle, toggle_inline};
pub use line_prefix::{LinePrefix, toggle_line_prefix};
pub use markup::{DEFAULT_URL, MarkupTemplate, URL_PLACEHOLDER, insert_markup};

use crate::surface::MarkdownSurface;
use crate::types::{Position, Selection};

fn line_chars<S: MarkdownSurface + ?Sized>(surface: &S, line: usize) -> Vec<char> {
    surface
        .line(line)
        .map(|text| text.chars().collect())
        .unwrap_or_default()
}

fn is_blank_line<S: MarkdownSurface + ?Sized>(surface: &S, line: usize) -> bool {
    surface
        .line(line)
        .is_none_or(|text| text.chars().all(char::is_whitespace))
}

/// Char index of the first occurrence of `needle` in `haystack[from..]`.
fn find_chars(haystack: &[char], needle: &str, from: usize) -> Option<usize> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == needle[..])
}

/// Char index of the last occurrence of `needle` ending at or before `until`.
fn rfind_chars(haystack: &[char], needle: &str, until: usize) -> Option<usize> {
    let needle: Vec<char> = needle.chars().collect();
    let until = until.min(haystack.len());
    if needle.is_empty() || until < needle.len() {
        return None;
    }
    (0..=until - needle.len())
        .rev()
        .find(|&i| haystack[i..i + needle.len()] == needle[..])
}

/// Remove an opening marker and, when present, its closing partner from one
/// line, closing side first, and move the selection with the text.
fn strip_pair<S: MarkdownSurface>(
    surface: &mut S,
    line: usize,
    open: Range<usize>,
    close: Option<Range<usize>>,
) {
    let sel = surface.selection();
    let map = |p: Position| {
        if p.line != line {
            return p;
        }
        let mut ch = p.ch;
        for range in close.iter().chain(std::iter::once(&open)) {
            if ch >= range.end {
                ch -= range.len();
            } else if ch > range.start {
                ch = range.start;
            }
        }
        Position::new(line, ch)
    };
    let mapped = Selection::new(map(sel.anchor), map(sel.head));

    surface.batch(|s| {
        if let Some(close) = &close {
            s.replace_range(
                Position::new(line, close.start),
                Position::new(line, close.end),
                "",
            );
        }
        s.replace_range(
            Position::new(line, open.start),
            Position::new(line, open.end),
            "",
        );
    });
    surface.set_selection(mapped);
}

/// Replace the selection with `prefix + text + suffix` and select `text`.
///
/// A caret stays a caret, placed after `prefix`. The selection end only
/// shifts when it shares the start line and `text` is single-line.
fn wrap_selection<S: MarkdownSurface>(surface: &mut S, prefix: &str, text: &str, suffix: &str) {
    let sel = surface.selection();
    let (start, end) = (sel.start(), sel.end());
    let prefix_len = prefix.chars().count();
    let new_start = start.shifted_right(prefix_len);
    let new_end = if text.contains('\n') || end.line != start.line {
        end
    } else {
        new_start.shifted_right(text.chars().count())
    };

    surface.replace_range(start, end, &format!("{prefix}{text}{suffix}"));
    surface.set_selection(sel.remapped(new_start, new_end));
}

/// Text covered by the selection, lines joined with `\n`.
fn selected_text<S: MarkdownSurface + ?Sized>(surface: &S, sel: Selection) -> String {
    let (start, end) = (sel.start(), sel.end());
    let mut out = String::new();
    for line in start.line..=end.line {
        let chars = line_chars(surface, line);
        let from = if line == start.line { start.ch.min(chars.len()) } else { 0 };
        let to = if line == end.line { end.ch.min(chars.len()) } else { chars.len() };
        if line != start.line {
            out.push('\n');
        }
        out.extend(&chars[from..to.max(from)]);
    }
    out
}
