//! Code span and code block toggling.

use crate::code_type::{CodeType, fence_run, is_fence_line, resolve_code_type, resolve_code_type_at};
use crate::style::StyleSet;
use crate::surface::MarkdownSurface;
use crate::types::{IndentDirection, Position, Selection};

use super::{is_blank_line, line_chars, selected_text, strip_pair, wrap_selection};

/// Fence run used for new fenced blocks unless configured otherwise.
pub const DEFAULT_FENCE: &str = "```";

/// Toggle code at the selection.
///
/// What happens depends on the code type at the selection start:
/// - inline code loses the backticks around the caret;
/// - in a fenced block, a selection is fenced off (or back in) against the
///   surrounding fence, and a caret removes the block's two fence lines;
/// - in an indented block, the block (or the selected lines) is outdented;
/// - outside code, whole lines get a new fenced block and anything else is
///   wrapped in single backticks.
pub fn toggle_code_block<S: MarkdownSurface>(surface: &mut S, fence_chars: &str) -> bool {
    let sel = surface.selection();
    let start = sel.start();
    // Position 0 is a caret slot, not a character; read the first char.
    let sample = Position::new(start.line, start.ch.max(1));
    let code_type = resolve_code_type_at(surface, sample);
    tracing::debug!(target: "tmd::action", ?code_type, caret = sel.is_caret(), "toggle code block");

    match code_type {
        CodeType::Single => unwrap_inline_code(surface, sample),
        CodeType::Fenced if !sel.is_caret() => refence_selection(surface, sel, fence_chars),
        CodeType::Fenced => unfence_block(surface, start.line),
        CodeType::Indented => outdent_block(surface, sel),
        CodeType::None => insert_code(surface, sel, fence_chars),
    }
}

/// Strip the backtick runs of the code span sampled at `at`. An unclosed
/// span only loses its opening run.
fn unwrap_inline_code<S: MarkdownSurface>(surface: &mut S, at: Position) -> bool {
    let Some(span) = surface
        .token_at(at)
        .filter(|t| t.styles.contains(StyleSet::INLINE_CODE))
    else {
        return false;
    };
    let chars = line_chars(surface, at.line);
    let span = span.start.min(chars.len())..span.end.min(chars.len());
    let open = chars[span.clone()].iter().take_while(|c| **c == '`').count();
    if open == 0 {
        return false;
    }
    let close = chars[span.start + open..span.end]
        .iter()
        .rev()
        .take_while(|c| **c == '`')
        .count();
    let close = (close == open).then(|| span.end - close..span.end);
    strip_pair(surface, at.line, span.start..span.start + open, close);
    true
}

/// Fence the selected lines off from, or back into, the surrounding block.
///
/// Each selection edge that already touches a fence line deletes it, any
/// other edge gets a new fence line. The end edge is edited before the start
/// edge so pending line numbers stay valid.
fn refence_selection<S: MarkdownSurface>(surface: &mut S, sel: Selection, default_fence: &str) -> bool {
    let (start, end) = (sel.start(), sel.end());

    let opening = (0..=start.line).rev().find(|&l| is_fence_line(surface, l));
    let fence = opening
        .and_then(|l| fence_run(surface, l))
        .map_or_else(|| default_fence.to_string(), |run| run.to_string());

    let (insert_start, start_line) = if is_fence_line(surface, start.line) {
        (false, start.line)
    } else if start.line > 0 && is_fence_line(surface, start.line - 1) {
        (false, start.line - 1)
    } else {
        (true, start.line)
    };

    let (insert_end, mut end_line) = if is_fence_line(surface, end.line) {
        (false, if end.ch == 0 { end.line + 1 } else { end.line })
    } else if end.ch != 0 && is_fence_line(surface, end.line + 1) {
        (false, end.line + 1)
    } else {
        (true, end.line + 1)
    };
    if end.ch == 0 {
        // The last line isn't really selected.
        end_line = end_line.saturating_sub(1);
    }

    tracing::trace!(target: "tmd::action", start_line, insert_start, end_line, insert_end, "refence");
    if !insert_start && !insert_end && start_line == end_line {
        // Both edges sit on the same fence line: the selection is part of a
        // delimiter, so the block as a whole is unfenced.
        return unfence_block(surface, start_line);
    }

    surface.batch(|s| {
        if insert_end {
            s.insert_line(end_line, &fence);
        } else {
            s.delete_line(end_line);
        }
        if insert_start {
            s.insert_line(start_line, &fence);
        } else {
            s.delete_line(start_line);
        }
    });

    let first = if insert_start { start_line + 1 } else { start_line };
    let last = if insert_start { end_line } else { end_line.saturating_sub(2) }.max(first);
    let last = last.min(surface.line_count().saturating_sub(1));
    surface.set_selection(Selection::new(
        Position::line_start(first),
        Position::new(last, surface.line_len(last)),
    ));
    true
}

/// Delete the opening and closing fence lines of the block around `line`.
///
/// Scans stop at the document edges; an edge line is only deleted if it
/// really is a fence.
fn unfence_block<S: MarkdownSurface>(surface: &mut S, line: usize) -> bool {
    let count = surface.line_count();
    let mut block_start = None;
    let mut block_end = None;
    let mut search_from = line;

    if is_fence_line(surface, line) {
        if resolve_code_type(surface, line + 1) == CodeType::Fenced && line + 1 < count {
            block_start = Some(line);
            search_from = line + 1;
        } else {
            block_end = Some(line);
            search_from = line.saturating_sub(1);
        }
    }

    let block_start = block_start.unwrap_or_else(|| {
        (0..=search_from)
            .rev()
            .find(|&l| is_fence_line(surface, l))
            .unwrap_or(0)
    });
    let block_end = block_end.unwrap_or_else(|| {
        (search_from..count)
            .find(|&l| l != block_start && is_fence_line(surface, l))
            .unwrap_or(count.saturating_sub(1))
    });

    let delete_start = is_fence_line(surface, block_start);
    let delete_end = block_end != block_start && is_fence_line(surface, block_end);
    tracing::trace!(target: "tmd::action", block_start, block_end, delete_start, delete_end, "unfence");

    surface.batch(|s| {
        if delete_end {
            s.delete_line(block_end);
        }
        if delete_start {
            s.delete_line(block_start);
        }
    });
    delete_start || delete_end
}

/// Extent of the indented code block containing `line`, skipping blank lines
/// and clamping at the document edges.
pub fn indented_block_bounds<S: MarkdownSurface + ?Sized>(surface: &S, line: usize) -> (usize, usize) {
    let count = surface.line_count();
    let indented = |l: usize| resolve_code_type(surface, l) == CodeType::Indented;

    let mut block_start = 0;
    for l in (0..=line).rev() {
        if is_blank_line(surface, l) {
            continue;
        }
        if !indented(l) {
            block_start = l + 1;
            break;
        }
    }

    let mut block_end = count.saturating_sub(1);
    for l in line..count {
        if is_blank_line(surface, l) {
            continue;
        }
        if !indented(l) {
            block_end = l.saturating_sub(1).max(line);
            break;
        }
    }

    // Blank lines only bridge indented lines; drop them at the edges.
    while block_start < line && is_blank_line(surface, block_start) {
        block_start += 1;
    }
    while block_end > line && is_blank_line(surface, block_end) {
        block_end -= 1;
    }
    (block_start, block_end)
}

fn outdent_block<S: MarkdownSurface>(surface: &mut S, sel: Selection) -> bool {
    let (start, end) = (sel.start(), sel.end());
    let (block_start, block_end) = if sel.is_caret() {
        indented_block_bounds(surface, start.line)
    } else if end.ch == 0 && end.line > start.line {
        (start.line, end.line - 1)
    } else {
        (start.line, end.line)
    };

    // Keep a following indented block from merging into this one once it is
    // no longer code.
    let next = block_end + 1;
    let next_indented = next < surface.line_count()
        && surface
            .token_at(Position::new(next, surface.line_len(next)))
            .is_some_and(|t| t.in_indented_code());
    tracing::trace!(target: "tmd::action", block_start, block_end, next_indented, "outdent");

    surface.batch(|s| {
        if next_indented {
            s.insert_line(next, "");
        }
        for l in block_start..=block_end {
            s.indent_line(l, IndentDirection::Subtract);
        }
    });
    true
}

fn insert_code<S: MarkdownSurface>(surface: &mut S, sel: Selection, fence: &str) -> bool {
    let (start, end) = (sel.start(), sel.end());
    let caret_at_line_start = sel.is_caret() && start.ch == 0;
    let multi_line = start.line != end.line;

    if !caret_at_line_start && !multi_line {
        let text = selected_text(surface, sel);
        wrap_selection(surface, "`", &text, "`");
        return true;
    }

    if caret_at_line_start {
        let line = start.line;
        if surface.line_len(line) == 0 {
            surface.replace_line(line, &format!("{fence}\n\n{fence}"));
        } else {
            surface.insert_line(line, &format!("{fence}\n\n{fence}"));
        }
        surface.set_selection(Selection::caret(Position::line_start(line + 1)));
        return true;
    }

    let last = if end.ch == 0 { end.line - 1 } else { end.line };
    surface.batch(|s| {
        s.insert_line(last + 1, fence);
        s.insert_line(start.line, fence);
    });
    let content_end = last + 1;
    surface.set_selection(Selection::new(
        Position::line_start(start.line + 1),
        Position::new(content_end, surface.line_len(content_end)),
    ));
    true
}
