use pulldown_cmark::{Event, Options, Parser};
use ropey::Rope;

/// Markdown extensions the preview renders with.
pub fn default_md_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// 0-based source line of every top-level block, in document order.
///
/// These are the blocks the preview tags with their source line; nested
/// blocks (list items, quoted paragraphs) belong to their top-level parent.
pub fn source_blocks(markdown: &str) -> Vec<usize> {
    let rope = Rope::from_str(markdown);
    let mut lines = Vec::new();
    let mut depth = 0usize;

    for (event, range) in Parser::new_ext(markdown, default_md_options()).into_offset_iter() {
        match event {
            Event::Start(_) => {
                if depth == 0 {
                    lines.push(rope.byte_to_line(range.start));
                }
                depth += 1;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Rule if depth == 0 => lines.push(rope.byte_to_line(range.start)),
            _ => {}
        }
    }

    tracing::trace!(target: "tmd::preview", blocks = lines.len(), "source blocks");
    lines
}
