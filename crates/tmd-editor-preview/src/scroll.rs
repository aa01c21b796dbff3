use ropey::Rope;

use crate::blocks::source_blocks;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Binding {
    source: usize,
    /// Offset of the block's top in the preview, once laid out.
    top: Option<f64>,
}

/// Maps editor lines to preview scroll offsets.
///
/// Holds one binding per top-level block plus a closing one at the
/// document's line count, which stands for the bottom of the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollMap {
    bindings: Vec<Binding>,
}

impl ScrollMap {
    pub fn new(blocks: &[usize], line_count: usize) -> Self {
        let bindings = blocks
            .iter()
            .map(|&source| Binding { source, top: None })
            .chain(std::iter::once(Binding {
                source: line_count,
                top: None,
            }))
            .collect();
        Self { bindings }
    }

    /// Bindings for every top-level block of `markdown`.
    pub fn from_markdown(markdown: &str) -> Self {
        let line_count = Rope::from_str(markdown).len_lines();
        Self::new(&source_blocks(markdown), line_count)
    }

    /// Number of blocks, not counting the closing binding.
    pub fn block_count(&self) -> usize {
        self.bindings.len() - 1
    }

    /// Record laid-out block tops, in block order. Extra values are ignored.
    pub fn set_tops(&mut self, tops: &[f64]) {
        let count = self.block_count();
        for (binding, &top) in self.bindings[..count].iter_mut().zip(tops) {
            binding.top = Some(top);
        }
    }

    /// Preview scroll offset that shows editor `line`.
    ///
    /// Lines at or before the first block scroll to the top. Otherwise the
    /// line's position within its block is interpolated linearly between the
    /// block's top and the next block's (or `scroll_height` for the last
    /// block), `top_offset` is subtracted and the result clamped at 0.
    /// `None` when the line is past the end or the tops it needs aren't set.
    pub fn preview_scroll_top(&self, line: usize, top_offset: f64, scroll_height: f64) -> Option<f64> {
        let first = self.bindings.first()?;
        if line <= first.source {
            return Some(0.0);
        }

        let i = self
            .bindings
            .windows(2)
            .position(|pair| line < pair[1].source)?;
        let (block, next) = (self.bindings[i], self.bindings[i + 1]);

        let block_top = block.top?;
        let next_top = if i + 1 == self.block_count() {
            scroll_height
        } else {
            next.top?
        };
        let span = next_top - block_top;
        let position =
            block_top + span * (line - block.source) as f64 / (next.source - block.source) as f64;
        Some((position - top_offset).max(0.0))
    }
}
