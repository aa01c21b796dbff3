//! Document storage behind the editing surface.
//!
//! Offsets count chars. Only `\n` ends a line, so a `\r` left over from a
//! pasted CRLF document stays part of its line's text.

use std::ops::Range;

use ropey::Rope;
use smol_str::{SmolStr, ToSmolStr};

/// Char-addressed, line-aware text storage.
pub trait TextBuffer {
    fn len_chars(&self) -> usize;

    /// Line count. A trailing `\n` opens one more, empty, line.
    fn len_lines(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Offsets past the end insert at the end.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// The range is clipped to the buffer.
    fn delete(&mut self, char_range: Range<usize>);

    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        let at = char_range.start;
        if !char_range.is_empty() {
            self.delete(char_range);
        }
        if !text.is_empty() {
            self.insert(at, text);
        }
    }

    /// `None` unless the range is well-formed and inside the buffer.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    fn to_string(&self) -> String;

    /// First char of `line`, or `len_chars()` for lines past the end.
    fn line_to_char(&self, line: usize) -> usize;

    fn char_to_line(&self, char_offset: usize) -> usize;

    /// Chars of `line` before its `\n`.
    fn line_len(&self, line: usize) -> usize {
        let count = self.len_lines();
        if line >= count {
            return 0;
        }
        let end = match line + 1 {
            next if next < count => self.line_to_char(next) - 1,
            _ => self.len_chars(),
        };
        end - self.line_to_char(line)
    }

    /// Text of `line` without its `\n`.
    fn line(&self, line: usize) -> Option<SmolStr> {
        if line >= self.len_lines() {
            return None;
        }
        let start = self.line_to_char(line);
        self.slice(start..start + self.line_len(line))
    }
}

/// `TextBuffer` over a ropey `Rope`.
#[derive(Debug, Clone, Default)]
pub struct EditorRope(Rope);

impl EditorRope {
    pub fn from_str(text: &str) -> Self {
        Self(Rope::from_str(text))
    }

    fn clip(&self, range: Range<usize>) -> Range<usize> {
        let len = self.0.len_chars();
        let start = range.start.min(len);
        start..range.end.clamp(start, len)
    }

    fn line_slice(&self, line: usize) -> Option<ropey::RopeSlice<'_>> {
        let slice = self.0.get_line(line)?;
        let len = slice.len_chars();
        Some(match len {
            0 => slice,
            _ if slice.char(len - 1) == '\n' => slice.slice(..len - 1),
            _ => slice,
        })
    }
}

impl From<&str> for EditorRope {
    fn from(text: &str) -> Self {
        Self::from_str(text)
    }
}

impl TextBuffer for EditorRope {
    fn len_chars(&self) -> usize {
        self.0.len_chars()
    }

    fn len_lines(&self) -> usize {
        self.0.len_lines()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        let at = char_offset.min(self.0.len_chars());
        self.0.insert(at, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        let range = self.clip(char_range);
        if !range.is_empty() {
            self.0.remove(range);
        }
    }

    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        let range = self.clip(char_range);
        if !range.is_empty() {
            self.0.remove(range.clone());
        }
        self.0.insert(range.start, text);
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        self.0.get_slice(char_range).map(|s| s.to_smolstr())
    }

    fn to_string(&self) -> String {
        String::from(&self.0)
    }

    fn line_to_char(&self, line: usize) -> usize {
        self.0.try_line_to_char(line).unwrap_or_else(|_| self.0.len_chars())
    }

    fn char_to_line(&self, char_offset: usize) -> usize {
        self.0.char_to_line(char_offset.min(self.0.len_chars()))
    }

    fn line_len(&self, line: usize) -> usize {
        self.line_slice(line).map_or(0, |s| s.len_chars())
    }

    fn line(&self, line: usize) -> Option<SmolStr> {
        self.line_slice(line).map(|s| s.to_smolstr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_markup() {
        let mut doc = EditorRope::from_str("make it bold");
        doc.insert(8, "**");
        doc.insert(14, "**");
        assert_eq!(doc.to_string(), "make it **bold**");

        doc.replace(8..16, "_bold_");
        assert_eq!(doc.to_string(), "make it _bold_");

        doc.delete(8..9);
        doc.delete(12..100);
        assert_eq!(doc.to_string(), "make it bold");
    }

    #[test]
    fn test_out_of_range_edits_are_clipped() {
        let mut doc = EditorRope::from("abc");
        doc.insert(99, "!");
        assert_eq!(doc.to_string(), "abc!");
        doc.replace(2..99, "");
        assert_eq!(doc.to_string(), "ab");
        doc.delete(5..9);
        assert_eq!(doc.to_string(), "ab");
    }

    #[test]
    fn test_slice_bounds() {
        let doc = EditorRope::from_str("> quote");
        assert_eq!(doc.slice(2..7).as_deref(), Some("quote"));
        assert_eq!(doc.slice(7..7).as_deref(), Some(""));
        assert_eq!(doc.slice(3..99), None);
        assert!(!doc.is_empty());
        assert!(EditorRope::default().is_empty());
    }

    #[test]
    fn test_lines() {
        let doc = EditorRope::from_str("# title\n\nbody text\n");
        assert_eq!(doc.len_lines(), 4);
        let lines: Vec<_> = (0..5).map(|l| doc.line(l).map(String::from)).collect();
        assert_eq!(
            lines,
            vec![
                Some("# title".to_string()),
                Some("".to_string()),
                Some("body text".to_string()),
                Some("".to_string()),
                None,
            ]
        );

        assert_eq!(doc.line_to_char(2), 9);
        assert_eq!(doc.line_to_char(9), doc.len_chars());
        assert_eq!(doc.char_to_line(9), 2);
        assert_eq!(doc.char_to_line(999), 3);
        assert_eq!(doc.line_len(2), 9);
        assert_eq!(doc.line_len(7), 0);
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let doc = EditorRope::from_str("- héllo\n- wörld");
        assert_eq!(doc.line_len(0), 7);
        assert_eq!(doc.line_to_char(1), 8);
        assert_eq!(doc.line(1).as_deref(), Some("- wörld"));
    }

    #[test]
    fn test_only_lf_breaks_lines() {
        let doc = EditorRope::from_str("a\r\nb\rc");
        assert_eq!(doc.len_lines(), 2);
        assert_eq!(doc.line(0).as_deref(), Some("a\r"));
        assert_eq!(doc.line(1).as_deref(), Some("b\rc"));
    }
}
