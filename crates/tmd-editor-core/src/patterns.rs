//! Named line patterns used to recover Markdown markers from line text.
//!
//! Every pattern returns char offsets, since positions address lines in
//! chars rather than bytes.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static ORDERED_LIST_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s").unwrap());

static QUOTE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)>\s+").unwrap());

static UNORDERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[*+-]\s+").unwrap());

static ORDERED_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)\d+\.\s+").unwrap());

static CLEAN_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *(?:[# ]+|[*+-](?: |$)|[> ]+|[0-9]+[.)]) *").unwrap());

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Char range of the marker matched by `re`, excluding the leading
/// whitespace captured in group 1.
fn marker_range(re: &Regex, line: &str) -> Option<Range<usize>> {
    let caps = re.captures(line)?;
    let whole = caps.get(0)?;
    let indent = caps.get(1).map_or(0, |m| m.end());
    Some(char_len(&line[..indent])..char_len(&line[..whole.end()]))
}

/// Whether the line opens with an ordered list marker such as `12. `.
pub fn is_ordered_list_line(line: &str) -> bool {
    ORDERED_LIST_LINE.is_match(line)
}

/// `>` plus following whitespace, after any indentation.
pub fn quote_marker(line: &str) -> Option<Range<usize>> {
    marker_range(&QUOTE_PREFIX, line)
}

/// `*`, `-` or `+` plus following whitespace, after any indentation.
pub fn unordered_marker(line: &str) -> Option<Range<usize>> {
    marker_range(&UNORDERED_PREFIX, line)
}

/// Digits, `.` and following whitespace, after any indentation.
pub fn ordered_marker(line: &str) -> Option<Range<usize>> {
    marker_range(&ORDERED_PREFIX, line)
}

/// Length in chars of the leading block marker run `clean_block` strips.
pub fn clean_block_prefix(line: &str) -> usize {
    CLEAN_BLOCK.find(line).map_or(0, |m| char_len(&line[..m.end()]))
}

/// A leading `#` run and the single space after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingPrefix {
    /// Heading level, capped at 6.
    pub level: u8,
    /// Chars covered by the `#` run and its following space.
    pub len: usize,
}

/// Parse the heading prefix of a line. A line made only of `#` has none.
pub fn heading_prefix(line: &str) -> Option<HeadingPrefix> {
    let run = line.chars().take_while(|c| *c == '#').count();
    let rest = line.chars().nth(run)?;
    if run == 0 {
        return None;
    }
    let len = if rest == ' ' { run + 1 } else { run };
    Some(HeadingPrefix {
        level: run.min(6) as u8,
        len,
    })
}
