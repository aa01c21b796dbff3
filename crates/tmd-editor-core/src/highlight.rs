//! Line-oriented Markdown highlighter.
//!
//! Produces the token stream the formatting actions classify against. It is
//! modelled on how editor syntax modes see Markdown while it is being typed,
//! not on a full CommonMark parse: block state (fences, indented code, list
//! context) carries from line to line, inline state is per line, and
//! emphasis markers toggle on sight so that a freshly inserted `****` reads
//! as an open-and-closed bold span with the caret between the markers.

use smol_str::SmolStr;

use crate::style::{LineTokens, StyleSet, Token};
use crate::types::leading_indent;

/// An open fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenFence {
    run: SmolStr,
    ch: char,
    len: usize,
}

#[derive(Debug, Clone, Default)]
struct BlockState {
    fence: Option<OpenFence>,
    /// Previous line was text that an indented line would continue, which
    /// keeps it from starting indented code.
    prev_continuable: bool,
    prev_blank: bool,
    /// Content column of the list item we are inside, if any.
    list_content_col: Option<usize>,
}

/// Incremental highlighter: feed lines in document order.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    state: BlockState,
}

/// Highlight a whole document.
pub fn highlight<S: AsRef<str>>(lines: &[S]) -> Vec<LineTokens> {
    let mut highlighter = Highlighter::new();
    lines
        .iter()
        .map(|line| highlighter.line(line.as_ref()))
        .collect()
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize the next line and advance the block state.
    pub fn line(&mut self, text: &str) -> LineTokens {
        let chars: Vec<char> = text.chars().collect();

        if let Some(fence) = self.state.fence.clone() {
            let styles = if is_closing_fence(&chars, &fence) {
                self.state.fence = None;
                self.state.prev_continuable = false;
                StyleSet::FENCE_DELIMITER | StyleSet::BLOCK_CODE
            } else {
                StyleSet::BLOCK_CODE
            };
            self.state.prev_blank = false;
            return whole_line(chars.len(), styles, Some(fence.run));
        }

        if chars.iter().all(|c| c.is_whitespace()) {
            self.state.prev_blank = true;
            self.state.prev_continuable = false;
            return whole_line(chars.len(), StyleSet::empty(), None);
        }

        let (cols, indent_chars) = leading_indent(text);
        let code_threshold = self.state.list_content_col.map_or(4, |col| col + 4);
        if cols >= code_threshold && !self.state.prev_continuable {
            self.state.prev_blank = false;
            return whole_line(
                chars.len(),
                StyleSet::INDENTED_CODE | StyleSet::BLOCK_CODE,
                None,
            );
        }

        if let Some(col) = self.state.list_content_col {
            if self.state.prev_blank && cols < col {
                self.state.list_content_col = None;
            }
        }
        let prev_blank = std::mem::replace(&mut self.state.prev_blank, false);
        let rest = &chars[indent_chars..];

        if cols <= 3 {
            if let Some(fence) = opening_fence(rest) {
                let run = fence.run.clone();
                self.state.fence = Some(fence);
                self.end_block();
                return whole_line(
                    chars.len(),
                    StyleSet::FENCE_DELIMITER | StyleSet::BLOCK_CODE,
                    Some(run),
                );
            }
            if let Some(level) = atx_heading_level(rest) {
                self.end_block();
                let styles = scan_inline(&chars, indent_chars + level as usize, StyleSet::HEADING);
                return build_tokens(&styles, Some(level));
            }
            if is_thematic_break(rest) {
                self.end_block();
                return whole_line(chars.len(), StyleSet::empty(), None);
            }
            if rest.first() == Some(&'>') {
                self.state.list_content_col = None;
                self.state.prev_continuable = true;
                let mut from = indent_chars + 1;
                if chars.get(from) == Some(&' ') {
                    from += 1;
                }
                return build_tokens(&scan_inline(&chars, from, StyleSet::QUOTE), None);
            }
        }

        self.state.prev_continuable = true;
        if let Some((marker, spaces)) = list_marker(rest) {
            let padding = if spaces == 0 || spaces > 4 { 1 } else { spaces };
            self.state.list_content_col = Some(cols + marker + padding);
            let from = indent_chars + marker + spaces;
            return build_tokens(&scan_inline(&chars, from, StyleSet::LIST), None);
        }
        if self.state.list_content_col.is_some() && !(prev_blank && cols == 0) {
            return build_tokens(&scan_inline(&chars, indent_chars, StyleSet::LIST), None);
        }
        self.state.list_content_col = None;
        build_tokens(&scan_inline(&chars, indent_chars, StyleSet::empty()), None)
    }

    /// A leaf block ended: nothing continues into the next line.
    fn end_block(&mut self) {
        self.state.prev_continuable = false;
        self.state.list_content_col = None;
    }
}

fn whole_line(len: usize, styles: StyleSet, fence: Option<SmolStr>) -> LineTokens {
    LineTokens {
        tokens: vec![Token {
            start: 0,
            end: len,
            styles,
            heading_level: None,
            fence,
        }],
    }
}

/// Merge runs of equal per-char styles into tokens.
fn build_tokens(styles: &[StyleSet], heading_level: Option<u8>) -> LineTokens {
    let mut tokens: Vec<Token> = Vec::new();
    for (idx, style) in styles.iter().enumerate() {
        match tokens.last_mut() {
            Some(last) if last.styles == *style => last.end = idx + 1,
            _ => tokens.push(Token {
                start: idx,
                end: idx + 1,
                styles: *style,
                heading_level: heading_level.filter(|_| style.contains(StyleSet::HEADING)),
                fence: None,
            }),
        }
    }
    if tokens.is_empty() {
        return whole_line(0, StyleSet::empty(), None);
    }
    LineTokens { tokens }
}

fn run_len(chars: &[char], from: usize, ch: char) -> usize {
    chars[from..].iter().take_while(|c| **c == ch).count()
}

fn opening_fence(rest: &[char]) -> Option<OpenFence> {
    let ch = *rest.first()?;
    if ch != '`' && ch != '~' {
        return None;
    }
    let len = run_len(rest, 0, ch);
    if len < 3 {
        return None;
    }
    // Backtick fences can't carry backticks in their info string.
    if ch == '`' && rest[len..].contains(&'`') {
        return None;
    }
    Some(OpenFence {
        run: std::iter::repeat_n(ch, len).collect(),
        ch,
        len,
    })
}

fn is_closing_fence(chars: &[char], fence: &OpenFence) -> bool {
    let indent = chars.iter().take_while(|c| **c == ' ').count();
    if indent > 3 {
        return false;
    }
    let len = run_len(chars, indent, fence.ch);
    len >= fence.len && chars[indent + len..].iter().all(|c| c.is_whitespace())
}

fn atx_heading_level(rest: &[char]) -> Option<u8> {
    let level = run_len(rest, 0, '#');
    if !(1..=6).contains(&level) {
        return None;
    }
    match rest.get(level) {
        None => Some(level as u8),
        Some(c) if c.is_whitespace() => Some(level as u8),
        Some(_) => None,
    }
}

fn is_thematic_break(rest: &[char]) -> bool {
    let Some(&ch) = rest.first() else {
        return false;
    };
    if !matches!(ch, '-' | '*' | '_') {
        return false;
    }
    let mut count = 0;
    for c in rest {
        if *c == ch {
            count += 1;
        } else if *c != ' ' && *c != '\t' {
            return false;
        }
    }
    count >= 3
}

/// Returns `(marker_len, spaces_after)` for a list item marker.
fn list_marker(rest: &[char]) -> Option<(usize, usize)> {
    let first = *rest.first()?;
    let marker = if matches!(first, '*' | '+' | '-') {
        1
    } else {
        let digits = rest.iter().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 || digits > 9 || !matches!(rest.get(digits), Some('.') | Some(')')) {
            return None;
        }
        digits + 1
    };
    let spaces = rest[marker..].iter().take_while(|c| **c == ' ').count();
    if spaces == 0 && marker < rest.len() {
        // "-x" and "1.x" are plain text.
        if rest[marker] != '\t' {
            return None;
        }
        return Some((marker, 1));
    }
    Some((marker, spaces))
}

/// End (exclusive) of a `[label](target)` span starting at `open`.
fn link_end(chars: &[char], open: usize) -> Option<usize> {
    let mut i = open + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            ']' => break,
            _ => i += 1,
        }
    }
    if chars.get(i) != Some(&']') || chars.get(i + 1) != Some(&'(') {
        return None;
    }
    let close = chars[i + 2..].iter().position(|c| *c == ')')?;
    Some(i + 2 + close + 1)
}

#[derive(Debug, Default)]
struct InlineState {
    strong: Option<char>,
    em: Option<char>,
    strike: bool,
    code: Option<usize>,
}

impl InlineState {
    fn flags(&self) -> StyleSet {
        let mut flags = StyleSet::empty();
        flags.set(StyleSet::STRONG, self.strong.is_some());
        flags.set(StyleSet::EM, self.em.is_some());
        flags.set(StyleSet::STRIKETHROUGH, self.strike);
        flags.set(StyleSet::INLINE_CODE, self.code.is_some());
        flags
    }
}

/// Per-char styles for one line. Chars before `from` (block markers) carry
/// only `base`.
fn scan_inline(chars: &[char], from: usize, base: StyleSet) -> Vec<StyleSet> {
    let n = chars.len();
    let mut styles = vec![base; n];
    let mut st = InlineState::default();
    let mut i = from.min(n);

    let mark = |styles: &mut Vec<StyleSet>, at: usize, len: usize, style: StyleSet| {
        for s in styles.iter_mut().skip(at).take(len) {
            *s = style;
        }
    };

    while i < n {
        let c = chars[i];
        let cur = base | st.flags();

        if let Some(open) = st.code {
            if c == '`' {
                let run = run_len(chars, i, '`');
                mark(&mut styles, i, run, cur);
                if run == open {
                    st.code = None;
                }
                i += run;
            } else {
                styles[i] = cur;
                i += 1;
            }
            continue;
        }

        match c {
            '\\' => {
                mark(&mut styles, i, 2, cur);
                i += 2;
            }
            '`' => {
                let run = run_len(chars, i, '`');
                st.code = Some(run);
                mark(&mut styles, i, run, base | st.flags());
                i += run;
            }
            '*' | '_' => {
                let run = run_len(chars, i, c);
                let before = i.checked_sub(1).map(|b| chars[b]);
                let after = chars.get(i + run).copied();
                let intraword = c == '_'
                    && before.is_some_and(|b| b.is_alphanumeric())
                    && after.is_some_and(|a| a.is_alphanumeric());
                let spaced = run == 1
                    && before.is_none_or(char::is_whitespace)
                    && after.is_none_or(char::is_whitespace);
                if intraword || spaced {
                    mark(&mut styles, i, run, cur);
                    i += run;
                    continue;
                }
                let mut k = 0;
                while k < run {
                    let rem = run - k;
                    if rem >= 2 && st.strong == Some(c) {
                        mark(&mut styles, i + k, 2, base | st.flags());
                        st.strong = None;
                        k += 2;
                    } else if rem >= 2 && st.strong.is_none() {
                        st.strong = Some(c);
                        mark(&mut styles, i + k, 2, base | st.flags());
                        k += 2;
                    } else if st.em == Some(c) {
                        mark(&mut styles, i + k, 1, base | st.flags());
                        st.em = None;
                        k += 1;
                    } else if st.em.is_none() {
                        st.em = Some(c);
                        mark(&mut styles, i + k, 1, base | st.flags());
                        k += 1;
                    } else {
                        mark(&mut styles, i + k, 1, base | st.flags());
                        k += 1;
                    }
                }
                i += run;
            }
            '~' => {
                let run = run_len(chars, i, '~');
                let opens_before_text = chars.get(i + run).is_some_and(|a| !a.is_whitespace());
                let mut k = 0;
                while run - k >= 2 {
                    if st.strike {
                        mark(&mut styles, i + k, 2, base | st.flags());
                        st.strike = false;
                    } else if k + 2 < run || opens_before_text {
                        st.strike = true;
                        mark(&mut styles, i + k, 2, base | st.flags());
                    } else {
                        mark(&mut styles, i + k, 2, base | st.flags());
                    }
                    k += 2;
                }
                if k < run {
                    mark(&mut styles, i + k, 1, base | st.flags());
                }
                i += run;
            }
            '!' if chars.get(i + 1) == Some(&'[') => match link_end(chars, i + 1) {
                Some(end) => {
                    mark(&mut styles, i, end - i, cur | StyleSet::IMAGE);
                    i = end;
                }
                None => {
                    styles[i] = cur;
                    i += 1;
                }
            },
            '[' => match link_end(chars, i) {
                Some(end) => {
                    mark(&mut styles, i, end - i, cur | StyleSet::LINK);
                    i = end;
                }
                None => {
                    styles[i] = cur;
                    i += 1;
                }
            },
            _ => {
                styles[i] = cur;
                i += 1;
            }
        }
    }
    styles
}
