//! Semantic style tags attached to Markdown tokens.
//!
//! The editing surface reports, for every token on a line, which Markdown
//! constructs it belongs to. Tags overlap freely: a word inside `**[x](y)**`
//! carries both `STRONG` and `LINK`.

use bitflags::bitflags;
use smol_str::SmolStr;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StyleSet: u16 {
        const STRONG = 1 << 0;
        const EM = 1 << 1;
        const STRIKETHROUGH = 1 << 2;
        const LIST = 1 << 3;
        const QUOTE = 1 << 4;
        const HEADING = 1 << 5;
        const LINK = 1 << 6;
        const IMAGE = 1 << 7;
        const INLINE_CODE = 1 << 8;
        const BLOCK_CODE = 1 << 9;
        const FENCE_DELIMITER = 1 << 10;
        const INDENTED_CODE = 1 << 11;
    }
}

impl Default for StyleSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl StyleSet {
    /// Tags that make a token count as code of any kind.
    pub const CODE: StyleSet = StyleSet::INLINE_CODE
        .union(StyleSet::BLOCK_CODE)
        .union(StyleSet::FENCE_DELIMITER);

    /// Whether any code tag is present.
    pub fn is_code(&self) -> bool {
        self.intersects(Self::CODE)
    }
}

/// A run of characters on one line sharing the same styles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token {
    /// Char offset of the first character in the line.
    pub start: usize,
    /// Char offset one past the last character. Equal to `start` for the
    /// placeholder token of an empty line.
    pub end: usize,
    pub styles: StyleSet,
    /// Heading level 1-6 when `styles` contains `HEADING`.
    pub heading_level: Option<u8>,
    /// The fence run that opened the enclosing fenced block, e.g. "```".
    pub fence: Option<SmolStr>,
}

impl Token {
    /// Whether this token sits inside an indented code block.
    pub fn in_indented_code(&self) -> bool {
        self.styles.contains(StyleSet::INDENTED_CODE)
    }

    /// Whether this token is part of a fence delimiter line.
    pub fn is_fence_delimiter(&self) -> bool {
        self.styles.contains(StyleSet::FENCE_DELIMITER)
    }

    /// Whether this token covers char `ch` of its line.
    pub fn covers(&self, ch: usize) -> bool {
        ch >= self.start && ch < self.end
    }

    /// Number of characters in the token.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Tokens for one line, in order, covering the whole line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineTokens {
    pub tokens: Vec<Token>,
}

impl LineTokens {
    /// Token used to classify a position on this line.
    ///
    /// Reads the character before `ch`, or the first character at `ch == 0`,
    /// clamping `ch` to the end of the line. Empty lines yield their
    /// zero-width placeholder.
    pub fn token_at(&self, ch: usize) -> Option<&Token> {
        let last = self.tokens.last()?;
        if last.end == 0 {
            return Some(last);
        }
        let sample = ch.saturating_sub(1).min(last.end - 1);
        self.tokens.iter().find(|t| t.covers(sample))
    }

    /// The token covering the last character of the line.
    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// The token covering the first character of the line.
    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }
}
