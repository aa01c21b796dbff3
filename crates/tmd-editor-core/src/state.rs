//! Text state at a position: which Markdown constructs are active there.
//!
//! Drives both the toggle direction of every action and toolbar highlighting.

use serde::Serialize;

use crate::patterns::is_ordered_list_line;
use crate::style::StyleSet;
use crate::surface::MarkdownSurface;
use crate::types::Position;

/// A formatting construct whose presence can be queried on a `TextState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    Bold,
    Italic,
    Strikethrough,
    Code,
    Quote,
    OrderedList,
    UnorderedList,
    Link,
    Image,
    Heading,
}

/// Constructs active at one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextState {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub quote: bool,
    pub ordered_list: bool,
    pub unordered_list: bool,
    pub link: bool,
    pub image: bool,
    pub heading: bool,
    /// Level of the heading at this position, set together with `heading`.
    pub heading_level: Option<u8>,
}

impl TextState {
    pub fn is_active(&self, construct: Construct) -> bool {
        match construct {
            Construct::Bold => self.bold,
            Construct::Italic => self.italic,
            Construct::Strikethrough => self.strikethrough,
            Construct::Code => self.code,
            Construct::Quote => self.quote,
            Construct::OrderedList => self.ordered_list,
            Construct::UnorderedList => self.unordered_list,
            Construct::Link => self.link,
            Construct::Image => self.image,
            Construct::Heading => self.heading,
        }
    }

    /// Whether no construct is active.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Classify the token at `pos`.
///
/// A caret between the two halves of an empty emphasis pair (`*|*`,
/// `**|**`, `***|***`) reports the pair's emphasis on top of whatever
/// encloses it, since the token stream alone can't tell `*` `*` from `**`.
pub fn classify<S: MarkdownSurface + ?Sized>(surface: &S, pos: Position) -> TextState {
    let mut state = token_state(surface, pos);
    if state.code {
        return state;
    }
    let Some(run) = surface.line(pos.line).and_then(|text| empty_pair_run(&text, pos.ch)) else {
        return state;
    };
    let outer = match pos.ch - run {
        0 => TextState::default(),
        ch => token_state(surface, Position::new(pos.line, ch)),
    };
    state.bold = outer.bold || run >= 2;
    state.italic = outer.italic || run % 2 == 1;
    state
}

/// Length of the marker run on each side of `ch` when both sides are equal
/// runs of the same emphasis char, as a caret toggle leaves them.
fn empty_pair_run(line: &str, ch: usize) -> Option<usize> {
    let chars: Vec<char> = line.chars().collect();
    let ch = ch.min(chars.len());
    let marker = *chars.get(ch)?;
    if !matches!(marker, '*' | '_') {
        return None;
    }
    let left = chars[..ch].iter().rev().take_while(|c| **c == marker).count();
    let right = chars[ch..].iter().take_while(|c| **c == marker).count();
    (left == right && (1..=3).contains(&left)).then_some(left)
}

fn token_state<S: MarkdownSurface + ?Sized>(surface: &S, pos: Position) -> TextState {
    let Some(token) = surface.token_at(pos) else {
        return TextState::default();
    };
    let styles = token.styles;
    let mut state = TextState {
        bold: styles.contains(StyleSet::STRONG),
        italic: styles.contains(StyleSet::EM),
        strikethrough: styles.contains(StyleSet::STRIKETHROUGH),
        code: styles.is_code(),
        quote: styles.contains(StyleSet::QUOTE),
        link: styles.contains(StyleSet::LINK),
        image: styles.contains(StyleSet::IMAGE),
        ..TextState::default()
    };
    if styles.contains(StyleSet::LIST) {
        let ordered = surface
            .line(pos.line)
            .is_some_and(|text| is_ordered_list_line(&text));
        state.ordered_list = ordered;
        state.unordered_list = !ordered;
    }
    if styles.contains(StyleSet::HEADING) {
        if let Some(level @ 1..=6) = token.heading_level {
            state.heading = true;
            state.heading_level = Some(level);
        }
    }
    state
}

/// Classify at the start of the current selection.
pub fn classify_at_cursor<S: MarkdownSurface + ?Sized>(surface: &S) -> TextState {
    classify(surface, surface.selection().start())
}
