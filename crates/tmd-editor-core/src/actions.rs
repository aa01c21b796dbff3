//! Editor actions and key bindings.
//!
//! The `EditorAction` enum names every formatting operation with the stable
//! camelCase name toolbars, shortcut tables and hosts refer to it by. `Key`,
//! `Modifiers` and `KeyCombo` are the platform-agnostic shape of a key
//! binding; `Shortcut` parses the `Shift-Cmd-H` notation used in options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{ActionError, ShortcutError};
use crate::state::Construct;

/// All formatting actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    ToggleBold,
    ToggleItalic,
    ToggleStrikethrough,
    ToggleCodeBlock,
    ToggleBlockquote,
    ToggleUnorderedList,
    ToggleOrderedList,
    /// One more `#`, wrapping to plain text after level 6.
    ToggleHeadingSmaller,
    /// One less `#`, wrapping from plain text to level 6.
    ToggleHeadingBigger,
    /// Set a fixed level 1-6, or clear it if the line already has it.
    ToggleHeading(u8),
    CleanBlock,
    DrawLink,
    DrawImage,
    DrawTable,
    DrawHorizontalRule,
    Undo,
    Redo,
}

impl EditorAction {
    pub const ALL: [EditorAction; 22] = [
        Self::ToggleBold,
        Self::ToggleItalic,
        Self::ToggleStrikethrough,
        Self::ToggleCodeBlock,
        Self::ToggleBlockquote,
        Self::ToggleUnorderedList,
        Self::ToggleOrderedList,
        Self::ToggleHeadingSmaller,
        Self::ToggleHeadingBigger,
        Self::ToggleHeading(1),
        Self::ToggleHeading(2),
        Self::ToggleHeading(3),
        Self::ToggleHeading(4),
        Self::ToggleHeading(5),
        Self::ToggleHeading(6),
        Self::CleanBlock,
        Self::DrawLink,
        Self::DrawImage,
        Self::DrawTable,
        Self::DrawHorizontalRule,
        Self::Undo,
        Self::Redo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ToggleBold => "toggleBold",
            Self::ToggleItalic => "toggleItalic",
            Self::ToggleStrikethrough => "toggleStrikethrough",
            Self::ToggleCodeBlock => "toggleCodeBlock",
            Self::ToggleBlockquote => "toggleBlockquote",
            Self::ToggleUnorderedList => "toggleUnorderedList",
            Self::ToggleOrderedList => "toggleOrderedList",
            Self::ToggleHeadingSmaller => "toggleHeadingSmaller",
            Self::ToggleHeadingBigger => "toggleHeadingBigger",
            Self::ToggleHeading(1) => "toggleHeading1",
            Self::ToggleHeading(2) => "toggleHeading2",
            Self::ToggleHeading(3) => "toggleHeading3",
            Self::ToggleHeading(4) => "toggleHeading4",
            Self::ToggleHeading(5) => "toggleHeading5",
            Self::ToggleHeading(_) => "toggleHeading6",
            Self::CleanBlock => "cleanBlock",
            Self::DrawLink => "drawLink",
            Self::DrawImage => "drawImage",
            Self::DrawTable => "drawTable",
            Self::DrawHorizontalRule => "drawHorizontalRule",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    /// Construct whose text state decides the toggle direction, if any.
    pub fn construct(self) -> Option<Construct> {
        match self {
            Self::ToggleBold => Some(Construct::Bold),
            Self::ToggleItalic => Some(Construct::Italic),
            Self::ToggleStrikethrough => Some(Construct::Strikethrough),
            Self::ToggleCodeBlock => Some(Construct::Code),
            Self::ToggleBlockquote => Some(Construct::Quote),
            Self::ToggleUnorderedList => Some(Construct::UnorderedList),
            Self::ToggleOrderedList => Some(Construct::OrderedList),
            Self::ToggleHeadingSmaller | Self::ToggleHeadingBigger | Self::ToggleHeading(_) => {
                Some(Construct::Heading)
            }
            Self::DrawLink => Some(Construct::Link),
            Self::DrawImage => Some(Construct::Image),
            Self::CleanBlock
            | Self::DrawTable
            | Self::DrawHorizontalRule
            | Self::Undo
            | Self::Redo => None,
        }
    }
}

impl FromStr for EditorAction {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| ActionError::UnknownAction(SmolStr::new(s)))
    }
}

impl fmt::Display for EditorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key as the host reports it, after translating its native event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key, lowercased.
    Character(SmolStr),

    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Space,

    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,

    /// Function key F1-F12.
    F(u8),
}

impl Key {
    /// Character keys compare case-insensitively.
    pub fn character(s: impl Into<SmolStr>) -> Self {
        let s: SmolStr = s.into();
        Self::Character(SmolStr::new(s.to_lowercase()))
    }

    fn parse(name: &str) -> Result<Self, ShortcutError> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::character(c.to_string()));
        }
        if let Some(n) = name.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
            if (1..=12).contains(&n) {
                return Ok(Self::F(n));
            }
        }
        let key = match name.to_ascii_lowercase().as_str() {
            "backspace" => Self::Backspace,
            "delete" => Self::Delete,
            "enter" => Self::Enter,
            "tab" => Self::Tab,
            "esc" | "escape" => Self::Escape,
            "space" => Self::Space,
            "left" => Self::ArrowLeft,
            "right" => Self::ArrowRight,
            "up" => Self::ArrowUp,
            "down" => Self::ArrowDown,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            _ => return Err(ShortcutError::UnknownKey(SmolStr::new(name))),
        };
        Ok(key)
    }
}

/// Held modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// `Cmd` on macOS, `Ctrl` everywhere else.
    pub fn primary(is_mac: bool) -> Self {
        if is_mac { Self::META } else { Self::CTRL }
    }
}

/// A key plus the modifiers held with it. Keys of the `Keymap`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn primary(key: Key, is_mac: bool) -> Self {
        Self {
            key,
            modifiers: Modifiers::primary(is_mac),
        }
    }
}

/// A shortcut in `Mod-Mod-Key` notation, e.g. `Cmd-B`, `Shift-Cmd-H`,
/// `Cmd-Alt-I`, `Cmd-'` or `F9`.
///
/// `Cmd` is the platform's primary modifier: Meta on macOS, Ctrl elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shortcut(SmolStr);

impl Shortcut {
    pub fn new(s: impl Into<SmolStr>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into modifier names and the key name. A trailing `--` means
    /// the `-` key.
    fn parts(&self) -> (Vec<&str>, &str) {
        let s = self.0.as_str();
        let (mods, key) = match s.strip_suffix("--") {
            Some(rest) => (rest, "-"),
            None => s.rsplit_once('-').unwrap_or(("", s)),
        };
        let mods = mods.split('-').filter(|m| !m.is_empty()).collect();
        (mods, key)
    }

    /// Resolve to a key combination for the given platform.
    pub fn combo(&self, is_mac: bool) -> Result<KeyCombo, ShortcutError> {
        let (mods, key) = self.parts();
        if key.is_empty() {
            return Err(ShortcutError::Empty);
        }
        let mut modifiers = Modifiers::NONE;
        for name in mods {
            match name.to_ascii_lowercase().as_str() {
                "cmd" | "mod" => {
                    if is_mac {
                        modifiers.meta = true;
                    } else {
                        modifiers.ctrl = true;
                    }
                }
                "ctrl" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "meta" => modifiers.meta = true,
                _ => return Err(ShortcutError::UnknownModifier(SmolStr::new(name))),
            }
        }
        Ok(KeyCombo::with_modifiers(Key::parse(key)?, modifiers))
    }

    /// Human-readable form for tooltips: `⌘` and `⌥` on macOS, `Cmd`
    /// spelled as `Ctrl` elsewhere.
    pub fn display(&self, is_mac: bool) -> String {
        let (mods, key) = self.parts();
        let mut out: Vec<&str> = mods
            .into_iter()
            .map(|m| match (m, is_mac) {
                ("Cmd" | "Ctrl", true) => "⌘",
                ("Alt", true) => "⌥",
                ("Cmd", false) => "Ctrl",
                (other, _) => other,
            })
            .collect();
        out.push(key);
        out.join("-")
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What `handle_keydown` did with a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeydownResult {
    /// A formatting action ran, prevent default.
    Handled,
    /// The combo is bound to a host command (preview, full screen, ...).
    Host(SmolStr),
    /// Unbound. The host should process the key normally.
    NotHandled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for action in EditorAction::ALL {
            assert_eq!(action.name().parse::<EditorAction>(), Ok(action));
        }
        assert_eq!(
            "toggleHeading3".parse::<EditorAction>(),
            Ok(EditorAction::ToggleHeading(3))
        );
        assert_eq!(
            "togglePreview".parse::<EditorAction>(),
            Err(ActionError::UnknownAction(SmolStr::new("togglePreview")))
        );
        assert_eq!(EditorAction::DrawHorizontalRule.to_string(), "drawHorizontalRule");
    }

    #[test]
    fn test_parse_shortcuts() {
        let combo = Shortcut::new("Cmd-B").combo(false).unwrap();
        assert_eq!(combo, KeyCombo::with_modifiers(Key::character("b"), Modifiers::CTRL));

        let combo = Shortcut::new("Cmd-B").combo(true).unwrap();
        assert_eq!(combo, KeyCombo::with_modifiers(Key::character("b"), Modifiers::META));

        let combo = Shortcut::new("Shift-Cmd-H").combo(false).unwrap();
        assert!(combo.modifiers.shift && combo.modifiers.ctrl);
        assert_eq!(combo.key, Key::character("h"));

        let combo = Shortcut::new("Cmd-Alt-I").combo(true).unwrap();
        assert!(combo.modifiers.alt && combo.modifiers.meta && !combo.modifiers.ctrl);

        assert_eq!(Shortcut::new("Cmd-'").combo(false).unwrap().key, Key::character("'"));
        assert_eq!(Shortcut::new("F9").combo(false).unwrap(), KeyCombo::new(Key::F(9)));
        assert_eq!(Shortcut::new("Ctrl--").combo(false).unwrap().key, Key::character("-"));
    }

    #[test]
    fn test_bad_shortcuts() {
        assert_eq!(Shortcut::new("").combo(false), Err(ShortcutError::Empty));
        assert_eq!(
            Shortcut::new("Hyper-B").combo(false),
            Err(ShortcutError::UnknownModifier(SmolStr::new("Hyper")))
        );
        assert_eq!(
            Shortcut::new("Cmd-Bee").combo(false),
            Err(ShortcutError::UnknownKey(SmolStr::new("Bee")))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Shortcut::new("Cmd-Alt-I").display(true), "⌘-⌥-I");
        assert_eq!(Shortcut::new("Cmd-Alt-I").display(false), "Ctrl-Alt-I");
        assert_eq!(Shortcut::new("Shift-Cmd-H").display(true), "Shift-⌘-H");
        assert_eq!(Shortcut::new("F11").display(true), "F11");
    }
}
