//! Editor options and the keymap built from them.
//!
//! Options arrive as JSON from the host page. Every field is optional; a
//! missing field takes its default, and a given `toolbarLayout` or
//! `shortcuts` replaces the default table wholesale.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::actions::{EditorAction, KeyCombo, Shortcut};
use crate::error::OptionsError;
use crate::format::{DEFAULT_FENCE, DEFAULT_URL};
use crate::toolbar::{DEFAULT_LAYOUT, resolve_layout};
use crate::types::DEFAULT_INDENT_UNIT;

/// Default shortcut table, keyed by action name.
pub const DEFAULT_SHORTCUTS: [(&str, &str); 14] = [
    ("toggleBold", "Cmd-B"),
    ("toggleItalic", "Cmd-I"),
    ("drawLink", "Cmd-K"),
    ("toggleHeadingSmaller", "Cmd-H"),
    ("toggleHeadingBigger", "Shift-Cmd-H"),
    ("cleanBlock", "Cmd-E"),
    ("drawImage", "Cmd-Alt-I"),
    ("toggleBlockquote", "Cmd-'"),
    ("toggleOrderedList", "Cmd-Alt-L"),
    ("toggleUnorderedList", "Cmd-L"),
    ("toggleCodeBlock", "Cmd-Alt-C"),
    ("togglePreview", "Cmd-P"),
    ("toggleSideBySide", "F9"),
    ("toggleFullScreen", "F11"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorOptions {
    pub toolbar_enable: bool,
    pub statusbar_enable: bool,
    /// Button names and `"|"` separators, left to right.
    pub toolbar_layout: Vec<SmolStr>,
    /// Action (or host command) name to shortcut.
    pub shortcuts: BTreeMap<SmolStr, Shortcut>,
    /// Open the preview next to the editor initially.
    pub side_by_side: bool,
    /// Render full screen in a modal rather than in place.
    pub full_screen_modal: bool,
    /// Start in full screen.
    pub fullscreen: bool,
    /// Keep the preview scrolled to the editor's position.
    pub scroll_lock: bool,
    /// URL inserted by `drawLink`.
    pub link_url: String,
    /// URL inserted by `drawImage`.
    pub image_url: String,
    /// Fence run for new fenced code blocks.
    pub fence_chars: String,
    /// Columns per indentation level, see `PlainEditor::with_options`.
    pub indent_unit: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            toolbar_enable: true,
            statusbar_enable: true,
            toolbar_layout: DEFAULT_LAYOUT.iter().map(|&name| SmolStr::new(name)).collect(),
            shortcuts: DEFAULT_SHORTCUTS
                .iter()
                .map(|&(action, shortcut)| (SmolStr::new(action), Shortcut::new(shortcut)))
                .collect(),
            side_by_side: true,
            full_screen_modal: true,
            fullscreen: false,
            scroll_lock: true,
            link_url: DEFAULT_URL.to_string(),
            image_url: DEFAULT_URL.to_string(),
            fence_chars: DEFAULT_FENCE.to_string(),
            indent_unit: DEFAULT_INDENT_UNIT,
        }
    }
}

impl EditorOptions {
    /// Parse and validate options from JSON.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the toolbar layout and that every shortcut parses.
    pub fn validate(&self) -> Result<(), OptionsError> {
        resolve_layout(&self.toolbar_layout)?;
        for (action, shortcut) in &self.shortcuts {
            shortcut
                .combo(false)
                .map_err(|source| OptionsError::InvalidShortcut {
                    action: action.to_string(),
                    shortcut: shortcut.to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Shortcut bound to `action`, if any.
    pub fn shortcut_for(&self, action: &str) -> Option<&Shortcut> {
        self.shortcuts.get(action)
    }
}

/// What a key combination triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A formatting action run by the core.
    Action(EditorAction),
    /// A command the host implements itself, such as `togglePreview` or
    /// `toggleFullScreen`.
    Host(SmolStr),
}

/// Key combinations resolved for one platform.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeyCombo, Command>,
}

impl Keymap {
    /// Resolve every configured shortcut. Names that aren't formatting
    /// actions are kept as host commands.
    pub fn from_options(options: &EditorOptions, is_mac: bool) -> Result<Self, OptionsError> {
        let mut bindings = HashMap::with_capacity(options.shortcuts.len());
        for (name, shortcut) in &options.shortcuts {
            let combo = shortcut
                .combo(is_mac)
                .map_err(|source| OptionsError::InvalidShortcut {
                    action: name.to_string(),
                    shortcut: shortcut.to_string(),
                    source,
                })?;
            let command = match name.parse::<EditorAction>() {
                Ok(action) => Command::Action(action),
                Err(_) => Command::Host(name.clone()),
            };
            if let Some(previous) = bindings.insert(combo, command) {
                tracing::warn!(target: "tmd::keymap", %shortcut, ?previous, "shortcut rebound");
            }
        }
        Ok(Self { bindings })
    }

    pub fn lookup(&self, combo: &KeyCombo) -> Option<&Command> {
        self.bindings.get(combo)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
