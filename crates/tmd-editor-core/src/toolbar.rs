//! Toolbar model: the built-in buttons, layout resolution and per-button
//! highlighting. Rendering the buttons is the host's job.

use crate::actions::EditorAction;
use crate::error::OptionsError;
use crate::options::EditorOptions;
use crate::state::TextState;
use crate::types::Position;

/// Layout entry drawn as a divider between button groups.
pub const SEPARATOR: &str = "|";

/// A toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarButton {
    pub name: &'static str,
    /// Action or host command name, or a URL to open.
    pub action: &'static str,
    pub title: &'static str,
    /// Whether the button shows an active state.
    pub toggle: bool,
}

const fn button(name: &'static str, action: &'static str, title: &'static str, toggle: bool) -> ToolbarButton {
    ToolbarButton {
        name,
        action,
        title,
        toggle,
    }
}

pub const BUILT_IN_BUTTONS: [ToolbarButton; 23] = [
    button("bold", "toggleBold", "Bold", true),
    button("italic", "toggleItalic", "Italic", true),
    button("strikethrough", "toggleStrikethrough", "StrikeThrough", true),
    button("headingSmaller", "toggleHeadingSmaller", "Smaller Heading", false),
    button("headingBigger", "toggleHeadingBigger", "Bigger Heading", false),
    button("code", "toggleCodeBlock", "Code", false),
    button("quote", "toggleBlockquote", "Quote", true),
    button("unorderedList", "toggleUnorderedList", "Generic List", true),
    button("orderedList", "toggleOrderedList", "Numbered List", true),
    button("cleanBlock", "cleanBlock", "Clean block", false),
    button("link", "drawLink", "Create Link", false),
    button("image", "drawImage", "Insert Image", false),
    button("table", "drawTable", "Insert Table", false),
    button("horizontalRule", "drawHorizontalRule", "Insert Horizontal Line", false),
    button("preview", "togglePreview", "Toggle Preview", true),
    button("sideBySide", "toggleSideBySide", "Toggle Side by Side", true),
    button("fullscreen", "toggleFullScreen", "Toggle Fullscreen", true),
    button("guide", "https://simplemde.com/markdown-guide", "Markdown Guide", false),
    button("undo", "undo", "Undo", false),
    button("redo", "redo", "Redo", false),
    button("fontsizeBigger", "toggleFontsizeBigger", "Bigger Text in Editor", false),
    button("fontsizeSmaller", "toggleFontsizeSmaller", "Smaller Text in Editor", false),
    button("previewScrollLock", "toggleScrollLock", "Scroll Lock between Editor and Preview", true),
];

pub const DEFAULT_LAYOUT: [&str; 29] = [
    "fullscreen",
    "|",
    "undo",
    "redo",
    "|",
    "bold",
    "italic",
    "strikethrough",
    "code",
    "quote",
    "unorderedList",
    "orderedList",
    "|",
    "headingSmaller",
    "headingBigger",
    "cleanBlock",
    "link",
    "image",
    "table",
    "horizontalRule",
    "|",
    "fontsizeBigger",
    "fontsizeSmaller",
    "|",
    "preview",
    "sideBySide",
    "previewScrollLock",
    "|",
    "guide",
];

/// Look up a built-in button by name.
pub fn find_button(name: &str) -> Option<&'static ToolbarButton> {
    BUILT_IN_BUTTONS.iter().find(|b| b.name == name)
}

impl ToolbarButton {
    /// Title with the bound shortcut appended, e.g. `Bold (Ctrl-B)`.
    pub fn tooltip(&self, options: &EditorOptions, is_mac: bool) -> String {
        match options.shortcut_for(self.action) {
            Some(shortcut) => format!("{} ({})", self.title, shortcut.display(is_mac)),
            None => self.title.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItem {
    Separator,
    Button(&'static ToolbarButton),
}

/// Resolve layout names to toolbar items. Unknown names are an error.
pub fn resolve_layout<S: AsRef<str>>(layout: &[S]) -> Result<Vec<ToolbarItem>, OptionsError> {
    layout
        .iter()
        .map(|name| match name.as_ref() {
            SEPARATOR => Ok(ToolbarItem::Separator),
            other => find_button(other)
                .map(ToolbarItem::Button)
                .ok_or_else(|| OptionsError::UnknownButton(other.to_string())),
        })
        .collect()
}

/// Display modes the host tracks, for the buttons that toggle them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub preview: bool,
    pub side_by_side: bool,
    pub fullscreen: bool,
    pub scroll_lock: bool,
}

/// Active flag of every toggle button in `layout`, in layout order.
///
/// Formatting buttons follow the text state at the cursor, view buttons
/// follow `view`.
pub fn toolbar_active_states(
    state: &TextState,
    view: &ViewState,
    layout: &[ToolbarItem],
) -> Vec<(&'static str, bool)> {
    layout
        .iter()
        .filter_map(|item| match item {
            ToolbarItem::Button(b) if b.toggle => Some(*b),
            _ => None,
        })
        .map(|b| {
            let active = match b.action.parse::<EditorAction>() {
                Ok(action) => action.construct().is_some_and(|c| state.is_active(c)),
                Err(_) => match b.action {
                    "togglePreview" => view.preview,
                    "toggleSideBySide" => view.side_by_side,
                    "toggleFullScreen" => view.fullscreen,
                    "toggleScrollLock" => view.scroll_lock,
                    _ => false,
                },
            };
            (b.name, active)
        })
        .collect()
}

/// Status bar text for the caret.
pub fn status_text(pos: Position) -> String {
    format!("Line: {} | Column: {}", pos.line, pos.ch)
}
