//! Action execution against an editing surface.
//!
//! `execute_action` applies an `EditorAction` to any `MarkdownSurface`;
//! `dispatch` is the by-name entry point hosts wire toolbar buttons to, and
//! `handle_keydown` routes a key combination through the keymap.

use crate::actions::{EditorAction, KeyCombo, KeydownResult};
use crate::error::ActionError;
use crate::format::{
    HeadingDirection, InlineStyle, LinePrefix, MarkupTemplate, clean_block, cycle_heading,
    insert_markup, set_heading, toggle_code_block, toggle_inline, toggle_line_prefix,
};
use crate::options::{Command, EditorOptions, Keymap};
use crate::state::classify_at_cursor;
use crate::surface::MarkdownSurface;

/// Run `action` against `surface`.
///
/// `false` means the action found nothing to do and left the document alone.
pub fn execute_action<S: MarkdownSurface>(
    surface: &mut S,
    action: &EditorAction,
    options: &EditorOptions,
) -> bool {
    let changed = match *action {
        EditorAction::ToggleBold => toggle_inline(surface, InlineStyle::Bold),
        EditorAction::ToggleItalic => toggle_inline(surface, InlineStyle::Italic),
        EditorAction::ToggleStrikethrough => toggle_inline(surface, InlineStyle::Strikethrough),
        EditorAction::ToggleCodeBlock => toggle_code_block(surface, &options.fence_chars),
        EditorAction::ToggleBlockquote => toggle_line_prefix(surface, LinePrefix::Quote),
        EditorAction::ToggleUnorderedList => {
            toggle_line_prefix(surface, LinePrefix::UnorderedList)
        }
        EditorAction::ToggleOrderedList => toggle_line_prefix(surface, LinePrefix::OrderedList),
        EditorAction::ToggleHeadingSmaller => cycle_heading(surface, HeadingDirection::Smaller),
        EditorAction::ToggleHeadingBigger => cycle_heading(surface, HeadingDirection::Bigger),
        EditorAction::ToggleHeading(level) => set_heading(surface, level),
        EditorAction::CleanBlock => clean_block(surface),
        EditorAction::DrawLink => {
            let active = classify_at_cursor(surface).link;
            insert_markup(surface, &MarkupTemplate::LINK, &options.link_url, active)
        }
        EditorAction::DrawImage => {
            let active = classify_at_cursor(surface).image;
            insert_markup(surface, &MarkupTemplate::IMAGE, &options.image_url, active)
        }
        EditorAction::DrawTable => insert_markup(surface, &MarkupTemplate::TABLE, "", false),
        EditorAction::DrawHorizontalRule => {
            insert_markup(surface, &MarkupTemplate::HORIZONTAL_RULE, "", false)
        }
        EditorAction::Undo => surface.undo(),
        EditorAction::Redo => surface.redo(),
    };
    tracing::debug!(target: "tmd::action", %action, changed, "executed");
    changed
}

/// Run the action called `name`.
///
/// Fails fast with `EditorNotReady` when there is no surface or it isn't
/// initialized, before the name is looked at.
pub fn dispatch<S: MarkdownSurface>(
    name: &str,
    surface: Option<&mut S>,
    options: &EditorOptions,
) -> Result<bool, ActionError> {
    let Some(surface) = surface.filter(|s| s.is_ready()) else {
        tracing::debug!(target: "tmd::action", name, "editor not ready");
        return Err(ActionError::EditorNotReady);
    };
    let action: EditorAction = name.parse()?;
    Ok(execute_action(surface, &action, options))
}

/// Handle a keydown: run a bound formatting action, or report the host
/// command bound to the combo.
pub fn handle_keydown<S: MarkdownSurface>(
    surface: &mut S,
    keymap: &Keymap,
    combo: &KeyCombo,
    options: &EditorOptions,
) -> KeydownResult {
    match keymap.lookup(combo) {
        Some(Command::Action(action)) => {
            execute_action(surface, action, options);
            KeydownResult::Handled
        }
        Some(Command::Host(name)) => KeydownResult::Host(name.clone()),
        None => KeydownResult::NotHandled,
    }
}
