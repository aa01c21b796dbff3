//! Error types for dispatch and configuration.
//!
//! Formatting actions themselves never fail: they clamp on malformed
//! Markdown and report "nothing changed" through their `bool` result.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors from dispatching a named action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    /// No editing component, or it isn't initialized yet.
    #[error("editor is not ready")]
    EditorNotReady,

    /// The name isn't one of the formatting actions.
    #[error("unknown action: {0}")]
    UnknownAction(SmolStr),
}

/// Errors from parsing a shortcut string such as `Shift-Cmd-H`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("empty shortcut")]
    Empty,

    #[error("unknown modifier: {0}")]
    UnknownModifier(SmolStr),

    #[error("unknown key: {0}")]
    UnknownKey(SmolStr),
}

/// Errors from loading or validating editor options.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OptionsError {
    /// Options JSON didn't deserialize.
    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),

    /// A toolbar layout entry names no built-in button.
    #[error("unknown toolbar button: {0}")]
    UnknownButton(String),

    #[error("invalid shortcut {shortcut:?} for {action}")]
    InvalidShortcut {
        action: String,
        shortcut: String,
        #[source]
        source: ShortcutError,
    },
}
