//! tmd-editor-core: Markdown formatting actions without framework dependencies.
//!
//! This crate provides:
//! - `MarkdownSurface` - the capabilities an editing component offers the actions
//! - `PlainEditor<T>` - field-based surface over any `TextBuffer + UndoManager`
//! - `EditorRope` / `UndoableBuffer` - ropey-backed storage with grouped undo
//! - A Markdown line highlighter producing the token stream actions classify
//! - Formatting actions, the text-state classifier and code-type resolver
//! - `EditorAction` dispatch, options, keymap and the toolbar model

pub mod actions;
pub mod code_type;
pub mod error;
pub mod execute;
pub mod format;
pub mod highlight;
pub mod options;
pub mod patterns;
pub mod state;
pub mod style;
pub mod surface;
pub mod text;
pub mod toolbar;
pub mod types;
pub mod undo;

pub use actions::{EditorAction, Key, KeyCombo, KeydownResult, Modifiers, Shortcut};
pub use code_type::{CodeType, resolve_code_type, resolve_code_type_at};
pub use error::{ActionError, OptionsError, ShortcutError};
pub use execute::{dispatch, execute_action, handle_keydown};
pub use highlight::{Highlighter, highlight};
pub use options::{Command, EditorOptions, Keymap};
pub use smol_str::SmolStr;
pub use state::{Construct, TextState, classify, classify_at_cursor};
pub use style::{LineTokens, StyleSet, Token};
pub use surface::{MarkdownSurface, PlainEditor};
pub use text::{EditorRope, TextBuffer};
pub use toolbar::{ToolbarButton, ToolbarItem, ViewState, status_text, toolbar_active_states};
pub use types::{IndentDirection, Position, Selection};
pub use undo::{UndoManager, UndoableBuffer};
