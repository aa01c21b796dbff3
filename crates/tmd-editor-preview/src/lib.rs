//! tmd-editor-preview: keeps the rendered preview scrolled to the editor.
//!
//! The host renders Markdown to HTML itself. This crate only knows which
//! source line each top-level block starts on (`source_blocks`) and, once the
//! host has laid the blocks out, maps an editor line to a preview scroll
//! offset (`ScrollMap`).

pub mod blocks;
pub mod scroll;

pub use blocks::{default_md_options, source_blocks};
pub use scroll::ScrollMap;
