//! Which kind of code, if any, a line belongs to.

use smol_str::SmolStr;

use crate::style::Token;
use crate::surface::MarkdownSurface;
use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeType {
    /// Not code.
    None,
    /// An inline code span.
    Single,
    /// Inside, or a delimiter of, a fenced block.
    Fenced,
    /// An indented code block.
    Indented,
}

/// Resolve the code type of `line`, sampling inside its content.
///
/// Samples position 1, which reads the first character, or position 0 on an
/// empty line.
pub fn resolve_code_type<S: MarkdownSurface + ?Sized>(surface: &S, line: usize) -> CodeType {
    let ch = if surface.line_len(line) == 0 { 0 } else { 1 };
    resolve_code_type_at(surface, Position::new(line, ch))
}

/// Resolve the code type of `pos.line`, sampling the token at `pos`.
///
/// The last token of the line decides indented code first: hosts may leave
/// the leading whitespace of an indented block untagged.
pub fn resolve_code_type_at<S: MarkdownSurface + ?Sized>(surface: &S, pos: Position) -> CodeType {
    let last = surface.token_at(Position::new(pos.line, surface.line_len(pos.line)));
    if last.as_ref().is_some_and(Token::in_indented_code) {
        return CodeType::Indented;
    }
    let Some(sampled) = surface.token_at(pos) else {
        return CodeType::None;
    };
    if !sampled.styles.is_code() {
        return CodeType::None;
    }
    let last_fenced = last.is_some_and(|t| t.fence.is_some());
    if sampled.fence.is_some() || last_fenced || is_fence_line(surface, pos.line) {
        CodeType::Fenced
    } else {
        CodeType::Single
    }
}

/// Whether `line` is a fence delimiter line such as "```" or "~~~~".
pub fn is_fence_line<S: MarkdownSurface + ?Sized>(surface: &S, line: usize) -> bool {
    line < surface.line_count()
        && surface
            .token_at(Position::new(line, 1))
            .is_some_and(|t| t.is_fence_delimiter())
}

/// The fence run that opened the block `line` belongs to.
pub fn fence_run<S: MarkdownSurface + ?Sized>(surface: &S, line: usize) -> Option<SmolStr> {
    surface.token_at(Position::new(line, 1))?.fence
}
