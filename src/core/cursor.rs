//! Cursor position metadata for rendered controls.

/// Cursor position relative to the lines a component returned from `render()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub row: usize,
    pub col: usize,
}
