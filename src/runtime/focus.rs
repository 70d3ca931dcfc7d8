//! Control-level focus ownership.
//!
//! A composite control has several focus targets: the trigger, the filter
//! input while open, and each selection tag. `ControlFocus` tracks which one
//! currently owns focus and guarantees the target always refers to an element
//! that still exists.

/// Focusable part of a composite selection control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Trigger,
    FilterInput,
    /// A selection tag, addressed by selection-order index.
    Tag(usize),
}

/// Tracks the focused part of one control.
#[derive(Debug, Clone)]
pub struct ControlFocus {
    current: FocusTarget,
}

impl ControlFocus {
    pub fn new() -> Self {
        Self {
            current: FocusTarget::Trigger,
        }
    }

    pub fn current(&self) -> FocusTarget {
        self.current
    }

    pub fn set(&mut self, target: FocusTarget) {
        self.current = target;
    }

    /// Re-validates the target against the current tag count. A tag target
    /// past the end falls back to the last tag, or the trigger when no tags
    /// remain. Returns whether the target changed.
    pub fn clamp_tags(&mut self, tag_count: usize) -> bool {
        let FocusTarget::Tag(index) = self.current else {
            return false;
        };
        if index < tag_count {
            return false;
        }
        self.current = if tag_count == 0 {
            FocusTarget::Trigger
        } else {
            FocusTarget::Tag(tag_count - 1)
        };
        true
    }

    /// Moves tag focus one step, entering the tag strip from the trigger.
    /// `forward` walks toward the last tag. No wrapping: stepping past either
    /// end leaves the target unchanged (start edge returns to the trigger).
    pub fn step_tag(&mut self, forward: bool, tag_count: usize) {
        if tag_count == 0 {
            return;
        }
        self.current = match (self.current, forward) {
            (FocusTarget::Trigger, true) => FocusTarget::Tag(0),
            (FocusTarget::Trigger, false) => FocusTarget::Tag(tag_count - 1),
            (FocusTarget::Tag(index), true) if index + 1 < tag_count => FocusTarget::Tag(index + 1),
            (FocusTarget::Tag(index), false) if index > 0 => FocusTarget::Tag(index - 1),
            (FocusTarget::Tag(0), false) => FocusTarget::Trigger,
            (current, _) => current,
        };
    }
}

impl Default for ControlFocus {
    fn default() -> Self {
        Self::new()
    }
}
