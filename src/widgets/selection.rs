//! Authoritative selection state.
//!
//! Selection is keyed by [`OptionId`], not value, so valueless options stay
//! selectable in the UI; the submission encoding maps ids to values and drops
//! the valueless ones at that boundary.

use crate::widgets::option::OptionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multiple,
}

/// Ordered set of selected options.
///
/// Multi-select preserves insertion order (it drives tag display order);
/// single-select holds at most one entry and replaces it atomically.
#[derive(Debug, Clone)]
pub struct SelectionState {
    mode: SelectionMode,
    selected: Vec<OptionId>,
    initial: Vec<OptionId>,
}

impl SelectionState {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: Vec::new(),
            initial: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Seeds the selection and captures the reset snapshot. Called once at
    /// mount with whichever options declared themselves pre-selected.
    pub fn seed(&mut self, ids: impl IntoIterator<Item = OptionId>) {
        self.selected.clear();
        for id in ids {
            match self.mode {
                SelectionMode::Single => {
                    // Last pre-selected wins, as in a native single select.
                    self.selected.clear();
                    self.selected.push(id);
                }
                SelectionMode::Multiple => {
                    if !self.selected.contains(&id) {
                        self.selected.push(id);
                    }
                }
            }
        }
        self.initial = self.selected.clone();
    }

    /// Adds (multi) or replaces (single). Returns whether anything changed.
    pub fn select(&mut self, id: OptionId) -> bool {
        match self.mode {
            SelectionMode::Single => {
                if self.selected.as_slice() == [id] {
                    return false;
                }
                self.selected.clear();
                self.selected.push(id);
                true
            }
            SelectionMode::Multiple => {
                if self.selected.contains(&id) {
                    return false;
                }
                self.selected.push(id);
                true
            }
        }
    }

    /// Removes from the set. Returns whether anything changed.
    pub fn deselect(&mut self, id: OptionId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|selected| *selected != id);
        self.selected.len() != before
    }

    /// Select or deselect based on current membership.
    pub fn toggle(&mut self, id: OptionId) -> bool {
        if self.is_selected(id) {
            self.deselect(id)
        } else {
            self.select(id)
        }
    }

    /// Restores the seed snapshot. Idempotent.
    pub fn reset(&mut self) {
        self.selected = self.initial.clone();
    }

    /// Drops selections whose option no longer exists. Used when a selected
    /// option is deregistered.
    pub fn retain_known(&mut self, exists: impl Fn(OptionId) -> bool) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| exists(*id));
        self.selected.len() != before
    }

    pub fn is_selected(&self, id: OptionId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in insertion order.
    pub fn ids(&self) -> &[OptionId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
