//! Selection-control keybindings.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use once_cell::sync::Lazy;

use crate::core::input::matches_key;

/// Actions a selection control can be driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectAction {
    /// Move the active descendant to the next visible, enabled option.
    MoveNext,
    /// Move the active descendant to the previous visible, enabled option.
    MovePrev,
    /// Jump to the first visible, enabled option.
    MoveFirst,
    /// Jump to the last visible, enabled option.
    MoveLast,
    /// Confirm the active descendant (or a focused tag's removal).
    Confirm,
    /// Close the listbox without mutating the selection.
    Dismiss,
    /// Remove the focused tag.
    RemoveTag,
    /// Move focus to the next tag.
    TagNext,
    /// Move focus to the previous tag.
    TagPrev,
}

pub type KeyId = String;

#[derive(Debug, Clone)]
pub enum KeyBinding {
    Single(KeyId),
    Multiple(Vec<KeyId>),
}

impl KeyBinding {
    fn key_ids(&self) -> &[KeyId] {
        match self {
            KeyBinding::Single(id) => std::slice::from_ref(id),
            KeyBinding::Multiple(ids) => ids,
        }
    }
}

impl From<&str> for KeyBinding {
    fn from(value: &str) -> Self {
        KeyBinding::Single(value.to_string())
    }
}

impl From<Vec<&str>> for KeyBinding {
    fn from(value: Vec<&str>) -> Self {
        KeyBinding::Multiple(value.into_iter().map(|item| item.to_string()).collect())
    }
}

/// Default bindings. Both vertical and horizontal arrow pairs drive
/// next/prev so orientation-transposed hosts work unchanged; horizontal
/// arrows are claimed by the filter input's cursor (and by tag focus) before
/// the listbox sees them.
pub static DEFAULT_SELECT_KEYBINDINGS: Lazy<HashMap<SelectAction, Vec<KeyId>>> = Lazy::new(|| {
    use SelectAction::*;

    let mut map = HashMap::new();
    map.insert(MoveNext, vec!["down".to_string(), "right".to_string()]);
    map.insert(MovePrev, vec!["up".to_string(), "left".to_string()]);
    map.insert(MoveFirst, vec!["home".to_string()]);
    map.insert(MoveLast, vec!["end".to_string()]);
    map.insert(Confirm, vec!["enter".to_string(), "space".to_string()]);
    map.insert(Dismiss, vec!["escape".to_string()]);
    map.insert(
        RemoveTag,
        vec!["backspace".to_string(), "delete".to_string()],
    );
    map.insert(TagNext, vec!["right".to_string()]);
    map.insert(TagPrev, vec!["left".to_string()]);
    map
});

#[derive(Debug, Clone, Default)]
pub struct SelectKeybindingsConfig {
    entries: HashMap<SelectAction, KeyBinding>,
}

impl SelectKeybindingsConfig {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Override the bindings for one action.
    pub fn set<K: Into<KeyBinding>>(&mut self, action: SelectAction, keys: K) {
        self.entries.insert(action, keys.into());
    }

    /// Returns whether raw input matches an action, consulting overrides
    /// first and the default map otherwise.
    pub fn matches(&self, data: &str, action: SelectAction) -> bool {
        if let Some(binding) = self.entries.get(&action) {
            return binding
                .key_ids()
                .iter()
                .any(|key_id| matches_key(data, key_id));
        }
        DEFAULT_SELECT_KEYBINDINGS
            .get(&action)
            .is_some_and(|ids| ids.iter().any(|key_id| matches_key(data, key_id)))
    }
}

/// Shared, mutable keybinding configuration handle.
pub type SelectKeybindingsHandle = Arc<Mutex<SelectKeybindingsConfig>>;

/// Process-wide default handle; controls constructed without an explicit
/// handle share this one.
pub fn default_select_keybindings_handle() -> SelectKeybindingsHandle {
    static HANDLE: OnceLock<SelectKeybindingsHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| Arc::new(Mutex::new(SelectKeybindingsConfig::new())))
        .clone()
}
