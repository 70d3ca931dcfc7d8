//! Option entity for selection controls.

/// One selectable choice.
///
/// Disabled options can never become selected through user input; the
/// programmatic mutation path is unrestricted. The post-filter visibility
/// flag lives on the registry entry, not here: visibility is derived state
/// owned by the parent control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub label: String,
    pub value: Option<String>,
    pub disabled: bool,
    pub selected: bool,
}

impl DropdownOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            disabled: false,
            selected: false,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// Stable identifier for a registered option.
///
/// Unique within one registry instance and never reused, so a stale id can
/// only miss, never alias a different option.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OptionId(pub(crate) u64);

impl OptionId {
    pub fn raw(self) -> u64 {
        self.0
    }
}
