//! Parent-held ordered option registry.
//!
//! Children register and deregister through explicit calls; there is no tree
//! walking or child discovery. The registry owns the entries and their
//! derived visibility; the consumer keeps mutating options through
//! [`OptionRegistry::update`], which is how programmatic `selected`/`value`
//! changes reach the parent control.

use thiserror::Error;

use crate::widgets::filter::FilterEngine;
use crate::widgets::option::{DropdownOption, OptionId};

/// Fatal configuration errors, surfaced at mount and never caught internally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("selection control mounted with zero options")]
    NoOptions,
    #[error("option {id} has an empty label")]
    MissingLabel { id: u64 },
}

/// One registered option plus derived state.
#[derive(Debug, Clone)]
pub struct Registered {
    pub id: OptionId,
    pub option: DropdownOption,
    /// Post-filter visibility; recomputed by `refresh`.
    pub visible: bool,
}

/// Ordered collection of registered options.
#[derive(Debug, Default)]
pub struct OptionRegistry {
    entries: Vec<Registered>,
    next_id: u64,
    dirty: bool,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an option at the end of the order. Returns its stable id.
    pub fn register(&mut self, option: DropdownOption) -> OptionId {
        self.register_at(self.entries.len(), option)
    }

    /// Registers an option at a specific position (composition order is the
    /// consumer's to declare).
    pub fn register_at(&mut self, index: usize, option: DropdownOption) -> OptionId {
        let id = OptionId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("option id overflowed u64");
        let index = index.min(self.entries.len());
        self.entries.insert(
            index,
            Registered {
                id,
                option,
                visible: true,
            },
        );
        self.dirty = true;
        id
    }

    /// Removes an option. Returns whether it was present.
    pub fn deregister(&mut self, id: OptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// Mutates one option in place and marks the registry dirty.
    /// Returns whether the id was found.
    pub fn update(&mut self, id: OptionId, mutate: impl FnOnce(&mut DropdownOption)) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) else {
            return false;
        };
        mutate(&mut entry.option);
        self.dirty = true;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Registered] {
        &self.entries
    }

    pub fn get(&self, id: OptionId) -> Option<&Registered> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn position(&self, id: OptionId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Entries passing the current filter, in registration order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &Registered> {
        self.entries.iter().filter(|entry| entry.visible)
    }

    /// Visible ids, in registration order.
    pub fn visible_ids(&self) -> Vec<OptionId> {
        self.visible_entries().map(|entry| entry.id).collect()
    }

    /// Whether a refresh is owed. Cleared by `refresh`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Recomputes derived state (visibility) against the filter. Order is
    /// already authoritative, so this is the whole synchronous rebuild.
    pub fn refresh(&mut self, filter: &FilterEngine) {
        for entry in &mut self.entries {
            entry.visible = filter.matches(&entry.option.label);
        }
        self.dirty = false;
    }

    /// Mount-time validation: a selection control with no choices, or an
    /// option without a label, is a consumer mistake.
    pub fn validate_mount(&self) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::NoOptions);
        }
        for entry in &self.entries {
            if entry.option.label.trim().is_empty() {
                return Err(ConfigError::MissingLabel { id: entry.id.raw() });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, OptionRegistry};
    use crate::widgets::filter::FilterEngine;
    use crate::widgets::option::DropdownOption;

    fn registry_with(labels: &[&str]) -> OptionRegistry {
        let mut registry = OptionRegistry::new();
        for label in labels {
            registry.register(DropdownOption::new(*label).value(label.to_lowercase()));
        }
        registry
    }

    #[test]
    fn registration_order_is_preserved() {
        let registry = registry_with(&["One", "Two", "Three"]);
        let labels: Vec<&str> = registry
            .entries()
            .iter()
            .map(|entry| entry.option.label.as_str())
            .collect();
        assert_eq!(labels, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn register_at_inserts_in_order() {
        let mut registry = registry_with(&["One", "Three"]);
        registry.register_at(1, DropdownOption::new("Two"));
        let labels: Vec<&str> = registry
            .entries()
            .iter()
            .map(|entry| entry.option.label.as_str())
            .collect();
        assert_eq!(labels, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut registry = OptionRegistry::new();
        let first = registry.register(DropdownOption::new("One"));
        assert!(registry.deregister(first));
        let second = registry.register(DropdownOption::new("Two"));
        assert_ne!(first, second);
        assert!(registry.get(first).is_none());
    }

    #[test]
    fn refresh_applies_the_filter_and_clears_dirty() {
        let mut registry = registry_with(&["Ten", "Eleven", "Twelve"]);
        let mut filter = FilterEngine::new();
        filter.set_query("en");

        assert!(registry.is_dirty());
        registry.refresh(&filter);
        assert!(!registry.is_dirty());

        let visible: Vec<&str> = registry
            .visible_entries()
            .map(|entry| entry.option.label.as_str())
            .collect();
        assert_eq!(visible, vec!["Ten", "Eleven"]);
    }

    #[test]
    fn mount_validation_rejects_empty_registry() {
        let registry = OptionRegistry::new();
        assert_eq!(registry.validate_mount(), Err(ConfigError::NoOptions));
    }

    #[test]
    fn mount_validation_rejects_missing_labels() {
        let mut registry = OptionRegistry::new();
        let id = registry.register(DropdownOption::new("  "));
        assert_eq!(
            registry.validate_mount(),
            Err(ConfigError::MissingLabel { id: id.raw() })
        );
    }
}
