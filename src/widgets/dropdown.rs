//! Searchable single/multi-select dropdown.
//!
//! The composite control: an option registry, a filter engine, selection
//! state, tag strip, typeahead, and an open/closed listbox, arbitrated behind
//! one `Component`. Hosts drive it with structured input events and pre-routed
//! pointer events, drain its deferred work with [`Dropdown::tick`], and read
//! its submission state through `FormParticipant`.
//!
//! Input arbitration, in priority order:
//! - closed + tag focused: tag navigation and removal;
//! - closed + trigger focused: horizontal arrows enter the tag strip when
//!   tags exist, everything else that maps to navigation or confirm opens;
//! - open + filter input focused: vertical arrows, enter and escape drive the
//!   listbox, all remaining keys belong to the input's cursor;
//! - open otherwise: full listbox navigation, confirm and dismiss.

use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::EnvConfig;
use crate::core::component::{Component, Focusable, FormParticipant};
use crate::core::cursor::CursorPos;
use crate::core::input::KeyEventType;
use crate::core::input_event::{InputEvent, PointerEvent, PointerTarget};
use crate::core::keybindings::{
    default_select_keybindings_handle, SelectAction, SelectKeybindingsHandle,
};
use crate::core::text::utils::truncate_to_width;
use crate::forms::validity::Validity;
use crate::logging;
use crate::runtime::anchor::{
    AnchorOptions, AnchorPositioner, AnchorRect, AnchorSubscription, AnchorUpdate,
};
use crate::runtime::focus::{ControlFocus, FocusTarget};
use crate::runtime::scheduler::Liveness;
use crate::theme::DropdownTheme;
use crate::widgets::filter::FilterEngine;
use crate::widgets::filter_input::FilterInput;
use crate::widgets::option::{DropdownOption, OptionId};
use crate::widgets::registry::{ConfigError, OptionRegistry, Registered};
use crate::widgets::selection::{SelectionMode, SelectionState};
use crate::widgets::tags::{focus_after_removal, render_tag_line};
use crate::widgets::typeahead::Typeahead;

use std::cell::Cell;

/// Construction-time configuration.
#[derive(Debug, Clone)]
pub struct DropdownConfig {
    pub multiple: bool,
    /// Explicit filterability; `None` means automatic, based on the option
    /// count at mount against the filter threshold.
    pub filterable: Option<bool>,
    pub required: bool,
    pub disabled: bool,
    /// Submission name. A nameless control contributes no form data.
    pub name: Option<String>,
    pub placeholder: String,
    /// Listbox window height in rows.
    pub max_visible: usize,
    pub filter_threshold: Option<usize>,
    pub typeahead_timeout_ms: Option<u64>,
    /// Discard the filter query when the listbox closes. Off by default: the
    /// query survives a close/reopen cycle.
    pub clear_query_on_close: bool,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            multiple: false,
            filterable: None,
            required: false,
            disabled: false,
            name: None,
            placeholder: "Select…".to_string(),
            max_visible: 8,
            filter_threshold: None,
            typeahead_timeout_ms: None,
            clear_query_on_close: false,
        }
    }
}

/// Work queued for the next tick.
enum Deferred {
    /// Coalesced registry recompute after structural mutations.
    Refresh,
    /// Post-removal focus transfer, one tick after the removal.
    Focus(FocusTarget),
}

pub struct Dropdown {
    config: DropdownConfig,
    theme: DropdownTheme,
    registry: OptionRegistry,
    filter: FilterEngine,
    filter_input: FilterInput,
    selection: SelectionState,
    typeahead: Typeahead,
    focus: ControlFocus,
    keybindings: SelectKeybindingsHandle,
    env: EnvConfig,
    liveness: Liveness,

    mounted: bool,
    open: bool,
    focused: bool,
    filterable: bool,
    active: Option<OptionId>,
    pending: Vec<Deferred>,

    positioner: Option<Rc<dyn AnchorPositioner>>,
    anchor_rect: AnchorRect,
    anchor_sub: Option<AnchorSubscription>,
    placement: Rc<Cell<Option<AnchorUpdate>>>,

    on_change: Option<Box<dyn FnMut(Vec<DropdownOption>)>>,
    on_open: Option<Box<dyn FnMut()>>,
    on_close: Option<Box<dyn FnMut()>>,
    on_invalid: Option<Box<dyn FnMut()>>,
}

impl Dropdown {
    pub fn new(config: DropdownConfig, theme: DropdownTheme) -> Self {
        let mode = if config.multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        };
        let env = EnvConfig::from_env();
        let timeout = env.effective_typeahead_timeout_ms(config.typeahead_timeout_ms);
        Self {
            config,
            theme,
            registry: OptionRegistry::new(),
            filter: FilterEngine::new(),
            filter_input: FilterInput::new(),
            selection: SelectionState::new(mode),
            typeahead: Typeahead::new(Duration::from_millis(timeout)),
            focus: ControlFocus::new(),
            keybindings: default_select_keybindings_handle(),
            env,
            liveness: Liveness::new(),
            mounted: false,
            open: false,
            focused: false,
            filterable: false,
            active: None,
            pending: Vec::new(),
            positioner: None,
            anchor_rect: AnchorRect::default(),
            anchor_sub: None,
            placement: Rc::new(Cell::new(None)),
            on_change: None,
            on_open: None,
            on_close: None,
            on_invalid: None,
        }
    }

    pub fn with_keybindings(mut self, handle: SelectKeybindingsHandle) -> Self {
        self.keybindings = handle;
        self
    }

    pub fn set_positioner(&mut self, positioner: Rc<dyn AnchorPositioner>) {
        self.positioner = Some(positioner);
    }

    pub fn set_anchor_rect(&mut self, rect: AnchorRect) {
        self.anchor_rect = rect;
    }

    /// Last placement reported by the positioner, while open.
    pub fn placement(&self) -> Option<AnchorUpdate> {
        self.placement.get()
    }

    pub fn set_on_change(&mut self, handler: Option<Box<dyn FnMut(Vec<DropdownOption>)>>) {
        self.on_change = handler;
    }

    pub fn set_on_open(&mut self, handler: Option<Box<dyn FnMut()>>) {
        self.on_open = handler;
    }

    pub fn set_on_close(&mut self, handler: Option<Box<dyn FnMut()>>) {
        self.on_close = handler;
    }

    pub fn set_on_invalid(&mut self, handler: Option<Box<dyn FnMut()>>) {
        self.on_invalid = handler;
    }

    // ---- option registration -------------------------------------------

    /// Registers an option at the end of the order.
    pub fn register_option(&mut self, option: DropdownOption) -> OptionId {
        self.register_option_at(self.registry.len(), option)
    }

    /// Registers an option at an explicit position.
    pub fn register_option_at(&mut self, index: usize, option: DropdownOption) -> OptionId {
        let preselected = option.selected;
        let id = self.registry.register_at(index, option);
        // Before mount, seeding handles pre-selection in one pass. Change
        // notifications are reserved for user interaction, so none fires here.
        if preselected && self.mounted && self.selection.select(id) {
            self.sync_selected_flags();
        }
        self.queue(Deferred::Refresh);
        id
    }

    /// Removes an option, dropping it from the selection if needed and
    /// reassigning the active descendant to the nearest surviving option.
    pub fn deregister_option(&mut self, id: OptionId) -> bool {
        let position = self.registry.position(id);
        if !self.registry.deregister(id) {
            return false;
        }
        if self.active == Some(id) {
            let index = position.unwrap_or(0).min(self.registry.len());
            self.active = self.nearest_navigable(index);
            if self.active.is_none() && self.open {
                logging::invariant_recovered("dropdown", "active option deregistered, none left");
            }
        }
        let registry = &self.registry;
        self.selection.retain_known(|sid| registry.get(sid).is_some());
        self.focus.clamp_tags(self.selection.len());
        self.queue(Deferred::Refresh);
        true
    }

    /// Mutates one option in place. Changes to its `selected` flag propagate
    /// into the selection state; everything else takes effect on the next
    /// refresh.
    pub fn update_option(
        &mut self,
        id: OptionId,
        mutate: impl FnOnce(&mut DropdownOption),
    ) -> bool {
        if !self.registry.update(id, mutate) {
            return false;
        }
        let now_selected = self
            .registry
            .get(id)
            .is_some_and(|entry| entry.option.selected);
        // Programmatic assignment: selection state follows the flag, but no
        // change notification fires (those are for user interaction only).
        if now_selected != self.selection.is_selected(id) {
            let changed = if now_selected {
                self.selection.select(id)
            } else {
                self.selection.deselect(id)
            };
            if changed {
                self.sync_selected_flags();
            }
        }
        self.focus.clamp_tags(self.selection.len());
        self.queue(Deferred::Refresh);
        true
    }

    // ---- lifecycle ------------------------------------------------------

    /// Validates configuration, resolves automatic filterability, and seeds
    /// the selection (plus its reset snapshot) from pre-selected options.
    pub fn mount(&mut self) -> Result<(), ConfigError> {
        self.registry.validate_mount()?;

        let threshold = self
            .env
            .effective_filter_threshold(self.config.filter_threshold);
        self.filterable = self
            .config
            .filterable
            .unwrap_or(self.registry.len() > threshold);

        let timeout = self
            .env
            .effective_typeahead_timeout_ms(self.config.typeahead_timeout_ms);
        self.typeahead = Typeahead::new(Duration::from_millis(timeout));

        let preselected: Vec<OptionId> = self
            .registry
            .entries()
            .iter()
            .filter(|entry| entry.option.selected)
            .map(|entry| entry.id)
            .collect();
        self.selection.seed(preselected);
        self.sync_selected_flags();
        self.registry.refresh(&self.filter);
        self.mounted = true;
        Ok(())
    }

    pub fn open(&mut self) {
        if self.open || self.config.disabled || !self.mounted {
            return;
        }
        if self.registry.is_dirty() {
            self.registry.refresh(&self.filter);
        }
        self.open = true;
        self.active = self.initial_active();
        if self.filterable {
            self.focus.set(FocusTarget::FilterInput);
            self.filter_input.set_focused(true);
        }
        self.subscribe_anchor();
        logging::trace_transition("dropdown", "open");
        if let Some(handler) = self.on_open.as_mut() {
            handler();
        }
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.active = None;
        if let Some(mut subscription) = self.anchor_sub.take() {
            subscription.unsubscribe();
        }
        self.placement.set(None);
        self.typeahead.clear();
        if self.config.clear_query_on_close {
            self.filter_input.clear();
            self.filter.clear();
            self.registry.refresh(&self.filter);
        }
        self.filter_input.set_focused(false);
        self.focus.set(FocusTarget::Trigger);
        logging::trace_transition("dropdown", "close");
        if let Some(handler) = self.on_close.as_mut() {
            handler();
        }
    }

    /// Tears the control down: revokes pending deferred work and releases the
    /// anchor subscription (at most once, counting the close path).
    pub fn teardown(&mut self) {
        self.liveness.revoke();
        self.close();
        self.pending.clear();
        self.mounted = false;
    }

    /// Liveness flag for host-level schedulers; work guarded by it becomes a
    /// no-op after teardown.
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    // ---- deferred work --------------------------------------------------

    fn queue(&mut self, task: Deferred) {
        if matches!(task, Deferred::Refresh)
            && self.pending.iter().any(|t| matches!(t, Deferred::Refresh))
        {
            return;
        }
        self.pending.push(task);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drains deferred work queued before this call. No-op after teardown.
    pub fn tick(&mut self) {
        if !self.liveness.is_live() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        for task in pending {
            match task {
                Deferred::Refresh => self.apply_refresh(),
                Deferred::Focus(target) => {
                    self.focus.set(target);
                    self.focus.clamp_tags(self.selection.len());
                }
            }
        }
    }

    fn apply_refresh(&mut self) {
        self.registry.refresh(&self.filter);
        self.reassign_active();
        self.focus.clamp_tags(self.selection.len());
    }

    // ---- state accessors ------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    pub fn query(&self) -> &str {
        self.filter.query()
    }

    pub fn focus_target(&self) -> FocusTarget {
        self.focus.current()
    }

    pub fn active_option(&self) -> Option<&DropdownOption> {
        self.active
            .and_then(|id| self.registry.get(id))
            .map(|entry| &entry.option)
    }

    /// Selected options in selection order.
    pub fn selected_options(&self) -> Vec<DropdownOption> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.registry.get(*id))
            .map(|entry| entry.option.clone())
            .collect()
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    /// Labels visible under the current filter, in registration order.
    pub fn visible_labels(&self) -> Vec<String> {
        self.registry
            .visible_entries()
            .map(|entry| entry.option.label.clone())
            .collect()
    }

    // ---- selection internals -------------------------------------------

    fn sync_selected_flags(&mut self) {
        let ids: Vec<OptionId> = self.registry.entries().iter().map(|entry| entry.id).collect();
        for id in ids {
            let selected = self.selection.is_selected(id);
            self.registry.update(id, |option| option.selected = selected);
        }
    }

    fn fire_change(&mut self) {
        let selected = self.selected_options();
        if let Some(handler) = self.on_change.as_mut() {
            handler(selected);
        }
    }

    fn confirm_active(&mut self) {
        let Some(id) = self.active else {
            return;
        };
        let Some(entry) = self.registry.get(id) else {
            return;
        };
        if entry.option.disabled {
            return;
        }
        let changed = match self.selection.mode() {
            SelectionMode::Single => self.selection.select(id),
            SelectionMode::Multiple => self.selection.toggle(id),
        };
        if changed {
            self.sync_selected_flags();
            self.queue(Deferred::Refresh);
            self.fire_change();
        }
        if self.selection.mode() == SelectionMode::Single {
            self.close();
        }
    }

    fn remove_tag(&mut self, index: usize) {
        let Some(&id) = self.selection.ids().get(index) else {
            return;
        };
        self.selection.deselect(id);
        self.registry.update(id, |option| option.selected = false);
        self.queue(Deferred::Refresh);
        let target = match focus_after_removal(index, self.selection.len()) {
            Some(tag) => FocusTarget::Tag(tag),
            None => FocusTarget::Trigger,
        };
        self.queue(Deferred::Focus(target));
        self.fire_change();
    }

    // ---- active descendant ----------------------------------------------

    /// Visible, enabled option ids in registration order.
    fn nav_ids(&self) -> Vec<OptionId> {
        self.registry
            .visible_entries()
            .filter(|entry| !entry.option.disabled)
            .map(|entry| entry.id)
            .collect()
    }

    /// First selected visible option, else first visible enabled option.
    fn initial_active(&self) -> Option<OptionId> {
        let nav = self.nav_ids();
        nav.iter()
            .copied()
            .find(|id| self.selection.is_selected(*id))
            .or_else(|| nav.first().copied())
    }

    /// Nearest navigable option scanning forward from a registry index, then
    /// backward.
    fn nearest_navigable(&self, index: usize) -> Option<OptionId> {
        let entries = self.registry.entries();
        let index = index.min(entries.len());
        entries[index..]
            .iter()
            .find(|entry| entry.visible && !entry.option.disabled)
            .map(|entry| entry.id)
            .or_else(|| {
                entries[..index]
                    .iter()
                    .rev()
                    .find(|entry| entry.visible && !entry.option.disabled)
                    .map(|entry| entry.id)
            })
    }

    fn reassign_active(&mut self) {
        if !self.open {
            self.active = None;
            return;
        }
        match self.active {
            None => self.active = self.initial_active(),
            Some(id) => {
                let navigable = self
                    .registry
                    .get(id)
                    .is_some_and(|entry| entry.visible && !entry.option.disabled);
                if navigable {
                    return;
                }
                let replacement = match self.registry.position(id) {
                    Some(index) => self.nearest_navigable(index),
                    None => self.nav_ids().first().copied(),
                };
                logging::invariant_recovered("dropdown", "active option not navigable, reassigned");
                self.active = replacement;
            }
        }
    }

    fn move_active(&mut self, action: SelectAction) {
        let nav = self.nav_ids();
        if nav.is_empty() {
            self.active = None;
            return;
        }
        let position = self.active.and_then(|id| nav.iter().position(|x| *x == id));
        let next = match action {
            SelectAction::MoveFirst => 0,
            SelectAction::MoveLast => nav.len() - 1,
            SelectAction::MoveNext => match position {
                Some(p) => (p + 1) % nav.len(),
                None => 0,
            },
            SelectAction::MovePrev => match position {
                Some(p) => (p + nav.len() - 1) % nav.len(),
                None => nav.len() - 1,
            },
            _ => return,
        };
        self.active = Some(nav[next]);
    }

    // ---- input ----------------------------------------------------------

    /// Event entry point with an explicit timestamp (typeahead pause timing).
    pub fn handle_event_at(&mut self, event: &InputEvent, now: Instant) {
        if self.config.disabled {
            return;
        }
        match event {
            InputEvent::Key { raw, key_id, .. } => {
                self.handle_key(&raw.clone(), &key_id.clone());
            }
            InputEvent::Text { text, .. } => self.handle_text(&text.clone(), now),
            InputEvent::Paste { .. } => {
                if self.filterable && self.open
                    && self.focus.current() == FocusTarget::FilterInput
                {
                    self.filter_input.handle_event(event);
                    self.sync_filter_query();
                }
            }
            InputEvent::Resize { .. } | InputEvent::UnknownRaw { .. } => {}
        }
    }

    fn handle_key(&mut self, raw: &str, key_id: &str) {
        let handle = Arc::clone(&self.keybindings);
        let bindings = handle.lock().expect("select keybindings lock poisoned");

        if !self.open {
            match self.focus.current() {
                FocusTarget::Tag(index) => {
                    if bindings.matches(raw, SelectAction::RemoveTag) {
                        self.remove_tag(index);
                    } else if bindings.matches(raw, SelectAction::TagNext) {
                        self.focus.step_tag(true, self.selection.len());
                    } else if bindings.matches(raw, SelectAction::TagPrev) {
                        self.focus.step_tag(false, self.selection.len());
                    } else if bindings.matches(raw, SelectAction::Dismiss) {
                        self.focus.set(FocusTarget::Trigger);
                    }
                }
                _ => {
                    let tags = self.selection.len();
                    let horizontal = bindings.matches(raw, SelectAction::TagNext)
                        || bindings.matches(raw, SelectAction::TagPrev);
                    if self.config.multiple && tags > 0 && horizontal {
                        let forward = bindings.matches(raw, SelectAction::TagNext);
                        self.focus.step_tag(forward, tags);
                    } else if bindings.matches(raw, SelectAction::MoveNext)
                        || bindings.matches(raw, SelectAction::MovePrev)
                        || bindings.matches(raw, SelectAction::Confirm)
                    {
                        self.open();
                    }
                }
            }
            return;
        }

        if self.filterable && self.focus.current() == FocusTarget::FilterInput {
            match key_id {
                "down" => self.move_active(SelectAction::MoveNext),
                "up" => self.move_active(SelectAction::MovePrev),
                "enter" => self.confirm_active(),
                "escape" => self.close(),
                _ => {
                    // Everything else, horizontal arrows and home/end
                    // included, belongs to the input's cursor.
                    let event = InputEvent::Key {
                        raw: raw.to_string(),
                        key_id: key_id.to_string(),
                        event_type: KeyEventType::Press,
                    };
                    self.filter_input.handle_event(&event);
                    self.sync_filter_query();
                }
            }
            return;
        }

        if bindings.matches(raw, SelectAction::Dismiss) {
            self.close();
        } else if bindings.matches(raw, SelectAction::Confirm) {
            self.confirm_active();
        } else if bindings.matches(raw, SelectAction::MoveFirst) {
            self.move_active(SelectAction::MoveFirst);
        } else if bindings.matches(raw, SelectAction::MoveLast) {
            self.move_active(SelectAction::MoveLast);
        } else if bindings.matches(raw, SelectAction::MoveNext) {
            self.move_active(SelectAction::MoveNext);
        } else if bindings.matches(raw, SelectAction::MovePrev) {
            self.move_active(SelectAction::MovePrev);
        }
    }

    fn handle_text(&mut self, text: &str, now: Instant) {
        if self.filterable {
            if !self.open {
                self.open();
            }
            if self.focus.current() == FocusTarget::FilterInput {
                let event = InputEvent::Text {
                    raw: text.to_string(),
                    text: text.to_string(),
                    event_type: KeyEventType::Press,
                };
                self.filter_input.handle_event(&event);
                self.sync_filter_query();
            }
            return;
        }

        // Non-filterable: space confirms unless a typeahead is in flight.
        if text == " " && self.typeahead.buffer().is_empty() {
            if self.open {
                self.confirm_active();
            } else {
                self.open();
            }
            return;
        }
        if !self.open {
            self.open();
        }
        let buffer = self.typeahead.push(text, now).to_string();
        if !self.apply_typeahead(&buffer) {
            // The grown buffer matches nothing; retry with just this input.
            let restarted = self.typeahead.restart_with(text, now).to_string();
            self.apply_typeahead(&restarted);
        }
    }

    /// Moves the active descendant to the next label with the buffer as a
    /// case-insensitive prefix. A single-character buffer searches from the
    /// option after the active one, so repeats cycle through matches.
    fn apply_typeahead(&mut self, buffer: &str) -> bool {
        let needle = buffer.to_lowercase();
        let nav = self.nav_ids();
        if nav.is_empty() {
            return false;
        }
        let position = self.active.and_then(|id| nav.iter().position(|x| *x == id));
        let single_char = needle.chars().count() == 1;
        let begin = match position {
            Some(p) if single_char => p + 1,
            Some(p) => p,
            None => 0,
        };
        for offset in 0..nav.len() {
            let id = nav[(begin + offset) % nav.len()];
            let Some(entry) = self.registry.get(id) else {
                continue;
            };
            if entry.option.label.to_lowercase().starts_with(&needle) {
                self.active = Some(id);
                return true;
            }
        }
        false
    }

    fn sync_filter_query(&mut self) {
        if self.filter_input.value() == self.filter.query() {
            return;
        }
        self.filter.set_query(self.filter_input.value());
        self.registry.refresh(&self.filter);
        self.reassign_active();
    }

    fn subscribe_anchor(&mut self) {
        let Some(positioner) = self.positioner.clone() else {
            return;
        };
        let placement = Rc::clone(&self.placement);
        let rows = self.config.max_visible.max(1);
        let subscription = positioner.subscribe(
            self.anchor_rect,
            AnchorOptions {
                max_height: Some(rows),
                min_width: Some(self.anchor_rect.width),
                preferred: None,
            },
            Box::new(move |update| placement.set(Some(update))),
        );
        self.anchor_sub = Some(subscription);
    }

    // ---- rendering ------------------------------------------------------

    fn render_tags(&self, width: usize) -> Option<String> {
        if !self.config.multiple || self.selection.is_empty() {
            return None;
        }
        let labels: Vec<&str> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.registry.get(*id))
            .map(|entry| entry.option.label.as_str())
            .collect();
        let focused = match self.focus.current() {
            FocusTarget::Tag(index) => Some(index),
            _ => None,
        };
        Some(render_tag_line(&self.theme.tags, &labels, focused, width))
    }

    fn render_trigger(&self, width: usize) -> String {
        let summary = if self.config.multiple {
            match self.selection.len() {
                0 => None,
                n => Some(format!("{n} selected")),
            }
        } else {
            self.selection
                .ids()
                .first()
                .and_then(|id| self.registry.get(*id))
                .map(|entry| entry.option.label.clone())
        };
        let marker = if self.open { "▴" } else { "▾" };
        let body = match summary {
            Some(text) => truncate_to_width(&text, width.saturating_sub(2), "…", false),
            None => {
                let text =
                    truncate_to_width(&self.config.placeholder, width.saturating_sub(2), "…", false);
                (self.theme.placeholder)(&text)
            }
        };
        let line = format!("{body} {marker}");
        if self.focused && self.focus.current() == FocusTarget::Trigger {
            (self.theme.trigger_focused)(&line)
        } else {
            (self.theme.trigger)(&line)
        }
    }

    fn render_listbox(&self, width: usize) -> Vec<String> {
        let visible: Vec<&Registered> = self.registry.visible_entries().collect();
        if visible.is_empty() {
            return vec![(self.theme.no_match)("  No matching options")];
        }

        let max_visible = self.config.max_visible.max(1).min(visible.len());
        let active_index = self
            .active
            .and_then(|id| visible.iter().position(|entry| entry.id == id))
            .unwrap_or(0);
        let half = max_visible / 2;
        let start = if visible.len() <= max_visible {
            0
        } else {
            active_index
                .saturating_sub(half)
                .min(visible.len() - max_visible)
        };
        let end = (start + max_visible).min(visible.len());

        let mut lines = Vec::new();
        for index in start..end {
            let entry = visible[index];
            let mark = if entry.option.selected {
                (self.theme.selected_mark)("✓")
            } else {
                " ".to_string()
            };
            let label = truncate_to_width(&entry.option.label, width.saturating_sub(6), "…", false);
            let line = if self.active == Some(entry.id) {
                (self.theme.active_text)(&format!("→ {mark} {label}"))
            } else if entry.option.disabled {
                format!("  {}", (self.theme.disabled_text)(&format!("{mark} {label}")))
            } else {
                format!("  {mark} {label}")
            };
            lines.push(line);
        }

        if start > 0 || end < visible.len() {
            let scroll = format!("  ({}/{})", active_index + 1, visible.len());
            lines.push((self.theme.scroll_info)(&scroll));
        }
        lines
    }
}

impl Component for Dropdown {
    fn render(&mut self, width: usize) -> Vec<String> {
        if self.registry.is_dirty() {
            self.registry.refresh(&self.filter);
        }
        let mut lines = Vec::new();
        if let Some(tags) = self.render_tags(width) {
            lines.push(tags);
        }
        lines.push(self.render_trigger(width));
        if self.open {
            if self.filterable {
                lines.extend(self.filter_input.render(width));
            }
            lines.extend(self.render_listbox(width));
        }
        lines
    }

    fn handle_event(&mut self, event: &InputEvent) {
        self.handle_event_at(event, Instant::now());
    }

    fn handle_pointer(&mut self, event: &PointerEvent) {
        if self.config.disabled {
            return;
        }
        match event.target {
            PointerTarget::Trigger => {
                if self.open {
                    self.close();
                } else {
                    self.open();
                }
            }
            PointerTarget::FilterInput => {
                if self.open && self.filterable {
                    self.focus.set(FocusTarget::FilterInput);
                    self.filter_input.set_focused(true);
                }
            }
            PointerTarget::Option(index) => {
                if !self.open {
                    return;
                }
                let visible = self.registry.visible_ids();
                let Some(&id) = visible.get(index) else {
                    return;
                };
                if self
                    .registry
                    .get(id)
                    .is_some_and(|entry| entry.option.disabled)
                {
                    return;
                }
                self.active = Some(id);
                self.confirm_active();
            }
            PointerTarget::Tag(index) => {
                if index < self.selection.len() {
                    self.focus.set(FocusTarget::Tag(index));
                }
            }
            PointerTarget::TagRemove(index) => self.remove_tag(index),
            PointerTarget::Outside => {
                if self.open {
                    self.close();
                }
            }
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        if !(self.open && self.filterable && self.focus.current() == FocusTarget::FilterInput) {
            return None;
        }
        let offset = usize::from(self.config.multiple && !self.selection.is_empty()) + 1;
        self.filter_input
            .cursor_pos()
            .map(|pos| CursorPos {
                row: pos.row + offset,
                col: pos.col,
            })
    }

    fn invalidate(&mut self) {
        self.registry.mark_dirty();
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }

    fn as_form_participant(&mut self) -> Option<&mut dyn FormParticipant> {
        Some(self)
    }
}

impl Focusable for Dropdown {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            // Losing focus dismisses the listbox.
            self.close();
        }
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}

impl FormParticipant for Dropdown {
    fn form_name(&self) -> Option<&str> {
        self.config.name.as_deref()
    }

    /// Values in selection order; selected options without a value contribute
    /// nothing.
    fn form_values(&self) -> Vec<String> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.registry.get(*id))
            .filter_map(|entry| entry.option.value.clone())
            .collect()
    }

    fn validity(&self) -> Validity {
        Validity {
            value_missing: self.config.required && self.form_values().is_empty(),
        }
    }

    fn form_disabled(&self) -> bool {
        self.config.disabled
    }

    fn form_reset(&mut self) {
        self.selection.reset();
        self.sync_selected_flags();
        self.close();
        self.focus.clamp_tags(self.selection.len());
        self.queue(Deferred::Refresh);
    }

    fn notify_invalid(&mut self) {
        if let Some(handler) = self.on_invalid.as_mut() {
            handler();
        }
    }

    fn focus_primary(&mut self) {
        self.focused = true;
        if self.config.multiple && !self.selection.is_empty() {
            self.focus.set(FocusTarget::Tag(0));
        } else {
            self.focus.set(FocusTarget::Trigger);
        }
    }
}
