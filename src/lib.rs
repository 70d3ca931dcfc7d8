//! Accessible selection controls for inline terminal UIs.
//!
//! The centerpiece is [`Dropdown`], a searchable single/multi-select control:
//! an explicit option registry, case-insensitive substring filtering,
//! insertion-ordered multi-selection rendered as removable tags, typeahead
//! for non-filterable controls, and full form participation (value encoding,
//! required validation, reset and blocked-submit focus).
//!
//! Hosts drive controls through structured events: raw terminal bytes are
//! normalized by [`parse_input_events`], pointer presses are pre-routed to a
//! [`PointerTarget`] by the host's own hit testing, and deferred work
//! (coalesced refreshes, post-removal focus transfer) is drained once per
//! host tick.
//!
//! # Public API Overview
//! - Build a [`Dropdown`] from [`DropdownConfig`] and a [`DropdownTheme`],
//!   register [`DropdownOption`]s, then `mount()`.
//! - Feed it [`InputEvent`]s and [`PointerEvent`]s; call `tick()` each frame.
//! - Register it with a [`Form`] to get submission encoding and validation.
//! - Anchor its floating listbox through an [`AnchorPositioner`].

#![allow(clippy::type_complexity)]

pub mod config;
pub mod logging;

pub mod core;
pub mod forms;
pub mod runtime;
pub mod theme;
pub mod widgets;

/// Selection widgets.
pub use crate::widgets::{
    Dropdown, DropdownConfig, DropdownOption, FilterEngine, FilterInput, OptionId, OptionRegistry,
    SelectionMode, SelectionState, Typeahead,
};
pub use crate::widgets::registry::ConfigError;

/// Styling hooks.
pub use crate::theme::{DropdownTheme, TagTheme};

/// Component traits and cursor metadata.
pub use crate::core::component::{Component, Focusable, FormParticipant};
pub use crate::core::cursor::CursorPos;

/// Keyboard input parsing and matching helpers.
pub use crate::core::input::{matches_key, parse_key, parse_text, KeyEventType};
pub use crate::core::input_event::{parse_input_events, InputEvent, PointerEvent, PointerTarget};

/// Keybinding configuration and default mappings.
pub use crate::core::keybindings::{
    default_select_keybindings_handle, KeyBinding, KeyId, SelectAction, SelectKeybindingsConfig,
    SelectKeybindingsHandle, DEFAULT_SELECT_KEYBINDINGS,
};

/// Form participation.
pub use crate::forms::{Form, FormData, ParticipantHandle, SubmitBlocked, Validity};

/// Floating listbox positioning.
pub use crate::runtime::anchor::{
    AnchorOptions, AnchorPositioner, AnchorRect, AnchorSubscription, AnchorUpdate, FixedPositioner,
    Placement,
};
pub use crate::runtime::focus::{ControlFocus, FocusTarget};
pub use crate::runtime::scheduler::{Liveness, Scheduler};

/// Returns whether a component exposes focus behavior via [`Focusable`].
pub fn is_focusable(component: &mut dyn Component) -> bool {
    component.as_focusable().is_some()
}

/// Grapheme-safe truncation helper.
pub use crate::core::text::utils::truncate_to_width;
/// Display width helper.
pub use crate::core::text::width::visible_width;
