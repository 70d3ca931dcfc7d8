//! Selection widgets and their building blocks.

pub mod dropdown;
pub mod filter;
pub mod filter_input;
pub mod option;
pub mod registry;
pub mod selection;
pub mod tags;
pub mod typeahead;

pub use dropdown::{Dropdown, DropdownConfig};
pub use filter::FilterEngine;
pub use filter_input::FilterInput;
pub use option::{DropdownOption, OptionId};
pub use registry::{ConfigError, OptionRegistry, Registered};
pub use selection::{SelectionMode, SelectionState};
pub use tags::{focus_after_removal, render_tag_line};
pub use typeahead::Typeahead;
