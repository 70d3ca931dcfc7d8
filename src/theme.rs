//! Styling hooks.
//!
//! Widgets never emit escape codes themselves; every styled span goes through
//! a theme closure so hosts can plug in their own color stack (or none, in
//! tests).

pub struct TagTheme {
    pub normal: Box<dyn Fn(&str) -> String>,
    pub focused: Box<dyn Fn(&str) -> String>,
}

impl TagTheme {
    /// Identity theme: no styling at all.
    pub fn plain() -> Self {
        Self {
            normal: Box::new(|text| text.to_string()),
            focused: Box::new(|text| text.to_string()),
        }
    }
}

pub struct DropdownTheme {
    pub trigger: Box<dyn Fn(&str) -> String>,
    pub trigger_focused: Box<dyn Fn(&str) -> String>,
    pub placeholder: Box<dyn Fn(&str) -> String>,
    pub active_text: Box<dyn Fn(&str) -> String>,
    pub selected_mark: Box<dyn Fn(&str) -> String>,
    pub disabled_text: Box<dyn Fn(&str) -> String>,
    pub scroll_info: Box<dyn Fn(&str) -> String>,
    pub no_match: Box<dyn Fn(&str) -> String>,
    pub tags: TagTheme,
}

impl DropdownTheme {
    /// Identity theme: no styling at all.
    pub fn plain() -> Self {
        Self {
            trigger: Box::new(|text| text.to_string()),
            trigger_focused: Box::new(|text| text.to_string()),
            placeholder: Box::new(|text| text.to_string()),
            active_text: Box::new(|text| text.to_string()),
            selected_mark: Box::new(|text| text.to_string()),
            disabled_text: Box::new(|text| text.to_string()),
            scroll_info: Box::new(|text| text.to_string()),
            no_match: Box::new(|text| text.to_string()),
            tags: TagTheme::plain(),
        }
    }
}

impl Default for DropdownTheme {
    fn default() -> Self {
        Self::plain()
    }
}
