//! Single-line filter input.
//!
//! A reduced text input: grapheme-aware cursor movement, word-wise deletion,
//! and paste with newlines stripped. Every value change is reported through
//! `on_change`, which is how the owning dropdown keeps its filter query in
//! sync.

use crate::core::component::{Component, Focusable};
use crate::core::cursor::CursorPos;
use crate::core::input_event::InputEvent;
use crate::core::text::utils::{
    grapheme_segments, is_punctuation_char, is_whitespace_char, truncate_to_width,
};
use crate::core::text::width::visible_width;

pub struct FilterInput {
    value: String,
    cursor: usize,
    focused: bool,
    prompt: String,
    on_change: Option<Box<dyn FnMut(&str)>>,
}

impl FilterInput {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            prompt: "/ ".to_string(),
            on_change: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
        self.emit_change();
    }

    pub fn clear(&mut self) {
        if self.value.is_empty() {
            return;
        }
        self.value.clear();
        self.cursor = 0;
        self.emit_change();
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn set_on_change(&mut self, handler: Option<Box<dyn FnMut(&str)>>) {
        self.on_change = handler;
    }

    fn emit_change(&mut self) {
        if let Some(handler) = self.on_change.as_mut() {
            handler(&self.value);
        }
    }

    fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.value.insert_str(self.cursor, text);
        self.cursor += text.len();
        self.emit_change();
    }

    fn prev_grapheme_start(&self) -> Option<usize> {
        if self.cursor == 0 {
            return None;
        }
        let before = &self.value[..self.cursor];
        grapheme_segments(before)
            .last()
            .map(|grapheme| self.cursor - grapheme.len())
    }

    fn next_grapheme_end(&self) -> Option<usize> {
        if self.cursor >= self.value.len() {
            return None;
        }
        grapheme_segments(&self.value[self.cursor..])
            .next()
            .map(|grapheme| self.cursor + grapheme.len())
    }

    fn delete_backward(&mut self) {
        if let Some(start) = self.prev_grapheme_start() {
            self.value.replace_range(start..self.cursor, "");
            self.cursor = start;
            self.emit_change();
        }
    }

    fn delete_forward(&mut self) {
        if let Some(end) = self.next_grapheme_end() {
            self.value.replace_range(self.cursor..end, "");
            self.emit_change();
        }
    }

    fn word_start_before_cursor(&self) -> usize {
        let mut boundary = self.cursor;
        let before = &self.value[..self.cursor];
        let mut graphemes: Vec<&str> = grapheme_segments(before).collect();

        let is_space = |segment: &str| segment.chars().any(is_whitespace_char);
        let is_punct = |segment: &str| segment.chars().any(is_punctuation_char);

        while let Some(last) = graphemes.last() {
            if is_space(last) {
                boundary -= last.len();
                graphemes.pop();
            } else {
                break;
            }
        }
        let in_punctuation = graphemes.last().is_some_and(|last| is_punct(last));
        while let Some(last) = graphemes.last() {
            let same_class = if in_punctuation {
                is_punct(last)
            } else {
                !is_space(last) && !is_punct(last)
            };
            if same_class {
                boundary -= last.len();
                graphemes.pop();
            } else {
                break;
            }
        }
        boundary
    }

    fn delete_word_backward(&mut self) {
        let start = self.word_start_before_cursor();
        if start < self.cursor {
            self.value.replace_range(start..self.cursor, "");
            self.cursor = start;
            self.emit_change();
        }
    }
}

impl Default for FilterInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for FilterInput {
    fn render(&mut self, width: usize) -> Vec<String> {
        let line = format!("{}{}", self.prompt, self.value);
        vec![truncate_to_width(&line, width, "", false)]
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Text { text, .. } => self.insert_text(text),
            InputEvent::Paste { text, .. } => {
                let cleaned = text.replace(['\r', '\n'], "");
                self.insert_text(&cleaned);
            }
            InputEvent::Key { key_id, .. } => match key_id.as_str() {
                "left" => {
                    if let Some(start) = self.prev_grapheme_start() {
                        self.cursor = start;
                    }
                }
                "right" => {
                    if let Some(end) = self.next_grapheme_end() {
                        self.cursor = end;
                    }
                }
                "home" | "ctrl+a" => self.cursor = 0,
                "end" | "ctrl+e" => self.cursor = self.value.len(),
                "backspace" => self.delete_backward(),
                "delete" => self.delete_forward(),
                "ctrl+w" | "alt+backspace" => self.delete_word_backward(),
                "ctrl+u" => {
                    self.value.replace_range(..self.cursor, "");
                    self.cursor = 0;
                    self.emit_change();
                }
                _ => {}
            },
            InputEvent::Resize { .. } | InputEvent::UnknownRaw { .. } => {}
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        if !self.focused {
            return None;
        }
        let col = visible_width(&self.prompt) + visible_width(&self.value[..self.cursor]);
        Some(CursorPos { row: 0, col })
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for FilterInput {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::FilterInput;
    use crate::core::component::{Component, Focusable};
    use crate::core::input::KeyEventType;
    use crate::core::input_event::InputEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn text(text: &str) -> InputEvent {
        InputEvent::Text {
            raw: text.to_string(),
            text: text.to_string(),
            event_type: KeyEventType::Press,
        }
    }

    fn key(key_id: &str) -> InputEvent {
        InputEvent::Key {
            raw: String::new(),
            key_id: key_id.to_string(),
            event_type: KeyEventType::Press,
        }
    }

    #[test]
    fn typing_reports_changes() {
        let mut input = FilterInput::new();
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let seen_ref = Rc::clone(&seen);
        input.set_on_change(Some(Box::new(move |value| {
            seen_ref.borrow_mut().push(value.to_string());
        })));

        input.handle_event(&text("e"));
        input.handle_event(&text("n"));
        assert_eq!(input.value(), "en");
        assert_eq!(seen.borrow().as_slice(), &["e".to_string(), "en".to_string()]);
    }

    #[test]
    fn cursor_moves_by_grapheme() {
        let mut input = FilterInput::new();
        input.handle_event(&text("a🙂b"));
        input.handle_event(&key("left"));
        input.handle_event(&key("left"));
        input.handle_event(&key("backspace"));
        assert_eq!(input.value(), "🙂b");
    }

    #[test]
    fn paste_strips_newlines() {
        let mut input = FilterInput::new();
        input.handle_event(&InputEvent::Paste {
            raw: String::new(),
            text: "two\nwords".to_string(),
        });
        assert_eq!(input.value(), "twowords");
    }

    #[test]
    fn word_delete_eats_one_word() {
        let mut input = FilterInput::new();
        input.handle_event(&text("one two"));
        input.handle_event(&key("ctrl+w"));
        assert_eq!(input.value(), "one ");
        input.handle_event(&key("ctrl+w"));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn cursor_pos_is_reported_only_while_focused() {
        let mut input = FilterInput::new();
        input.handle_event(&text("ab"));
        assert!(input.cursor_pos().is_none());
        input.set_focused(true);
        let pos = input.cursor_pos().expect("focused input exposes a cursor");
        assert_eq!(pos.row, 0);
        assert_eq!(pos.col, 4); // "/ " prompt plus two chars
    }

    #[test]
    fn render_prefixes_the_prompt() {
        let mut input = FilterInput::new();
        input.handle_event(&text("en"));
        assert_eq!(input.render(10), vec!["/ en".to_string()]);
    }
}
