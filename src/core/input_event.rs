//! Structured input events delivered to controls.
//!
//! Keyboard data arrives as raw terminal bytes and is normalized here. Pointer
//! data arrives pre-routed: the host hit-tests its rendered rows and reports
//! which logical part of a control was pressed, including presses that landed
//! outside the control entirely (which is what lets an open listbox dismiss
//! on an outside press).

use crate::core::input::{parse_key, parse_text, KeyEventType};

/// Input event delivered to components.
///
/// `raw` is the exact byte sequence received from the terminal (UTF-8 decoded)
/// when applicable; `key_id` is a normalized identifier for keybinding lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key {
        raw: String,
        key_id: String,
        event_type: KeyEventType,
    },
    Text {
        raw: String,
        text: String,
        event_type: KeyEventType,
    },
    Paste {
        raw: String,
        text: String,
    },
    Resize {
        columns: u16,
        rows: u16,
    },
    UnknownRaw {
        raw: String,
    },
}

/// Logical part of a control targeted by a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The control's trigger row.
    Trigger,
    /// The filter input row (filterable controls, open state).
    FilterInput,
    /// A listbox row, addressed by its index into the visible options.
    Option(usize),
    /// A selection tag body, addressed by selection-order index.
    Tag(usize),
    /// A selection tag's remove affordance, addressed by selection-order index.
    TagRemove(usize),
    /// A press outside both the control and its floating listbox.
    Outside,
}

/// Pointer event routed to a control by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn press(target: PointerTarget) -> Self {
        Self { target }
    }
}

/// Splits a raw terminal chunk into structured events.
///
/// Bracketed paste is honored; everything between the paste markers is carried
/// verbatim as one `Paste` event.
pub fn parse_input_events(data: &str) -> Vec<InputEvent> {
    if data.is_empty() {
        return Vec::new();
    }

    const PASTE_START: &str = "\x1b[200~";
    const PASTE_END: &str = "\x1b[201~";

    fn parse_non_paste(data: &str) -> Vec<InputEvent> {
        if data.is_empty() {
            return Vec::new();
        }

        if let Some(text) = parse_text(data) {
            return vec![InputEvent::Text {
                raw: data.to_string(),
                text,
                event_type: KeyEventType::Press,
            }];
        }

        if let Some(key_id) = parse_key(data) {
            return vec![InputEvent::Key {
                raw: data.to_string(),
                key_id,
                event_type: KeyEventType::Press,
            }];
        }

        vec![InputEvent::UnknownRaw {
            raw: data.to_string(),
        }]
    }

    let mut events = Vec::new();
    let mut rest = data;
    while let Some(start) = rest.find(PASTE_START) {
        events.extend(parse_non_paste(&rest[..start]));
        let body = &rest[start + PASTE_START.len()..];
        match body.find(PASTE_END) {
            Some(end) => {
                let raw_len = PASTE_START.len() + end + PASTE_END.len();
                events.push(InputEvent::Paste {
                    raw: rest[start..start + raw_len].to_string(),
                    text: body[..end].to_string(),
                });
                rest = &body[end + PASTE_END.len()..];
            }
            None => {
                // Unterminated paste marker: surface the remainder raw.
                events.push(InputEvent::UnknownRaw {
                    raw: rest.to_string(),
                });
                return events;
            }
        }
    }
    events.extend(parse_non_paste(rest));
    events
}
