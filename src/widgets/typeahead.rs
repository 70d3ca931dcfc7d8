//! Typeahead buffer with a pause-based reset.
//!
//! Time is injected so behavior is deterministic under test: callers pass the
//! event timestamp instead of the buffer reading a clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Typeahead {
    buffer: String,
    last_input: Option<Instant>,
    timeout: Duration,
}

impl Typeahead {
    pub fn new(timeout: Duration) -> Self {
        Self {
            buffer: String::new(),
            last_input: None,
            timeout,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Appends text, clearing first when the pause since the previous input
    /// exceeded the timeout. Returns the resulting buffer.
    pub fn push(&mut self, text: &str, now: Instant) -> &str {
        if let Some(last) = self.last_input {
            if now.duration_since(last) > self.timeout {
                self.buffer.clear();
            }
        }
        self.buffer.push_str(text);
        self.last_input = Some(now);
        &self.buffer
    }

    /// Restarts the buffer with just the latest text (used when the grown
    /// buffer stopped matching anything).
    pub fn restart_with(&mut self, text: &str, now: Instant) -> &str {
        self.buffer.clear();
        self.buffer.push_str(text);
        self.last_input = Some(now);
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.last_input = None;
    }
}

#[cfg(test)]
mod tests {
    use super::Typeahead;
    use std::time::{Duration, Instant};

    #[test]
    fn accumulates_within_the_timeout() {
        let mut typeahead = Typeahead::new(Duration::from_millis(1000));
        let start = Instant::now();
        typeahead.push("b", start);
        let buffer = typeahead.push("a", start + Duration::from_millis(300));
        assert_eq!(buffer, "ba");
    }

    #[test]
    fn a_pause_resets_the_buffer() {
        let mut typeahead = Typeahead::new(Duration::from_millis(1000));
        let start = Instant::now();
        typeahead.push("b", start);
        let buffer = typeahead.push("c", start + Duration::from_millis(1500));
        assert_eq!(buffer, "c");
    }

    #[test]
    fn restart_keeps_only_the_latest_text() {
        let mut typeahead = Typeahead::new(Duration::from_millis(1000));
        let start = Instant::now();
        typeahead.push("xy", start);
        assert_eq!(typeahead.restart_with("z", start), "z");
    }

    #[test]
    fn clear_empties_everything() {
        let mut typeahead = Typeahead::new(Duration::from_millis(1000));
        typeahead.push("a", Instant::now());
        typeahead.clear();
        assert_eq!(typeahead.buffer(), "");
    }
}
