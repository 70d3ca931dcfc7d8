//! Form controller: participant registration, reset/submit dispatch, and
//! submission encoding.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::component::FormParticipant;

/// Shared handle to a registered form-associated control.
pub type ParticipantHandle = Rc<RefCell<dyn FormParticipant>>;

/// Ordered name/value submission pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// All values submitted under one name, in selection order.
    pub fn values_for(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(entry_name, _)| entry_name == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

/// Why a submit did not produce form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitBlocked {
    /// Registration index of the first invalid participant.
    pub participant: usize,
    /// Its submission name, when it has one.
    pub name: Option<String>,
}

/// Owner of form-associated controls.
///
/// Registration order determines both validation order and submission
/// encoding order, mirroring document order in a native form.
#[derive(Default)]
pub struct Form {
    participants: Vec<ParticipantHandle>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, participant: ParticipantHandle) {
        self.participants.push(participant);
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Ancestor form reset: every participant reverts to its mount snapshot.
    pub fn reset(&mut self) {
        for participant in &self.participants {
            participant.borrow_mut().form_reset();
        }
    }

    /// Returns whether every participant reports valid, firing the invalid
    /// notification on each one that does not.
    pub fn report_validity(&mut self) -> bool {
        let mut all_valid = true;
        for participant in &self.participants {
            let mut participant = participant.borrow_mut();
            if !participant.reported_validity().valid() {
                participant.notify_invalid();
                all_valid = false;
            }
        }
        all_valid
    }

    /// Attempts submission. The first invalid participant blocks it, is
    /// notified, and receives focus so the user can correct it.
    pub fn submit(&mut self) -> Result<FormData, SubmitBlocked> {
        for (index, participant) in self.participants.iter().enumerate() {
            let mut participant = participant.borrow_mut();
            if !participant.reported_validity().valid() {
                participant.notify_invalid();
                participant.focus_primary();
                return Err(SubmitBlocked {
                    participant: index,
                    name: participant.form_name().map(str::to_string),
                });
            }
        }

        let mut data = FormData::default();
        for participant in &self.participants {
            let participant = participant.borrow();
            if participant.form_disabled() {
                continue;
            }
            let Some(name) = participant.form_name() else {
                continue;
            };
            let name = name.to_string();
            for value in participant.form_values() {
                data.entries.push((name.clone(), value));
            }
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::{Form, ParticipantHandle};
    use crate::core::component::FormParticipant;
    use crate::forms::validity::Validity;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeControl {
        name: Option<String>,
        values: Vec<String>,
        required: bool,
        disabled: bool,
        reset_calls: usize,
        invalid_calls: usize,
        focus_calls: usize,
    }

    impl FormParticipant for FakeControl {
        fn form_name(&self) -> Option<&str> {
            self.name.as_deref()
        }

        fn form_values(&self) -> Vec<String> {
            self.values.clone()
        }

        fn validity(&self) -> Validity {
            Validity {
                value_missing: self.required && self.values.is_empty(),
            }
        }

        fn form_disabled(&self) -> bool {
            self.disabled
        }

        fn form_reset(&mut self) {
            self.reset_calls += 1;
        }

        fn notify_invalid(&mut self) {
            self.invalid_calls += 1;
        }

        fn focus_primary(&mut self) {
            self.focus_calls += 1;
        }
    }

    fn handle(control: FakeControl) -> (Rc<RefCell<FakeControl>>, ParticipantHandle) {
        let control = Rc::new(RefCell::new(control));
        let participant: ParticipantHandle = control.clone();
        (control, participant)
    }

    #[test]
    fn submit_encodes_named_values_in_registration_order() {
        let mut form = Form::new();
        let (_, first) = handle(FakeControl {
            name: Some("fruit".to_string()),
            values: vec!["two".to_string(), "one".to_string()],
            ..FakeControl::default()
        });
        let (_, second) = handle(FakeControl {
            name: Some("color".to_string()),
            values: vec!["red".to_string()],
            ..FakeControl::default()
        });
        form.register(first);
        form.register(second);

        let data = form.submit().expect("form is valid");
        assert_eq!(
            data.entries(),
            &[
                ("fruit".to_string(), "two".to_string()),
                ("fruit".to_string(), "one".to_string()),
                ("color".to_string(), "red".to_string()),
            ]
        );
        assert_eq!(data.values_for("fruit"), vec!["two", "one"]);
    }

    #[test]
    fn unnamed_and_disabled_controls_contribute_nothing() {
        let mut form = Form::new();
        let (_, unnamed) = handle(FakeControl {
            values: vec!["x".to_string()],
            ..FakeControl::default()
        });
        let (_, disabled) = handle(FakeControl {
            name: Some("off".to_string()),
            values: vec!["y".to_string()],
            disabled: true,
            ..FakeControl::default()
        });
        form.register(unnamed);
        form.register(disabled);

        let data = form.submit().expect("nothing blocks");
        assert!(data.entries().is_empty());
    }

    #[test]
    fn invalid_required_control_blocks_submit_and_gets_focus() {
        let mut form = Form::new();
        let (control, participant) = handle(FakeControl {
            name: Some("fruit".to_string()),
            required: true,
            ..FakeControl::default()
        });
        form.register(participant);

        let blocked = form.submit().expect_err("required and empty");
        assert_eq!(blocked.participant, 0);
        assert_eq!(blocked.name.as_deref(), Some("fruit"));
        assert_eq!(control.borrow().invalid_calls, 1);
        assert_eq!(control.borrow().focus_calls, 1);
    }

    #[test]
    fn disabled_controls_report_valid_even_when_required() {
        let mut form = Form::new();
        let (control, participant) = handle(FakeControl {
            name: Some("fruit".to_string()),
            required: true,
            disabled: true,
            ..FakeControl::default()
        });
        form.register(participant);

        assert!(form.report_validity());
        assert!(form.submit().is_ok());
        // True validity stays introspectable.
        assert!(!control.borrow().validity().valid());
    }

    #[test]
    fn reset_reaches_every_participant() {
        let mut form = Form::new();
        let (first, first_handle) = handle(FakeControl::default());
        let (second, second_handle) = handle(FakeControl::default());
        form.register(first_handle);
        form.register(second_handle);

        form.reset();
        assert_eq!(first.borrow().reset_calls, 1);
        assert_eq!(second.borrow().reset_calls, 1);
    }
}
