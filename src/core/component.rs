//! Component, Focusable, and FormParticipant traits.

use crate::core::input_event::{InputEvent, PointerEvent};
use crate::forms::validity::Validity;

/// Renderable control interface.
pub trait Component {
    /// Render to a list of lines at the given width.
    fn render(&mut self, width: usize) -> Vec<String>;

    /// Handle a keyboard/text input event.
    fn handle_event(&mut self, _event: &InputEvent) {}

    /// Handle a pre-routed pointer event.
    fn handle_pointer(&mut self, _event: &PointerEvent) {}

    /// Optional cursor position metadata for this component's last render.
    ///
    /// The cursor position is relative to the lines returned from `render()`.
    fn cursor_pos(&self) -> Option<crate::core::cursor::CursorPos> {
        None
    }

    /// Invalidate any cached state.
    fn invalidate(&mut self) {}

    /// Optional focusable behavior.
    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        None
    }

    /// Optional form-participation behavior.
    fn as_form_participant(&mut self) -> Option<&mut dyn FormParticipant> {
        None
    }
}

/// Focusable behavior for components that track focus.
pub trait Focusable {
    fn set_focused(&mut self, focused: bool);
    fn is_focused(&self) -> bool;
}

/// Form-participation contract shared by every form-associated control.
///
/// Mirrors native form-control semantics: values are encoded in selection
/// order, disabled controls report externally valid while keeping their true
/// validity introspectable, and a blocked submit is signaled through the
/// invalid notification channel rather than an error.
pub trait FormParticipant {
    /// Submission name; controls without a name contribute no form data.
    fn form_name(&self) -> Option<&str>;

    /// Ordered submission values. Valueless selections are excluded.
    fn form_values(&self) -> Vec<String>;

    /// True validity, independent of the disabled flag.
    fn validity(&self) -> Validity;

    /// Validity as reported to the owning form: disabled controls are always
    /// valid here.
    fn reported_validity(&self) -> Validity {
        if self.form_disabled() {
            Validity::default()
        } else {
            self.validity()
        }
    }

    fn form_disabled(&self) -> bool;

    /// Restore the mount-time state snapshot (ancestor form reset).
    fn form_reset(&mut self);

    /// Fire the control's invalid notification (blocked submit).
    fn notify_invalid(&mut self);

    /// Move focus to the control's primary interactive element so the user
    /// can correct a validation failure.
    fn focus_primary(&mut self);
}
