//! Multi-select tag strip: keyboard navigation and deterministic
//! post-removal focus.

use picker_tui::{
    parse_input_events, Component, Dropdown, DropdownConfig, DropdownOption, DropdownTheme,
    FocusTarget, FormParticipant, PointerEvent, PointerTarget,
};

fn feed(dropdown: &mut Dropdown, data: &str) {
    for event in parse_input_events(data) {
        dropdown.handle_event(&event);
    }
}

/// Multi-select with A, B and C all selected, closed, trigger focused.
fn abc_selected() -> Dropdown {
    let mut dropdown = Dropdown::new(
        DropdownConfig {
            multiple: true,
            ..DropdownConfig::default()
        },
        DropdownTheme::plain(),
    );
    dropdown.register_option(DropdownOption::new("A").value("a").selected());
    dropdown.register_option(DropdownOption::new("B").value("b").selected());
    dropdown.register_option(DropdownOption::new("C").value("c").selected());
    dropdown.mount().expect("valid configuration");
    dropdown
}

#[test]
fn left_arrow_enters_the_tag_strip_from_the_trigger() {
    let mut dropdown = abc_selected();
    feed(&mut dropdown, "\x1b[D");
    assert_eq!(dropdown.focus_target(), FocusTarget::Tag(2));
    feed(&mut dropdown, "\x1b[D");
    assert_eq!(dropdown.focus_target(), FocusTarget::Tag(1));
    feed(&mut dropdown, "\x1b[C");
    assert_eq!(dropdown.focus_target(), FocusTarget::Tag(2));
}

#[test]
fn leaving_the_strip_at_the_start_returns_to_the_trigger() {
    let mut dropdown = abc_selected();
    feed(&mut dropdown, "\x1b[D\x1b[D\x1b[D");
    assert_eq!(dropdown.focus_target(), FocusTarget::Tag(0));
    feed(&mut dropdown, "\x1b[D");
    assert_eq!(dropdown.focus_target(), FocusTarget::Trigger);
}

#[test]
fn removing_a_middle_tag_focuses_its_successor() {
    let mut dropdown = abc_selected();
    // Focus the B tag, then remove it with backspace.
    feed(&mut dropdown, "\x1b[D\x1b[D");
    assert_eq!(dropdown.focus_target(), FocusTarget::Tag(1));
    feed(&mut dropdown, "\x7f");

    assert_eq!(dropdown.form_values(), vec!["a".to_string(), "c".to_string()]);
    // Focus transfer is deferred one tick.
    assert!(dropdown.has_pending());
    dropdown.tick();
    assert_eq!(dropdown.focus_target(), FocusTarget::Tag(1));
    assert_eq!(dropdown.selected_options()[1].label, "C");
}

#[test]
fn removing_the_last_tag_focuses_the_new_last() {
    let mut dropdown = abc_selected();
    feed(&mut dropdown, "\x1b[D\x7f");
    dropdown.tick();
    assert_eq!(dropdown.focus_target(), FocusTarget::Tag(1));
    assert_eq!(dropdown.form_values(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn removing_every_tag_ends_on_the_trigger() {
    let mut dropdown = abc_selected();
    feed(&mut dropdown, "\x1b[D");
    for _ in 0..3 {
        feed(&mut dropdown, "\x7f");
        dropdown.tick();
    }
    assert_eq!(dropdown.focus_target(), FocusTarget::Trigger);
    assert!(dropdown.form_values().is_empty());
    assert_eq!(dropdown.selection_len(), 0);
}

#[test]
fn pointer_removal_follows_the_same_rule() {
    let mut dropdown = abc_selected();
    dropdown.handle_pointer(&PointerEvent::press(PointerTarget::TagRemove(0)));
    dropdown.tick();
    assert_eq!(dropdown.focus_target(), FocusTarget::Tag(0));
    assert_eq!(dropdown.selected_options()[0].label, "B");
}

#[test]
fn host_scheduler_drives_the_deferred_focus_transfer() {
    use picker_tui::Scheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    let scheduler = Scheduler::new();
    let dropdown = Rc::new(RefCell::new(abc_selected()));
    let liveness = dropdown.borrow().liveness();

    dropdown
        .borrow_mut()
        .handle_pointer(&PointerEvent::press(PointerTarget::TagRemove(1)));
    {
        let dropdown = Rc::clone(&dropdown);
        scheduler.defer(&liveness, Box::new(move || dropdown.borrow_mut().tick()));
    }
    scheduler.run_pending();
    assert_eq!(dropdown.borrow().focus_target(), FocusTarget::Tag(1));
}

#[test]
fn teardown_revokes_host_scheduled_work() {
    use picker_tui::Scheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    let scheduler = Scheduler::new();
    let dropdown = Rc::new(RefCell::new(abc_selected()));
    let liveness = dropdown.borrow().liveness();

    dropdown
        .borrow_mut()
        .handle_pointer(&PointerEvent::press(PointerTarget::TagRemove(0)));
    {
        let dropdown = Rc::clone(&dropdown);
        scheduler.defer(&liveness, Box::new(move || dropdown.borrow_mut().tick()));
    }
    dropdown.borrow_mut().teardown();
    scheduler.run_pending();
    // The deferred tick never ran; focus stayed wherever teardown left it.
    assert_eq!(dropdown.borrow().focus_target(), FocusTarget::Trigger);
}

#[test]
fn tag_row_disappears_when_the_selection_empties() {
    let mut dropdown = abc_selected();
    let lines = dropdown.render(60);
    assert!(lines[0].contains("[A ×]"));

    for index in (0..3).rev() {
        dropdown.handle_pointer(&PointerEvent::press(PointerTarget::TagRemove(index)));
        dropdown.tick();
    }
    let lines = dropdown.render(60);
    assert!(!lines[0].contains("×"));
}
