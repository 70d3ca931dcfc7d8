//! Open/closed lifecycle against a positioning service: one subscription per
//! open, released exactly once.

use std::rc::Rc;

use picker_tui::{
    AnchorRect, Component, Dropdown, DropdownConfig, DropdownOption, DropdownTheme,
    FixedPositioner, Placement, PointerEvent, PointerTarget,
};

fn anchored_dropdown(positioner: &Rc<FixedPositioner>, row: usize) -> Dropdown {
    let mut dropdown = Dropdown::new(
        DropdownConfig {
            max_visible: 6,
            ..DropdownConfig::default()
        },
        DropdownTheme::plain(),
    );
    for label in ["One", "Two", "Three"] {
        dropdown.register_option(DropdownOption::new(label).value(label.to_lowercase()));
    }
    dropdown.set_positioner(positioner.clone());
    dropdown.set_anchor_rect(AnchorRect {
        col: 4,
        row,
        width: 30,
        height: 1,
    });
    dropdown.mount().expect("valid configuration");
    dropdown
}

#[test]
fn opening_subscribes_and_closing_releases() {
    let positioner = Rc::new(FixedPositioner::new(24));
    let mut dropdown = anchored_dropdown(&positioner, 5);

    assert_eq!(positioner.active_subscriptions(), 0);
    dropdown.open();
    assert_eq!(positioner.active_subscriptions(), 1);
    assert_eq!(dropdown.placement().unwrap().placement, Placement::Below);
    assert_eq!(dropdown.placement().unwrap().row, 6);

    dropdown.close();
    assert_eq!(positioner.active_subscriptions(), 0);
    assert!(dropdown.placement().is_none());
}

#[test]
fn a_short_viewport_flips_the_listbox_above() {
    let positioner = Rc::new(FixedPositioner::new(8));
    let mut dropdown = anchored_dropdown(&positioner, 6);
    dropdown.open();
    assert_eq!(dropdown.placement().unwrap().placement, Placement::Above);
}

#[test]
fn reopening_takes_a_fresh_subscription() {
    let positioner = Rc::new(FixedPositioner::new(24));
    let mut dropdown = anchored_dropdown(&positioner, 5);
    for _ in 0..3 {
        dropdown.open();
        dropdown.close();
    }
    assert_eq!(positioner.active_subscriptions(), 0);
    dropdown.open();
    assert_eq!(positioner.active_subscriptions(), 1);
}

#[test]
fn teardown_while_open_releases_exactly_once() {
    let positioner = Rc::new(FixedPositioner::new(24));
    let mut dropdown = anchored_dropdown(&positioner, 5);
    dropdown.open();
    assert_eq!(positioner.active_subscriptions(), 1);

    dropdown.teardown();
    assert_eq!(positioner.active_subscriptions(), 0);
    // Torn down controls ignore further lifecycle calls.
    dropdown.open();
    assert_eq!(positioner.active_subscriptions(), 0);
}

#[test]
fn outside_press_releases_the_subscription_too() {
    let positioner = Rc::new(FixedPositioner::new(24));
    let mut dropdown = anchored_dropdown(&positioner, 5);
    dropdown.open();
    dropdown.handle_pointer(&PointerEvent::press(PointerTarget::Outside));
    assert_eq!(positioner.active_subscriptions(), 0);
}
