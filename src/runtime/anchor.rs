//! Anchor-positioning service contract for floating listboxes.
//!
//! The positioner is an external collaborator: given an anchor rectangle and
//! layout options it reports a placement and keeps reporting as the host
//! viewport changes. Controls own at most one subscription at a time and
//! release it exactly once on close or teardown.

use std::cell::Cell;
use std::rc::Rc;

/// Anchor rectangle in host cells (columns/rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorRect {
    pub col: usize,
    pub row: usize,
    pub width: usize,
    pub height: usize,
}

/// Which side of the anchor the floating element landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Below,
    Above,
}

/// One placement report from the positioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorUpdate {
    pub col: usize,
    pub row: usize,
    pub placement: Placement,
}

/// Layout constraints passed along with a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorOptions {
    pub max_height: Option<usize>,
    pub min_width: Option<usize>,
    pub preferred: Option<Placement>,
}

/// Callback invoked on every placement change.
pub type AnchorCallback = Box<dyn FnMut(AnchorUpdate)>;

/// Positioning service consumed by the open/closed controller.
pub trait AnchorPositioner {
    fn subscribe(
        &self,
        anchor: AnchorRect,
        options: AnchorOptions,
        on_update: AnchorCallback,
    ) -> AnchorSubscription;
}

/// Live positioning subscription.
///
/// Releasing happens exactly once: either through [`AnchorSubscription::unsubscribe`]
/// or on drop, whichever comes first.
pub struct AnchorSubscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl AnchorSubscription {
    pub fn new(cancel: Box<dyn FnOnce()>) -> Self {
        Self {
            cancel: Some(cancel),
        }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for AnchorSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for AnchorSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchorSubscription")
            .field("released", &self.cancel.is_none())
            .finish()
    }
}

/// Deterministic positioner for hosts with a fixed viewport (and for tests).
///
/// Reports once at subscribe time: below the anchor when enough rows remain,
/// above otherwise. Tracks the number of live subscriptions so teardown
/// behavior is observable.
pub struct FixedPositioner {
    viewport_rows: usize,
    active: Rc<Cell<usize>>,
}

impl FixedPositioner {
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            viewport_rows,
            active: Rc::new(Cell::new(0)),
        }
    }

    /// Number of subscriptions that have not been released.
    pub fn active_subscriptions(&self) -> usize {
        self.active.get()
    }
}

impl AnchorPositioner for FixedPositioner {
    fn subscribe(
        &self,
        anchor: AnchorRect,
        options: AnchorOptions,
        mut on_update: AnchorCallback,
    ) -> AnchorSubscription {
        let below_row = anchor.row + anchor.height;
        let needed = options.max_height.unwrap_or(1).max(1);
        let placement = match options.preferred {
            Some(preferred) => preferred,
            None if below_row + needed <= self.viewport_rows => Placement::Below,
            None => Placement::Above,
        };
        let row = match placement {
            Placement::Below => below_row,
            Placement::Above => anchor.row.saturating_sub(needed),
        };
        on_update(AnchorUpdate {
            col: anchor.col,
            row,
            placement,
        });

        self.active.set(self.active.get() + 1);
        let active = Rc::clone(&self.active);
        AnchorSubscription::new(Box::new(move || {
            active.set(active.get().saturating_sub(1));
        }))
    }
}
