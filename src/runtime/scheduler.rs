//! Deferred single-threaded task scheduling.
//!
//! Controls defer two kinds of work: registry refreshes (so a burst of
//! structural mutations coalesces into one recompute) and post-removal focus
//! transfer (one tick later, so the removed tag's exit can start before its
//! line disappears). Pending work for a torn-down control must be a no-op,
//! which the [`Liveness`] flag guarantees.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Shared liveness flag owned by one control instance.
///
/// Cloning shares the flag; revoking it turns every pending task that was
/// scheduled with it into a no-op.
#[derive(Debug, Clone)]
pub struct Liveness {
    alive: Rc<Cell<bool>>,
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_live(&self) -> bool {
        self.alive.get()
    }

    /// Marks the owner as torn down. Idempotent.
    pub fn revoke(&self) {
        self.alive.set(false);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

struct Task {
    liveness: Liveness,
    job: Box<dyn FnOnce()>,
}

/// Host-driven deferred task queue.
///
/// Single-threaded by design: tasks run on whichever loop drives
/// [`Scheduler::run_pending`], and everything scheduled within one gesture is
/// observable before the next input event is processed.
#[derive(Default)]
pub struct Scheduler {
    tasks: RefCell<VecDeque<Task>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a job guarded by the given liveness flag.
    pub fn defer(&self, liveness: &Liveness, job: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push_back(Task {
            liveness: liveness.clone(),
            job,
        });
    }

    /// Number of queued (not yet drained) tasks, including revoked ones.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Runs one tick: every task queued before this call. Tasks queued while
    /// draining run on the next tick.
    pub fn run_pending(&self) {
        let drained: Vec<Task> = self.tasks.borrow_mut().drain(..).collect();
        for task in drained {
            if task.liveness.is_live() {
                (task.job)();
            }
        }
    }

    /// Drains ticks until the queue is empty.
    pub fn run_until_idle(&self) {
        while self.pending() > 0 {
            self.run_pending();
        }
    }
}
