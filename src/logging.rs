//! Invariant and debug logging helpers.
//!
//! Invariant violations are recovered locally; this module only makes the
//! recovery visible to hosts that install a `log` backend.

/// Records an internal invariant violation that was recovered locally.
///
/// Never panics: the caller is responsible for restoring a valid state.
pub(crate) fn invariant_recovered(context: &str, detail: &str) {
    log::warn!(target: "picker_tui", "invariant recovered in {context}: {detail}");
}

/// Low-volume state-transition trace, useful with `PICKER_DEBUG=1` hosts.
pub(crate) fn trace_transition(context: &str, detail: &str) {
    log::debug!(target: "picker_tui", "{context}: {detail}");
}
