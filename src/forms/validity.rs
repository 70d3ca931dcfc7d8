//! Constraint-validation state.

/// Validity flags for a form-associated control.
///
/// The default value is "valid"; flags are set as constraints fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Validity {
    /// Required control with an empty selection.
    pub value_missing: bool,
}

impl Validity {
    pub fn valid(&self) -> bool {
        !self.value_missing
    }
}
