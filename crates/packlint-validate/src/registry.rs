//! The validator catalog.

use tracing::trace;

use crate::mode::{CodeFilter, ExecutionMode};
use crate::rules;
use crate::validator::Validator;

/// Immutable catalog of every registered rule, built once at startup and
/// passed explicitly to the orchestrator.
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorRegistry {
    /// Build a registry from an explicit rule list.
    ///
    /// Two validators may share an error code only when their mode sets are
    /// disjoint (the list-files vs. all-files variants of a graph rule).
    pub fn new(validators: Vec<Box<dyn Validator>>) -> Self {
        debug_assert!(
            no_overlapping_codes(&validators),
            "two validators share an error code and an execution mode"
        );
        Self { validators }
    }

    /// The registry with every built-in rule.
    pub fn with_default_rules() -> Self {
        Self::new(rules::default_rules())
    }

    pub fn validators(&self) -> impl Iterator<Item = &dyn Validator> {
        self.validators.iter().map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// The rules eligible for a run: mode set contains the run mode and the
    /// error code passes the user's allow-list. Order is registration order,
    /// so repeated dispatch is identical.
    pub fn dispatch(&self, mode: ExecutionMode, filter: &CodeFilter) -> Vec<&dyn Validator> {
        let selected: Vec<&dyn Validator> = self
            .validators()
            .filter(|validator| validator.runs_in(mode) && filter.matches(validator.error_code()))
            .collect();
        trace!(mode = %mode, rules = selected.len(), "dispatch selection");
        selected
    }
}

fn no_overlapping_codes(validators: &[Box<dyn Validator>]) -> bool {
    for (index, left) in validators.iter().enumerate() {
        for right in &validators[index + 1..] {
            if left.error_code() == right.error_code()
                && left.modes().iter().any(|mode| right.modes().contains(mode))
            {
                return false;
            }
        }
    }
    true
}
