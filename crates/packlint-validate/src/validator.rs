//! The rule capability interface.

use packlint_model::{ContentType, ValidationResult};

use crate::context::ValidationContext;
use crate::error::RuleContractError;
use crate::mode::ExecutionMode;

/// What a rule evaluation produces: violations on success, a contract error
/// when the rule's own preconditions were broken by the harness.
pub type RuleOutcome = Result<Vec<ValidationResult>, RuleContractError>;

/// One validation rule.
///
/// Rules are pure predicate-and-message functions over the run context:
/// calling [`Validator::check`] twice on the same context yields identical
/// ordered results, and expected content problems are always converted into
/// [`ValidationResult`]s rather than errors.
pub trait Validator: Send + Sync {
    /// Stable error code, e.g. `RN103`. Shared by mode-disjoint variants of
    /// the same rule.
    fn error_code(&self) -> &'static str;

    /// One-line description shown by the `rules` listing.
    fn description(&self) -> &'static str;

    /// Content types this rule applies to.
    fn content_types(&self) -> &'static [ContentType];

    /// Execution modes this rule participates in. Never empty.
    fn modes(&self) -> &'static [ExecutionMode];

    fn check(&self, ctx: &ValidationContext<'_>) -> RuleOutcome;

    fn runs_in(&self, mode: ExecutionMode) -> bool {
        self.modes().contains(&mode)
    }
}
