//! Result reporting for packlint.
//!
//! Renders aggregated violations to a text stream, produces the
//! machine-readable JSON report, and maps run outcomes to process exit
//! codes.

mod json;
mod text;

pub use json::{JsonReport, ReportError, write_json_report};
pub use text::{render_results, summary_line};

use packlint_validate::RunOutcome;

/// Every file passed validation.
pub const EXIT_VALID: i32 = 0;
/// At least one violation remained after suppression.
pub const EXIT_INVALID: i32 = 1;
/// The run never started: bad flags, nonexistent paths, unusable git state.
pub const EXIT_CONFIGURATION: i32 = 2;

/// Exit code for a finished run. Configuration errors never produce an
/// outcome and are mapped to [`EXIT_CONFIGURATION`] by the caller.
pub fn exit_code(outcome: &RunOutcome) -> i32 {
    if outcome.is_valid() {
        EXIT_VALID
    } else {
        EXIT_INVALID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packlint_validate::{ContractFailure, ExecutionMode};

    fn outcome(results: Vec<packlint_model::ValidationResult>) -> RunOutcome {
        RunOutcome {
            mode: ExecutionMode::SpecificFiles,
            results,
            contract_failures: Vec::<ContractFailure>::new(),
            checked_items: 1,
            checked_packs: 1,
        }
    }

    #[test]
    fn exit_codes_follow_outcome() {
        assert_eq!(exit_code(&outcome(vec![])), EXIT_VALID);
        let failing = outcome(vec![packlint_model::ValidationResult::new(
            "Packs/P/pack_metadata.json",
            "PA117",
            "bad support",
        )]);
        assert_eq!(exit_code(&failing), EXIT_INVALID);
    }
}
