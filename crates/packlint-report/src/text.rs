//! Plain-text rendering of a run outcome.

use std::io::{self, Write};

use packlint_validate::RunOutcome;

/// Write every violation (and any rule contract failures) to `writer`,
/// followed by the summary line. All messages are printed before the caller
/// exits non-zero.
pub fn render_results(outcome: &RunOutcome, writer: &mut impl Write) -> io::Result<()> {
    for result in &outcome.results {
        writeln!(writer, "{result}")?;
    }
    if !outcome.contract_failures.is_empty() {
        writeln!(writer, "Rule contract failures (these are validator bugs, not content problems):")?;
        for failure in &outcome.contract_failures {
            writeln!(writer, "- [{}]: {}", failure.error_code, failure.message)?;
        }
    }
    writeln!(writer, "{}", summary_line(outcome))
}

/// The final human-readable pass/fail line.
pub fn summary_line(outcome: &RunOutcome) -> String {
    if outcome.is_valid() {
        "The files are valid.".to_string()
    } else {
        "The files were found as invalid, the exact error message can be located above."
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packlint_model::ValidationResult;
    use packlint_validate::{ContractFailure, ExecutionMode};

    fn outcome_with(
        results: Vec<ValidationResult>,
        contract_failures: Vec<ContractFailure>,
    ) -> RunOutcome {
        RunOutcome {
            mode: ExecutionMode::UseGit,
            results,
            contract_failures,
            checked_items: 2,
            checked_packs: 1,
        }
    }

    fn rendered(outcome: &RunOutcome) -> String {
        let mut buffer = Vec::new();
        render_results(outcome, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn renders_violations_then_summary() {
        let outcome = outcome_with(
            vec![
                ValidationResult::new("Packs/P/pack_metadata.json", "PA117", "bad support"),
                ValidationResult::new(
                    "Packs/P/ReleaseNotes/2_0_5.md",
                    "RN105",
                    "The pack contains more than one new release note, please make sure the pack contains at most one release note.",
                ),
            ],
            vec![],
        );
        insta::assert_snapshot!(rendered(&outcome), @r"
        Packs/P/pack_metadata.json - [PA117]: bad support
        Packs/P/ReleaseNotes/2_0_5.md - [RN105]: The pack contains more than one new release note, please make sure the pack contains at most one release note.
        The files were found as invalid, the exact error message can be located above.
        ");
    }

    #[test]
    fn renders_success_summary_for_clean_run() {
        let outcome = outcome_with(vec![], vec![]);
        insta::assert_snapshot!(rendered(&outcome), @"The files are valid.");
    }

    #[test]
    fn contract_failures_are_rendered_apart_from_violations() {
        let outcome = outcome_with(
            vec![],
            vec![ContractFailure {
                error_code: "GR100".to_string(),
                message: "the dependency graph handle is not attached to this run".to_string(),
            }],
        );
        let text = rendered(&outcome);
        assert!(text.contains("Rule contract failures"));
        assert!(text.contains("- [GR100]: the dependency graph handle is not attached to this run"));
        // A contract failure alone does not fail the run.
        assert!(text.ends_with("The files are valid.\n"));
    }
}
