//! Subcommand implementations.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use tracing::info;

use packlint_report::{JsonReport, write_json_report};
use packlint_validate::{
    CodeFilter, RunConfig, RunOutcome, ValidateError, ValidateManager, ValidatorRegistry,
};

use crate::cli::ValidateArgs;
use crate::summary::print_rules_table;

/// Run a validation pass. Only configuration problems are errors; content
/// problems live inside the returned outcome.
pub fn run_validate(args: &ValidateArgs) -> Result<RunOutcome, ValidateError> {
    let config = RunConfig {
        repo_root: args.repo_root.clone(),
        paths: args.input.clone(),
        use_git: args.use_git,
        git_base: args.prev_ver.clone(),
        all_files: args.validate_all,
        codes: args
            .run_specific_validations
            .as_deref()
            .map(CodeFilter::parse)
            .unwrap_or_default(),
    };
    let manager = ValidateManager::with_default_rules();
    let outcome = manager.run(&config)?;
    info!(
        violations = outcome.results.len(),
        items = outcome.checked_items,
        packs = outcome.checked_packs,
        "validation finished"
    );
    Ok(outcome)
}

/// Write the `--json-report` payload for a finished run.
pub fn write_report(outcome: &RunOutcome, path: &Path) -> anyhow::Result<()> {
    let report = JsonReport::new(outcome, Utc::now());
    write_json_report(path, &report)
        .with_context(|| format!("writing JSON report to {}", path.display()))
}

/// Print the registered rule roster.
pub fn run_rules() {
    let registry = ValidatorRegistry::with_default_rules();
    print_rules_table(&registry);
}
