//! Machine-readable run report.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use packlint_model::ValidationResult;
use packlint_validate::{ContractFailure, ExecutionMode, RunOutcome};

const REPORT_SCHEMA: &str = "packlint-validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

/// The `--json-report` payload.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub schema: &'static str,
    pub schema_version: u32,
    /// RFC 3339 timestamp of report generation.
    pub generated_at: String,
    pub mode: ExecutionMode,
    pub valid: bool,
    pub checked_items: usize,
    pub checked_packs: usize,
    pub violations: Vec<ValidationResult>,
    pub contract_failures: Vec<ContractFailure>,
}

impl JsonReport {
    pub fn new(outcome: &RunOutcome, generated_at: DateTime<Utc>) -> Self {
        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: generated_at.to_rfc3339(),
            mode: outcome.mode,
            valid: outcome.is_valid(),
            checked_items: outcome.checked_items,
            checked_packs: outcome.checked_packs,
            violations: outcome.results.clone(),
            contract_failures: outcome.contract_failures.clone(),
        }
    }
}

/// Serialize the report as pretty-printed JSON to `path`.
pub fn write_json_report(path: &Path, report: &JsonReport) -> Result<(), ReportError> {
    let payload = serde_json::to_string_pretty(report)
        .map_err(|source| ReportError::Serialize { source })?;
    fs::write(path, payload).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 12, 30, 0).unwrap()
    }

    fn failing_outcome() -> RunOutcome {
        RunOutcome {
            mode: ExecutionMode::UseGit,
            results: vec![ValidationResult::new(
                "Packs/P/ReleaseNotes/2_0_5.md",
                "RN103",
                "placeholder message",
            )],
            contract_failures: vec![],
            checked_items: 3,
            checked_packs: 1,
        }
    }

    #[test]
    fn report_carries_schema_and_violations() {
        let report = JsonReport::new(&failing_outcome(), fixed_time());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["schema"], "packlint-validation-report");
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["generated_at"], "2024-05-17T12:30:00+00:00");
        assert_eq!(value["mode"], "use_git");
        assert_eq!(value["valid"], false);
        assert_eq!(value["violations"][0]["error_code"], "RN103");
        assert_eq!(value["violations"][0]["path"], "Packs/P/ReleaseNotes/2_0_5.md");
    }

    #[test]
    fn report_round_trips_to_disk() {
        let report = JsonReport::new(&failing_outcome(), fixed_time());
        let dir = std::env::temp_dir().join("packlint-report-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.json");
        write_json_report(&path, &report).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["checked_items"], 3);
        fs::remove_file(&path).ok();
    }
}
