use serde::Serialize;
use thiserror::Error;

use packlint_ingest::IngestError;

/// Fatal, pre-run failure: bad flags, nonexistent input paths, unusable git
/// state. Nothing is validated when one of these is raised; the process
/// exits with the usage error code.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("{message}")]
    Configuration { message: String },
}

impl ValidateError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<IngestError> for ValidateError {
    fn from(error: IngestError) -> Self {
        Self::Configuration {
            message: error.to_string(),
        }
    }
}

/// A programming-contract violation inside a rule, e.g. a graph rule
/// dispatched without a graph handle. Logged, surfaced separately from
/// violations, and only the offending rule is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("rule {code} contract violation: {message}")]
pub struct RuleContractError {
    pub code: String,
    pub message: String,
}

impl RuleContractError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidateError>;
