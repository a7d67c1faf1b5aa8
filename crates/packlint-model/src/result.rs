use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One rule violation: the failing file, the stable rule code and the
/// deterministic user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub path: PathBuf,
    pub error_code: String,
    pub message: String,
}

impl ValidationResult {
    pub fn new(
        path: impl Into<PathBuf>,
        error_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - [{}]: {}",
            self.path.display(),
            self.error_code,
            self.message
        )
    }
}
