use std::fmt;

use serde::{Deserialize, Serialize};

/// Scope selector of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// An explicit list of files or pack paths.
    SpecificFiles,
    /// Files changed relative to a git base ref.
    UseGit,
    /// The entire repository.
    AllFiles,
}

impl ExecutionMode {
    pub const ALL: &'static [ExecutionMode] = &[
        ExecutionMode::SpecificFiles,
        ExecutionMode::UseGit,
        ExecutionMode::AllFiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::SpecificFiles => "specific_files",
            ExecutionMode::UseGit => "use_git",
            ExecutionMode::AllFiles => "all_files",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Allow-list of rule codes, matched by string prefix.
///
/// `RP101` selects exactly that rule; `RP` selects the whole reputation
/// family. An empty filter selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeFilter {
    allowed: Vec<String>,
}

impl CodeFilter {
    /// The unrestricted filter.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated allow-list as given on the command line.
    pub fn parse(spec: &str) -> Self {
        Self::only(
            spec.split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty()),
        )
    }

    pub fn is_unrestricted(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn matches(&self, code: &str) -> bool {
        self.is_unrestricted()
            || self
                .allowed
                .iter()
                .any(|allowed| code.starts_with(allowed.as_str()))
    }
}
