//! `.pack-ignore` suppression files.
//!
//! Each pack may carry a `.pack-ignore` file with INI-like sections mapping a
//! file name to the error codes suppressed for it:
//!
//! ```text
//! [file:HelloWorld.yml]
//! ignore=BA101,IN126
//! ```
//!
//! Suppressions are consulted by the orchestrator at aggregation time, after
//! all rules have run.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Parsed suppression list for one pack: file name to suppressed codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackIgnore {
    sections: BTreeMap<String, BTreeSet<String>>,
}

impl PackIgnore {
    /// True when `code` is suppressed for the file named `file_name`.
    pub fn is_ignored(&self, file_name: &str, code: &str) -> bool {
        self.sections
            .get(file_name)
            .is_some_and(|codes| codes.contains(code))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Read the `.pack-ignore` of a pack directory; absent file means no
/// suppressions.
pub fn load_pack_ignore(pack_dir: &Path) -> Result<PackIgnore> {
    let path = pack_dir.join(".pack-ignore");
    if !path.is_file() {
        return Ok(PackIgnore::default());
    }
    let text = fs::read_to_string(&path).map_err(|source| IngestError::io(&path, source))?;
    Ok(parse_pack_ignore(&text))
}

/// Parse `.pack-ignore` text. Unrecognized lines are skipped.
pub fn parse_pack_ignore(text: &str) -> PackIgnore {
    let mut ignore = PackIgnore::default();
    let mut current: Option<String> = None;
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(section) = line
            .strip_prefix("[file:")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            current = Some(section.trim().to_string());
            continue;
        }
        let Some(file_name) = &current else { continue };
        if let Some(codes) = line.strip_prefix("ignore=") {
            let entry = ignore.sections.entry(file_name.clone()).or_default();
            entry.extend(
                codes
                    .split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(str::to_string),
            );
        }
    }
    ignore
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_and_codes() {
        let ignore = parse_pack_ignore(
            "[file:HelloWorld.yml]\nignore=BA101,IN126\n\n[file:2_0_5.md]\nignore=RN116\n",
        );
        assert!(ignore.is_ignored("HelloWorld.yml", "BA101"));
        assert!(ignore.is_ignored("HelloWorld.yml", "IN126"));
        assert!(ignore.is_ignored("2_0_5.md", "RN116"));
        assert!(!ignore.is_ignored("HelloWorld.yml", "RN116"));
        assert!(!ignore.is_ignored("Other.yml", "BA101"));
    }

    #[test]
    fn repeated_sections_accumulate() {
        let ignore =
            parse_pack_ignore("[file:a.yml]\nignore=BA101\n[file:a.yml]\nignore=BA106\n");
        assert!(ignore.is_ignored("a.yml", "BA101"));
        assert!(ignore.is_ignored("a.yml", "BA106"));
    }

    #[test]
    fn junk_lines_are_skipped() {
        let ignore = parse_pack_ignore("# comment\nnot a section\nignore=BA101\n");
        assert!(ignore.is_empty());
    }

    #[test]
    fn missing_file_means_no_suppressions() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_pack_ignore(dir.path()).unwrap().is_empty());
    }
}
