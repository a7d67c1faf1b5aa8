//! Git collaboration for diff-aware runs.
//!
//! The validate engine consumes two git facts: which paths changed relative
//! to a base ref (`git diff --name-status`) and what a file looked like at
//! that ref (`git show <base>:<path>`). Both are resolved here so the rule
//! engine stays free of process spawning.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{IngestError, Result};

/// Paths changed between the base ref and the working tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub modified: Vec<PathBuf>,
    pub added: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
    /// Renames as `(old_path, new_path)` pairs.
    pub renamed: Vec<(PathBuf, PathBuf)>,
}

impl ChangeSet {
    /// Every path that exists in the working tree after the change set
    /// (modified, added and rename targets).
    pub fn current_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.modified.clone();
        paths.extend(self.added.iter().cloned());
        paths.extend(self.renamed.iter().map(|(_, new)| new.clone()));
        paths
    }

    /// The base-revision path of a current path: the rename source when the
    /// file was renamed, the path itself when it was modified in place.
    pub fn old_path_of(&self, current: &Path) -> Option<&Path> {
        if let Some((old, _)) = self.renamed.iter().find(|(_, new)| new == current) {
            return Some(old);
        }
        self.modified
            .iter()
            .find(|path| path.as_path() == current)
            .map(PathBuf::as_path)
    }

    pub fn is_added(&self, current: &Path) -> bool {
        self.added.iter().any(|path| path == current)
    }
}

/// Parse `git diff --name-status` output.
///
/// Rows are `<status>\t<path>` with renames as `R<score>\t<old>\t<new>`.
/// Unknown status letters (copies, type changes) are treated as
/// modifications of their last path.
pub fn parse_name_status(text: &str) -> ChangeSet {
    let mut change_set = ChangeSet::default();
    for line in text.lines() {
        let mut fields = line.split('\t');
        let Some(status) = fields.next().map(str::trim) else {
            continue;
        };
        let Some(first) = fields.next().map(str::trim) else {
            continue;
        };
        if first.is_empty() {
            continue;
        }
        match status.chars().next() {
            Some('M') => change_set.modified.push(PathBuf::from(first)),
            Some('A') => change_set.added.push(PathBuf::from(first)),
            Some('D') => change_set.deleted.push(PathBuf::from(first)),
            Some('R') => {
                if let Some(new) = fields.next().map(str::trim).filter(|new| !new.is_empty()) {
                    change_set
                        .renamed
                        .push((PathBuf::from(first), PathBuf::from(new)));
                }
            }
            Some(_) => change_set.modified.push(PathBuf::from(first)),
            None => {}
        }
    }
    change_set
}

/// Run `git diff --name-status <base>` in the repository root.
pub fn diff_name_status(repo_root: &Path, base: &str) -> Result<ChangeSet> {
    let output = run_git(repo_root, &["diff", "--name-status", base])?;
    let change_set = parse_name_status(&output);
    debug!(
        base,
        modified = change_set.modified.len(),
        added = change_set.added.len(),
        deleted = change_set.deleted.len(),
        renamed = change_set.renamed.len(),
        "resolved git change set"
    );
    Ok(change_set)
}

/// Materialize a file's content at the base ref. Returns `None` when the
/// file did not exist there.
pub fn show_at_revision(repo_root: &Path, base: &str, path: &Path) -> Result<Option<String>> {
    let spec = format!("{}:{}", base, path_for_git(path));
    let mut command = Command::new("git");
    command.arg("-C").arg(repo_root).arg("show").arg(&spec);
    let output = command.output().map_err(|source| IngestError::Git {
        args: format!("show {spec}"),
        message: source.to_string(),
    })?;
    if output.status.success() {
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    } else {
        Ok(None)
    }
}

fn run_git(repo_root: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(args)
        .output()
        .map_err(|source| IngestError::Git {
            args: args.join(" "),
            message: source.to_string(),
        })?;
    if !output.status.success() {
        return Err(IngestError::Git {
            args: args.join(" "),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Git always speaks forward slashes, regardless of platform.
fn path_for_git(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
