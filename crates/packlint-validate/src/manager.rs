//! The validation orchestrator.
//!
//! A run is a single deterministic pass through five states: resolve the
//! execution mode from the invocation flags, collect the content items for
//! that mode (attaching base-revision snapshots in git runs), dispatch the
//! eligible rules, aggregate and deduplicate their results against the
//! suppression lists, and report. Only a configuration error aborts; every
//! other failure degrades to a recorded result.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info_span};

use packlint_ingest::{
    ChangeSet, Discovered, FileProblem, PackIgnore, ProblemKind, UNSUPPORTED_FILE_MESSAGE,
    diff_name_status, is_structured_file, load_files, load_pack_ignore, load_repository,
    parse_structured, show_at_revision,
};
use packlint_model::{
    ContentItem, ContentStore, ContentVersion, ItemId, PackId, PackSnapshot, ValidationResult,
};

use crate::context::ValidationContext;
use crate::error::{Result, ValidateError};
use crate::graph::InMemoryGraph;
use crate::mode::{CodeFilter, ExecutionMode};
use crate::registry::ValidatorRegistry;

/// Error code attached to files that fail to parse.
pub const PARSE_FAILURE_CODE: &str = "ST100";
/// Error code attached to files no classifier recognizes.
pub const UNSUPPORTED_FILE_CODE: &str = "BA102";

/// Invocation parameters of one validation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Repository root, used by git and all-files runs.
    pub repo_root: PathBuf,
    /// Explicit files or pack paths to validate.
    pub paths: Vec<PathBuf>,
    /// Validate the files changed relative to `git_base`.
    pub use_git: bool,
    pub git_base: String,
    /// Validate the entire repository.
    pub all_files: bool,
    /// Allow-list of rule codes or code prefixes.
    pub codes: CodeFilter,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            paths: Vec::new(),
            use_git: false,
            git_base: String::from("HEAD"),
            all_files: false,
            codes: CodeFilter::all(),
        }
    }
}

/// A rule that was skipped because its own contract was broken. Kept apart
/// from violations so rule bugs never masquerade as content bugs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractFailure {
    pub error_code: String,
    pub message: String,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub mode: ExecutionMode,
    pub results: Vec<ValidationResult>,
    pub contract_failures: Vec<ContractFailure>,
    pub checked_items: usize,
    pub checked_packs: usize,
}

impl RunOutcome {
    pub fn is_valid(&self) -> bool {
        self.results.is_empty()
    }
}

/// Per-pack suppression lists, looked up by result path at aggregation time.
#[derive(Debug, Clone, Default)]
pub struct SuppressionIndex {
    packs: Vec<(PathBuf, PackIgnore)>,
}

impl SuppressionIndex {
    pub fn insert(&mut self, pack_dir: impl Into<PathBuf>, ignore: PackIgnore) {
        if !ignore.is_empty() {
            self.packs.push((pack_dir.into(), ignore));
        }
    }

    pub fn is_suppressed(&self, path: &Path, code: &str) -> bool {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        self.packs
            .iter()
            .any(|(pack_dir, ignore)| path.starts_with(pack_dir) && ignore.is_ignored(file_name, code))
    }
}

/// Drives a validation run end to end.
pub struct ValidateManager {
    registry: ValidatorRegistry,
}

impl ValidateManager {
    pub fn new(registry: ValidatorRegistry) -> Self {
        Self { registry }
    }

    pub fn with_default_rules() -> Self {
        Self::new(ValidatorRegistry::with_default_rules())
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Run against the filesystem (and git, in diff mode).
    pub fn run(&self, config: &RunConfig) -> Result<RunOutcome> {
        let mode = resolve_mode(config)?;
        let span = info_span!("validate", mode = %mode);
        let _guard = span.enter();

        let (discovered, scope_paths) = match mode {
            ExecutionMode::SpecificFiles => {
                let discovered = load_files(&config.paths)?;
                (discovered, Some(config.paths.clone()))
            }
            ExecutionMode::AllFiles => (load_repository(&config.repo_root)?, None),
            ExecutionMode::UseGit => {
                let change_set = diff_name_status(&config.repo_root, &config.git_base)?;
                let (discovered, scope) =
                    collect_git(&config.repo_root, &config.git_base, &change_set)?;
                (discovered, Some(scope))
            }
        };

        let (items, packs) = resolve_scope(&discovered.store, scope_paths.as_deref());
        let problems = scoped_problems(&discovered.problems, scope_paths.as_deref());

        let mut suppressions = SuppressionIndex::default();
        for (_, pack) in discovered.store.packs() {
            suppressions.insert(&pack.path, load_pack_ignore(&pack.path)?);
        }

        let graph = InMemoryGraph::from_store(&discovered.store);
        let ctx = ValidationContext::with_scope(&discovered.store, mode, items, packs)
            .with_graph(&graph);
        Ok(self.run_in_context(&ctx, &config.codes, &suppressions, &problems))
    }

    /// Dispatch, aggregate and report within an already-collected context.
    /// This is the entry point the test harness uses with in-memory stores.
    pub fn run_in_context(
        &self,
        ctx: &ValidationContext<'_>,
        filter: &CodeFilter,
        suppressions: &SuppressionIndex,
        problems: &[FileProblem],
    ) -> RunOutcome {
        let mut results = problem_results(problems, filter);
        let mut contract_failures = Vec::new();

        for validator in self.registry.dispatch(ctx.mode(), filter) {
            match validator.check(ctx) {
                Ok(found) => results.extend(found),
                Err(contract) => {
                    error!(
                        code = %contract.code,
                        message = %contract.message,
                        "rule skipped: contract violation"
                    );
                    contract_failures.push(ContractFailure {
                        error_code: contract.code,
                        message: contract.message,
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        results.retain(|result| {
            seen.insert((
                result.path.clone(),
                result.error_code.clone(),
                result.message.clone(),
            ))
        });
        results.retain(|result| !suppressions.is_suppressed(&result.path, &result.error_code));
        results.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.error_code.cmp(&b.error_code))
        });

        let outcome = RunOutcome {
            mode: ctx.mode(),
            results,
            contract_failures,
            checked_items: ctx.items().count(),
            checked_packs: ctx.packs().count(),
        };
        debug!(
            violations = outcome.results.len(),
            items = outcome.checked_items,
            packs = outcome.checked_packs,
            "run aggregated"
        );
        outcome
    }
}

/// Resolve the execution mode; the three selectors are mutually exclusive
/// and exactly one must be given.
fn resolve_mode(config: &RunConfig) -> Result<ExecutionMode> {
    let selected = [
        (!config.paths.is_empty(), ExecutionMode::SpecificFiles),
        (config.use_git, ExecutionMode::UseGit),
        (config.all_files, ExecutionMode::AllFiles),
    ];
    let mut modes = selected
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, mode)| *mode);
    let Some(mode) = modes.next() else {
        return Err(ValidateError::configuration(
            "No input was given. Pass input paths, --use-git or --all-files.",
        ));
    };
    if modes.next().is_some() {
        return Err(ValidateError::configuration(
            "Input paths, --use-git and --all-files are mutually exclusive; pass exactly one.",
        ));
    }
    Ok(mode)
}

/// Turn ingestion problems into reportable violations.
fn problem_results(problems: &[FileProblem], filter: &CodeFilter) -> Vec<ValidationResult> {
    problems
        .iter()
        .filter_map(|problem| {
            let (code, message) = match problem.kind {
                ProblemKind::Parse => (
                    PARSE_FAILURE_CODE,
                    format!("The file could not be parsed: {}", problem.message),
                ),
                ProblemKind::Unresolved => {
                    (UNSUPPORTED_FILE_CODE, UNSUPPORTED_FILE_MESSAGE.to_string())
                }
            };
            filter
                .matches(code)
                .then(|| ValidationResult::new(&problem.path, code, message))
        })
        .collect()
}

/// The scoped item and pack ids: everything when no scope paths are given,
/// otherwise the items lying under one of the scope paths, and the packs
/// whose directory contains one of them.
fn resolve_scope(
    store: &ContentStore,
    scope_paths: Option<&[PathBuf]>,
) -> (Vec<ItemId>, Vec<PackId>) {
    let Some(scope) = scope_paths else {
        return (
            store.items().map(|(id, _)| id).collect(),
            store.packs().map(|(id, _)| id).collect(),
        );
    };
    let items = store
        .items()
        .filter(|(_, item)| {
            scope
                .iter()
                .any(|path| item.path == *path || item.path.starts_with(path))
        })
        .map(|(id, _)| id)
        .collect();
    let packs = store
        .packs()
        .filter(|(_, pack)| {
            scope.iter().any(|path| {
                pack.path == *path || pack.path.starts_with(path) || path.starts_with(&pack.path)
            })
        })
        .map(|(id, _)| id)
        .collect();
    (items, packs)
}

fn scoped_problems(
    problems: &[FileProblem],
    scope_paths: Option<&[PathBuf]>,
) -> Vec<FileProblem> {
    let Some(scope) = scope_paths else {
        return problems.to_vec();
    };
    problems
        .iter()
        .filter(|problem| {
            scope
                .iter()
                .any(|path| problem.path == *path || problem.path.starts_with(path))
        })
        .cloned()
        .collect()
}

/// Collect phase of a git run: load the packs owning the changed files and
/// attach base-revision snapshots to modified items and their packs.
fn collect_git(
    repo_root: &Path,
    base: &str,
    change_set: &ChangeSet,
) -> Result<(Discovered, Vec<PathBuf>)> {
    let mut scope = Vec::new();
    for relative in change_set.current_paths() {
        if !relative.starts_with("Packs") || !is_structured_file(&relative) {
            continue;
        }
        let absolute = repo_root.join(&relative);
        if absolute.exists() {
            scope.push(absolute);
        }
    }
    let mut discovered = load_files(&scope)?;
    attach_old_items(&mut discovered.store, repo_root, base, change_set);
    attach_old_packs(&mut discovered.store, repo_root, base, change_set);
    Ok((discovered, scope))
}

/// Materialize and attach the base revision of every modified or renamed
/// item in the store.
fn attach_old_items(
    store: &mut ContentStore,
    repo_root: &Path,
    base: &str,
    change_set: &ChangeSet,
) {
    let targets: Vec<(ItemId, PathBuf)> = store
        .items()
        .filter_map(|(id, item)| {
            let relative = item.path.strip_prefix(repo_root).ok()?;
            let old_relative = change_set.old_path_of(relative)?;
            Some((id, old_relative.to_path_buf()))
        })
        .collect();
    for (id, old_relative) in targets {
        let Ok(Some(text)) = show_at_revision(repo_root, base, &old_relative) else {
            continue;
        };
        let Ok(data) = parse_structured(&old_relative, &text) else {
            continue;
        };
        let content_type = store.item(id).content_type;
        let old = ContentItem::new(old_relative, content_type, data);
        store.item_mut(id).old = Some(Box::new(old));
    }
}

/// Attach a [`PackSnapshot`] to every pack that already existed at the base
/// revision. A pack whose metadata is absent there is new and keeps
/// `old = None`.
fn attach_old_packs(
    store: &mut ContentStore,
    repo_root: &Path,
    base: &str,
    change_set: &ChangeSet,
) {
    let pack_ids: Vec<PackId> = store.packs().map(|(id, _)| id).collect();
    for id in pack_ids {
        let pack_relative = match store.pack(id).path.strip_prefix(repo_root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => continue,
        };
        let metadata_relative = pack_relative.join("pack_metadata.json");
        let Ok(Some(text)) = show_at_revision(repo_root, base, &metadata_relative) else {
            continue;
        };
        let current_version = parse_structured(&metadata_relative, &text)
            .ok()
            .and_then(|value| {
                value
                    .get("currentVersion")
                    .and_then(|version| version.as_str())
                    .and_then(|raw| raw.parse().ok())
            })
            .unwrap_or(ContentVersion::INITIAL);
        let all_rns = old_release_note_names(store, id, &pack_relative, change_set);
        store.pack_mut(id).old = Some(PackSnapshot {
            current_version,
            all_rns,
        });
    }
}

/// Reconstruct the base revision's release-note file list from the current
/// list and the change set: drop the names added since, map renamed files
/// back to their old name, and restore deleted ones. A renamed release note
/// therefore never counts as new.
fn old_release_note_names(
    store: &ContentStore,
    id: PackId,
    pack_relative: &Path,
    change_set: &ChangeSet,
) -> Vec<String> {
    let rn_dir = pack_relative.join("ReleaseNotes");
    let in_rn_dir = |path: &Path| path.starts_with(&rn_dir);
    let name_of = |path: &Path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
    };

    let added: Vec<String> = change_set
        .added
        .iter()
        .filter(|path| in_rn_dir(path))
        .filter_map(|path| name_of(path))
        .collect();
    let mut old_names = Vec::new();
    let current = store
        .pack(id)
        .release_note
        .as_ref()
        .map(|rn| rn.all_rns.clone())
        .unwrap_or_default();
    for name in current {
        if added.contains(&name) {
            continue;
        }
        let renamed_from = change_set
            .renamed
            .iter()
            .find(|(_, new)| in_rn_dir(new) && name_of(new).as_deref() == Some(name.as_str()))
            .and_then(|(old, _)| name_of(old));
        old_names.push(renamed_from.unwrap_or(name));
    }
    for deleted in &change_set.deleted {
        if in_rn_dir(deleted)
            && let Some(name) = name_of(deleted)
        {
            old_names.push(name);
        }
    }
    old_names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_resolution_requires_exactly_one_selector() {
        let mut config = RunConfig::default();
        assert!(resolve_mode(&config).is_err());

        config.use_git = true;
        assert_eq!(resolve_mode(&config).unwrap(), ExecutionMode::UseGit);

        config.all_files = true;
        assert!(matches!(
            resolve_mode(&config),
            Err(ValidateError::Configuration { .. })
        ));

        let files_only = RunConfig {
            paths: vec![PathBuf::from("Packs/P")],
            ..RunConfig::default()
        };
        assert_eq!(resolve_mode(&files_only).unwrap(), ExecutionMode::SpecificFiles);
    }

    #[test]
    fn suppression_index_matches_by_pack_and_file_name() {
        let mut index = SuppressionIndex::default();
        index.insert(
            "Packs/HelloWorld",
            packlint_ingest::parse_pack_ignore("[file:HelloWorld.yml]\nignore=BA101\n"),
        );
        assert!(index.is_suppressed(
            Path::new("Packs/HelloWorld/Integrations/HelloWorld/HelloWorld.yml"),
            "BA101"
        ));
        assert!(!index.is_suppressed(
            Path::new("Packs/HelloWorld/Integrations/HelloWorld/HelloWorld.yml"),
            "BA100"
        ));
        assert!(!index.is_suppressed(
            Path::new("Packs/Other/Integrations/HelloWorld/HelloWorld.yml"),
            "BA101"
        ));
    }

    #[test]
    fn rename_keeps_release_note_from_counting_as_new() {
        let mut store = ContentStore::new();
        let mut pack = packlint_model::Pack::new(
            "Packs/P",
            packlint_model::PackMetadata::default(),
        );
        let mut rn = packlint_model::ReleaseNote::new("Packs/P/ReleaseNotes/2_0_6.md", "x");
        rn.all_rns = vec!["2_0_6.md".to_string()];
        pack.release_note = Some(rn);
        let id = store.add_pack(pack);
        let change_set = packlint_ingest::parse_name_status(
            "R100\tPacks/P/ReleaseNotes/2_0_5.md\tPacks/P/ReleaseNotes/2_0_6.md\n",
        );
        let old = old_release_note_names(&store, id, Path::new("Packs/P"), &change_set);
        assert_eq!(old, vec!["2_0_5.md".to_string()]);
    }
}
