//! Pack and repository discovery.
//!
//! A content repository keeps one directory per pack under `Packs/`, each with
//! a `pack_metadata.json`, per-type content directories and a `ReleaseNotes/`
//! directory of `<version>.md` files (with optional `.json` breaking-change
//! siblings). Discovery walks that layout into a [`ContentStore`], recording
//! unreadable or unclassifiable files as [`FileProblem`]s instead of aborting.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use packlint_model::{
    BreakingChanges, ContentItem, ContentStore, ContentType, Pack, PackId, PackMetadata,
    ReleaseNote,
};

use crate::UNSUPPORTED_FILE_MESSAGE;
use crate::classify::classify;
use crate::error::{IngestError, Result};
use crate::parse::{is_structured_file, read_structured};

/// Why a file could not be turned into a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// The file is not valid YAML/JSON.
    Parse,
    /// The file parsed but matches no known content shape.
    Unresolved,
}

/// A file that was seen during discovery but yielded no content item.
#[derive(Debug, Clone)]
pub struct FileProblem {
    pub path: PathBuf,
    pub kind: ProblemKind,
    pub message: String,
}

/// Outcome of a discovery pass: the populated store plus every file that
/// could not be ingested. Problem files are excluded from rule dispatch.
#[derive(Debug, Clone, Default)]
pub struct Discovered {
    pub store: ContentStore,
    pub problems: Vec<FileProblem>,
}

/// Load every pack under `<root>/Packs`.
pub fn load_repository(root: &Path) -> Result<Discovered> {
    if !root.is_dir() {
        return Err(IngestError::PathNotFound {
            path: root.to_path_buf(),
        });
    }
    let mut discovered = Discovered::default();
    let packs_dir = root.join("Packs");
    if !packs_dir.is_dir() {
        return Ok(discovered);
    }
    for pack_dir in sorted_dirs(&packs_dir)? {
        load_pack_into(&mut discovered, &pack_dir)?;
    }
    debug!(
        packs = discovered.store.pack_count(),
        items = discovered.store.item_count(),
        problems = discovered.problems.len(),
        "repository discovery finished"
    );
    Ok(discovered)
}

/// Load a single pack directory.
pub fn load_pack(pack_dir: &Path) -> Result<Discovered> {
    if !pack_dir.is_dir() {
        return Err(IngestError::PathNotFound {
            path: pack_dir.to_path_buf(),
        });
    }
    let mut discovered = Discovered::default();
    load_pack_into(&mut discovered, pack_dir)?;
    Ok(discovered)
}

/// Load the packs owning the given files, plus any loose files outside a
/// pack. Every path must exist; a missing one is a configuration error, not
/// a violation.
pub fn load_files(paths: &[PathBuf]) -> Result<Discovered> {
    for path in paths {
        if !path.exists() {
            return Err(IngestError::PathNotFound { path: path.clone() });
        }
    }
    let mut pack_roots = BTreeSet::new();
    let mut loose = Vec::new();
    for path in paths {
        match find_pack_root(path) {
            Some(root) => {
                pack_roots.insert(root);
            }
            None => loose.push(path.clone()),
        }
    }
    let mut discovered = Discovered::default();
    for root in pack_roots {
        load_pack_into(&mut discovered, &root)?;
    }
    for path in loose {
        if path.is_dir() {
            for file in walk_structured(&path)? {
                ingest_file(&mut discovered, &file, None);
            }
        } else {
            ingest_file(&mut discovered, &path, None);
        }
    }
    Ok(discovered)
}

/// Walk up from `path` to the pack directory that owns it (the nearest
/// ancestor carrying a `pack_metadata.json`). The path itself counts.
pub fn find_pack_root(path: &Path) -> Option<PathBuf> {
    let start = if path.is_dir() { path } else { path.parent()? };
    start
        .ancestors()
        .find(|dir| dir.join("pack_metadata.json").is_file())
        .map(Path::to_path_buf)
}

fn load_pack_into(discovered: &mut Discovered, pack_dir: &Path) -> Result<()> {
    let metadata_path = pack_dir.join("pack_metadata.json");
    if !metadata_path.is_file() {
        discovered.problems.push(FileProblem {
            path: metadata_path,
            kind: ProblemKind::Parse,
            message: format!("missing pack_metadata.json under {}", pack_dir.display()),
        });
        return Ok(());
    }
    let metadata_value = match read_structured(&metadata_path) {
        Ok(value) => value,
        Err(error) => {
            discovered.problems.push(FileProblem {
                path: metadata_path,
                kind: ProblemKind::Parse,
                message: error.to_string(),
            });
            return Ok(());
        }
    };
    let mut pack = Pack::new(pack_dir, PackMetadata::from_value(&metadata_value));
    pack.release_note = load_release_notes(pack_dir, &pack)?;
    let pack_id = discovered.store.add_pack(pack);

    for file in walk_structured(pack_dir)? {
        if is_pack_level_file(pack_dir, &file) {
            continue;
        }
        ingest_file(discovered, &file, Some(pack_id));
    }
    Ok(())
}

fn ingest_file(discovered: &mut Discovered, path: &Path, pack: Option<PackId>) {
    let data = match read_structured(path) {
        Ok(value) => value,
        Err(IngestError::Parse { path, message }) => {
            discovered.problems.push(FileProblem {
                path,
                kind: ProblemKind::Parse,
                message,
            });
            return;
        }
        Err(IngestError::UnsupportedFile { path }) => {
            discovered.problems.push(FileProblem {
                path,
                kind: ProblemKind::Unresolved,
                message: UNSUPPORTED_FILE_MESSAGE.to_string(),
            });
            return;
        }
        Err(error) => {
            discovered.problems.push(FileProblem {
                path: path.to_path_buf(),
                kind: ProblemKind::Parse,
                message: error.to_string(),
            });
            return;
        }
    };
    match classify(path, &data) {
        Some(content_type) if is_item_type(content_type) => {
            let item = ContentItem::new(path, content_type, data);
            discovered.store.add_item(item, pack);
        }
        // Pack metadata, release notes and images are modeled on the pack
        // itself, not as standalone items.
        Some(_) => {}
        None => discovered.problems.push(FileProblem {
            path: path.to_path_buf(),
            kind: ProblemKind::Unresolved,
            message: UNSUPPORTED_FILE_MESSAGE.to_string(),
        }),
    }
}

fn is_item_type(content_type: ContentType) -> bool {
    ContentType::ITEM_TYPES.contains(&content_type)
}

/// Files handled at the pack level rather than as content items.
fn is_pack_level_file(pack_dir: &Path, file: &Path) -> bool {
    file == pack_dir.join("pack_metadata.json")
        || file
            .strip_prefix(pack_dir)
            .ok()
            .and_then(|relative| relative.components().next())
            .is_some_and(|first| first.as_os_str() == "ReleaseNotes")
}

fn load_release_notes(pack_dir: &Path, pack: &Pack) -> Result<Option<ReleaseNote>> {
    let rn_dir = pack_dir.join("ReleaseNotes");
    if !rn_dir.is_dir() {
        return Ok(None);
    }
    let mut all_rns = Vec::new();
    for file in sorted_files(&rn_dir)? {
        if let Some(name) = file.file_name().and_then(|name| name.to_str()) {
            all_rns.push(name.to_string());
        }
    }
    if all_rns.is_empty() {
        return Ok(None);
    }
    let current_stem = pack.current_version.to_string().replace('.', "_");
    let current_path = rn_dir.join(format!("{current_stem}.md"));
    let content = if current_path.is_file() {
        fs::read_to_string(&current_path)
            .map_err(|source| IngestError::io(&current_path, source))?
    } else {
        String::new()
    };
    let mut release_note = ReleaseNote::new(current_path, content);
    release_note.all_rns = all_rns;
    release_note.breaking_changes = load_breaking_changes(&release_note.expected_bc_path());
    Ok(Some(release_note))
}

fn load_breaking_changes(bc_path: &Path) -> Option<BreakingChanges> {
    if !bc_path.is_file() {
        return None;
    }
    let has_entry = read_structured(bc_path)
        .ok()
        .as_ref()
        .and_then(|value| value.get("breakingChanges"))
        .is_some_and(|entry| !matches!(entry, Value::Null));
    Some(BreakingChanges {
        path: bc_path.to_path_buf(),
        has_entry,
    })
}

/// Every structured file under `dir`, depth-first, in path order.
fn walk_structured(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in sorted_entries(&current)? {
            if entry.is_dir() {
                pending.push(entry);
            } else if is_structured_file(&entry) && !is_ignored_file(&entry) {
                files.push(entry);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Auxiliary files that never hold content item definitions.
fn is_ignored_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");
    name == "README.md" || name.ends_with("_test.yml") || name.ends_with("_unified.yml")
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    let read = fs::read_dir(dir).map_err(|source| IngestError::io(dir, source))?;
    for entry in read {
        let entry = entry.map_err(|source| IngestError::io(dir, source))?;
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

fn sorted_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| path.is_dir())
        .collect())
}

fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| path.is_file())
        .collect())
}
