use std::path::PathBuf;

use serde_json::Value;

use crate::release_note::{RnDocument, parse_release_note};
use crate::store::ItemId;
use crate::version::ContentVersion;

/// Fields of `pack_metadata.json` the rules care about.
#[derive(Debug, Clone, Default)]
pub struct PackMetadata {
    pub name: String,
    pub description: String,
    pub support: String,
    pub author: String,
    pub categories: Vec<String>,
    /// The raw `currentVersion` string, kept for format validation.
    pub version_raw: String,
}

impl PackMetadata {
    pub fn from_value(data: &Value) -> Self {
        Self {
            name: str_field(data, "name"),
            description: str_field(data, "description"),
            support: str_field(data, "support"),
            author: str_field(data, "author"),
            categories: data
                .get("categories")
                .and_then(Value::as_array)
                .map(|values| {
                    values
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            version_raw: str_field(data, "currentVersion"),
        }
    }
}

fn str_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// A breaking-changes sidecar file (`<version>.json` next to the RN).
#[derive(Debug, Clone)]
pub struct BreakingChanges {
    pub path: PathBuf,
    /// Whether the file contains a `breakingChanges` entry.
    pub has_entry: bool,
}

/// The release note for a pack's current version, plus the identifiers of
/// every release-note file the pack carries.
#[derive(Debug, Clone)]
pub struct ReleaseNote {
    pub path: PathBuf,
    pub content: String,
    /// Ordered identifiers of all release-note files of the pack, extension
    /// included (e.g. `2.0.5.md`, `2.0.5.json`).
    pub all_rns: Vec<String>,
    pub breaking_changes: Option<BreakingChanges>,
}

impl ReleaseNote {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            all_rns: Vec::new(),
            breaking_changes: None,
        }
    }

    pub fn parse(&self) -> RnDocument {
        parse_release_note(&self.content)
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Path of the breaking-changes file expected next to this RN.
    pub fn expected_bc_path(&self) -> PathBuf {
        self.path.with_extension("json")
    }
}

/// Reduced view of a pack at the diff base revision, attached by the
/// orchestrator before backward-compatibility rules run.
#[derive(Debug, Clone)]
pub struct PackSnapshot {
    pub current_version: ContentVersion,
    pub all_rns: Vec<String>,
}

/// Aggregate root: a versioned bundle of content items.
#[derive(Debug, Clone)]
pub struct Pack {
    pub path: PathBuf,
    pub name: String,
    pub current_version: ContentVersion,
    pub metadata: PackMetadata,
    pub release_note: Option<ReleaseNote>,
    /// Indices into the owning store's item arena.
    pub items: Vec<ItemId>,
    pub old: Option<PackSnapshot>,
}

impl Pack {
    pub fn new(path: impl Into<PathBuf>, metadata: PackMetadata) -> Self {
        let path = path.into();
        let name = if metadata.name.is_empty() {
            dir_name_of(&path)
        } else {
            metadata.name.clone()
        };
        let current_version = metadata
            .version_raw
            .parse()
            .unwrap_or(ContentVersion::INITIAL);
        Self {
            path,
            name,
            current_version,
            metadata,
            release_note: None,
            items: Vec::new(),
            old: None,
        }
    }

    /// The pack's directory name under `Packs/`.
    pub fn dir_name(&self) -> String {
        dir_name_of(&self.path)
    }

    /// True when the pack carries any release-note content or files.
    pub fn has_release_notes(&self) -> bool {
        self.release_note
            .as_ref()
            .is_some_and(|rn| !rn.is_blank() || !rn.all_rns.is_empty())
    }
}

fn dir_name_of(path: &std::path::Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}
