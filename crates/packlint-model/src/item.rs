use std::path::PathBuf;

use serde_json::Value;

use crate::content_type::ContentType;
use crate::marketplace::Marketplace;
use crate::store::PackId;
use crate::version::ContentVersion;

/// A single parsed content entity (integration, script, playbook, ...).
///
/// Normalized attributes are extracted once at construction so rules never
/// have to know the underlying file format. The raw parsed mapping stays
/// available in `data` for field-level rules.
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub path: PathBuf,
    pub content_type: ContentType,
    pub name: String,
    pub object_id: String,
    pub deprecated: bool,
    pub marketplaces: Vec<Marketplace>,
    /// Ids/names of content items this item is known to use, extracted from
    /// the relationship fields of the raw data. Feeds graph construction.
    pub uses: Vec<String>,
    pub from_version: Option<ContentVersion>,
    pub to_version: Option<ContentVersion>,
    pub data: Value,
    /// Back-index into the owning store's pack arena, when known.
    pub pack: Option<PackId>,
    /// Snapshot of the same logical item before the change set, attached by
    /// the orchestrator in diff-aware runs only.
    pub old: Option<Box<ContentItem>>,
}

impl ContentItem {
    pub fn new(path: impl Into<PathBuf>, content_type: ContentType, data: Value) -> Self {
        let path = path.into();
        let name = data
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| file_stem(&path));
        let object_id = extract_id(&data).unwrap_or_else(|| name.clone());
        let deprecated = data
            .get("deprecated")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let marketplaces = extract_marketplaces(&data);
        let uses = extract_uses(content_type, &data);
        let from_version = extract_version(&data, &["fromversion", "fromVersion"]);
        let to_version = extract_version(&data, &["toversion", "toVersion"]);
        Self {
            path,
            content_type,
            name,
            object_id,
            deprecated,
            marketplaces,
            uses,
            from_version,
            to_version,
            data,
            pack: None,
            old: None,
        }
    }

    /// User-facing display name: the `display` field when present (as in
    /// integrations), the `name` field otherwise.
    pub fn display_name(&self) -> &str {
        self.data
            .get("display")
            .and_then(Value::as_str)
            .filter(|display| !display.is_empty())
            .unwrap_or(&self.name)
    }

    /// The docker image an integration or automation script runs on.
    pub fn docker_image(&self) -> Option<&str> {
        let value = match self.content_type {
            ContentType::Integration => self.data.get("script")?.get("dockerimage"),
            ContentType::Script => self.data.get("dockerimage"),
            _ => None,
        };
        value.and_then(Value::as_str).filter(|image| !image.is_empty())
    }

    /// Free-text description: `description` for most types, the `comment`
    /// field for automation scripts.
    pub fn description(&self) -> Option<&str> {
        let key = match self.content_type {
            ContentType::Script => "comment",
            _ => "description",
        };
        self.data.get(key).and_then(Value::as_str)
    }
}

fn file_stem(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

fn extract_id(data: &Value) -> Option<String> {
    let id = data
        .get("commonfields")
        .and_then(|fields| fields.get("id"))
        .or_else(|| data.get("id"))?;
    match id {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

fn extract_marketplaces(data: &Value) -> Vec<Marketplace> {
    let Some(values) = data.get("marketplaces").and_then(Value::as_array) else {
        return Marketplace::default_set();
    };
    let mut marketplaces: Vec<Marketplace> = values
        .iter()
        .filter_map(Value::as_str)
        .filter_map(Marketplace::parse)
        .collect();
    marketplaces.dedup();
    if marketplaces.is_empty() {
        Marketplace::default_set()
    } else {
        marketplaces
    }
}

fn extract_version(data: &Value, keys: &[&str]) -> Option<ContentVersion> {
    keys.iter()
        .find_map(|key| data.get(*key))
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse().ok())
}

/// Pull explicit dependency hints out of the raw data.
///
/// Scripts declare hard dependencies under `dependson.must`; playbook tasks
/// reference the scripts and sub-playbooks they run.
fn extract_uses(content_type: ContentType, data: &Value) -> Vec<String> {
    let mut uses = Vec::new();
    match content_type {
        ContentType::Script => {
            if let Some(must) = data
                .get("dependson")
                .and_then(|dep| dep.get("must"))
                .and_then(Value::as_array)
            {
                for value in must.iter().filter_map(Value::as_str) {
                    // Command bindings look like "BrandName|||command".
                    let used = value.rsplit("|||").next().unwrap_or(value).trim();
                    if !used.is_empty() {
                        push_unique(&mut uses, used);
                    }
                }
            }
        }
        ContentType::Playbook => {
            if let Some(tasks) = data.get("tasks").and_then(Value::as_object) {
                for task in tasks.values() {
                    let Some(inner) = task.get("task") else { continue };
                    for key in ["scriptName", "playbookName", "script"] {
                        if let Some(used) = inner.get(key).and_then(Value::as_str) {
                            let used = used.rsplit("|||").next().unwrap_or(used).trim();
                            if !used.is_empty() {
                                push_unique(&mut uses, used);
                            }
                        }
                    }
                }
            }
        }
        _ => {}
    }
    uses
}

fn push_unique(uses: &mut Vec<String>, value: &str) {
    if !uses.iter().any(|existing| existing == value) {
        uses.push(value.to_string());
    }
}
