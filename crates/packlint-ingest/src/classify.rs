//! Content-type classification.
//!
//! Classification is positional first (the directory a file lives in inside
//! its pack), refined by discriminator fields for the directories that hold
//! more than one kind (classifiers vs. mappers, layouts vs. layout
//! containers), with a content-shape fallback for files outside the standard
//! layout. A file that matches nothing stays unclassified and is reported by
//! the orchestrator instead of being silently dropped.

use std::path::Path;

use serde_json::Value;

use packlint_model::ContentType;

/// Pack subdirectories that hold exactly one content type.
const DIRECTORY_TYPES: &[(&str, ContentType)] = &[
    ("Integrations", ContentType::Integration),
    ("Scripts", ContentType::Script),
    ("Playbooks", ContentType::Playbook),
    ("Triggers", ContentType::Trigger),
    ("IncidentFields", ContentType::IncidentField),
    ("IncidentTypes", ContentType::IncidentType),
    ("IndicatorFields", ContentType::IndicatorField),
    ("IndicatorTypes", ContentType::Reputation),
    ("GenericFields", ContentType::GenericField),
    ("GenericTypes", ContentType::GenericType),
    ("GenericModules", ContentType::GenericModule),
    ("GenericDefinitions", ContentType::GenericDefinition),
    ("Dashboards", ContentType::Dashboard),
    ("Widgets", ContentType::Widget),
    ("Reports", ContentType::Report),
    ("Connections", ContentType::Connection),
];

/// Classify a content file into its [`ContentType`].
///
/// Returns `None` when the file shape is not recognized; the caller surfaces
/// that as an "unsupported file type" violation.
pub fn classify(path: &Path, data: &Value) -> Option<ContentType> {
    if file_name(path) == "pack_metadata.json" {
        return Some(ContentType::Pack);
    }
    if has_ancestor_dir(path, "ReleaseNotes") {
        return Some(ContentType::ReleaseNote);
    }
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
    {
        return Some(if stem(path) == "Author_image" {
            ContentType::AuthorImage
        } else {
            ContentType::Image
        });
    }

    for (dir, content_type) in DIRECTORY_TYPES {
        if has_ancestor_dir(path, dir) {
            return Some(*content_type);
        }
    }
    if has_ancestor_dir(path, "Classifiers") {
        return Some(if is_mapper(data) {
            ContentType::Mapper
        } else {
            ContentType::Classifier
        });
    }
    if has_ancestor_dir(path, "Layouts") {
        return Some(if data.get("group").is_some() {
            ContentType::LayoutsContainer
        } else {
            ContentType::Layout
        });
    }

    classify_by_shape(data)
}

/// Shape-based fallback for files outside the conventional pack layout,
/// keyed on discriminator fields each kind is guaranteed to carry.
fn classify_by_shape(data: &Value) -> Option<ContentType> {
    if data.get("script").is_some_and(Value::is_object) && data.get("category").is_some() {
        return Some(ContentType::Integration);
    }
    if data.get("tasks").is_some() && data.get("starttaskid").is_some() {
        return Some(ContentType::Playbook);
    }
    if data.get("script").is_some_and(Value::is_string) && data.get("type").is_some() {
        return Some(ContentType::Script);
    }
    if data.get("regex").is_some() && data.get("details").is_some() {
        return Some(ContentType::Reputation);
    }
    if data.get("transformer").is_some() || data.get("keyTypeMap").is_some() {
        return Some(if is_mapper(data) {
            ContentType::Mapper
        } else {
            ContentType::Classifier
        });
    }
    None
}

fn is_mapper(data: &Value) -> bool {
    data.get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.starts_with("mapping"))
}

fn has_ancestor_dir(path: &Path, name: &str) -> bool {
    path.parent()
        .map(Path::components)
        .into_iter()
        .flatten()
        .any(|component| component.as_os_str() == name)
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|name| name.to_str()).unwrap_or("")
}

fn stem(path: &Path) -> &str {
    path.file_stem().and_then(|name| name.to_str()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn classifies_by_directory() {
        let cases = [
            ("Packs/P/Integrations/My/My.yml", ContentType::Integration),
            ("Packs/P/Scripts/S/S.yml", ContentType::Script),
            ("Packs/P/Playbooks/playbook-X.yml", ContentType::Playbook),
            ("Packs/P/IndicatorTypes/reputation-ip.json", ContentType::Reputation),
            ("Packs/P/ReleaseNotes/2_0_5.md", ContentType::ReleaseNote),
            ("Packs/P/pack_metadata.json", ContentType::Pack),
        ];
        for (path, expected) in cases {
            assert_eq!(
                classify(&PathBuf::from(path), &json!({})),
                Some(expected),
                "{path}"
            );
        }
    }

    #[test]
    fn classifier_directory_splits_on_mapping_type() {
        let path = PathBuf::from("Packs/P/Classifiers/classifier-X.json");
        assert_eq!(
            classify(&path, &json!({"type": "mapping-incoming"})),
            Some(ContentType::Mapper)
        );
        assert_eq!(
            classify(&path, &json!({"type": "classification"})),
            Some(ContentType::Classifier)
        );
    }

    #[test]
    fn layout_directory_splits_on_group_field() {
        let path = PathBuf::from("Packs/P/Layouts/layoutscontainer-X.json");
        assert_eq!(
            classify(&path, &json!({"group": "incident"})),
            Some(ContentType::LayoutsContainer)
        );
        assert_eq!(classify(&path, &json!({"kind": "details"})), Some(ContentType::Layout));
    }

    #[test]
    fn shape_fallback_recognizes_core_kinds() {
        let loose = PathBuf::from("item.yml");
        assert_eq!(
            classify(&loose, &json!({"category": "Utilities", "script": {"commands": []}})),
            Some(ContentType::Integration)
        );
        assert_eq!(
            classify(&loose, &json!({"script": "print()", "type": "python"})),
            Some(ContentType::Script)
        );
        assert_eq!(
            classify(&loose, &json!({"tasks": {}, "starttaskid": "0"})),
            Some(ContentType::Playbook)
        );
        assert_eq!(
            classify(&loose, &json!({"regex": "ip", "details": "IP"})),
            Some(ContentType::Reputation)
        );
    }

    #[test]
    fn unrecognized_shape_is_unresolved() {
        assert_eq!(classify(&PathBuf::from("odd.yml"), &json!({"foo": 1})), None);
    }

    #[test]
    fn author_image_is_distinguished_from_other_images() {
        assert_eq!(
            classify(&PathBuf::from("Packs/P/Author_image.png"), &json!(null)),
            Some(ContentType::AuthorImage)
        );
        assert_eq!(
            classify(&PathBuf::from("Packs/P/Integrations/My/My_image.png"), &json!(null)),
            Some(ContentType::Image)
        );
    }
}
