//! Shared builders for rule-engine tests.

use packlint_model::{
    ContentItem, ContentStore, ContentType, Pack, PackId, PackMetadata, PackSnapshot, ReleaseNote,
};
use serde_json::{Value, json};

/// Add a pack with sane metadata and an optional current release note.
pub fn add_pack(
    store: &mut ContentStore,
    name: &str,
    version: &str,
    rn_content: Option<&str>,
) -> PackId {
    let metadata = PackMetadata::from_value(&json!({
        "name": name,
        "description": "Test fixture",
        "support": "xsoar",
        "author": "Acme",
        "categories": ["Utilities"],
        "currentVersion": version,
    }));
    let mut pack = Pack::new(format!("Packs/{name}"), metadata);
    if let Some(content) = rn_content {
        let stem = version.replace('.', "_");
        pack.release_note = Some(ReleaseNote::new(
            format!("Packs/{name}/ReleaseNotes/{stem}.md"),
            content,
        ));
    }
    store.add_pack(pack)
}

/// Mark a pack as already released at the base revision.
pub fn snapshot_pack(store: &mut ContentStore, pack: PackId, version: &str, all_rns: &[&str]) {
    store.pack_mut(pack).old = Some(PackSnapshot {
        current_version: version.parse().expect("fixture version"),
        all_rns: all_rns.iter().map(|name| (*name).to_string()).collect(),
    });
}

/// An integration with the given docker image, not yet added to a store.
pub fn integration_item(name: &str, docker_image: &str) -> ContentItem {
    let data = json!({
        "commonfields": {"id": name},
        "name": name,
        "display": name,
        "category": "Utilities",
        "script": {"dockerimage": docker_image},
    });
    ContentItem::new(
        format!("Packs/Fixture/Integrations/{name}/{name}.yml"),
        ContentType::Integration,
        data,
    )
}

/// A script item with `extra` fields merged over a minimal definition.
pub fn script_item(name: &str, extra: Value) -> ContentItem {
    let mut data = json!({
        "commonfields": {"id": name},
        "name": name,
        "script": "print()",
        "type": "python",
    });
    if let (Value::Object(base), Value::Object(more)) = (&mut data, extra) {
        base.extend(more);
    }
    ContentItem::new(
        format!("Packs/Fixture/Scripts/{name}/{name}.yml"),
        ContentType::Script,
        data,
    )
}
