//! Read-only dependency graph consumed by the GR rule family.
//!
//! The graph is built once per run by the orchestrator and handed to
//! graph-aware rules by reference. Rules only read; there are no writers
//! during the validation phase.

use std::collections::BTreeMap;

use packlint_model::{ContentStore, ContentVersion, Marketplace};

/// Query interface over the content dependency graph.
pub trait DependencyGraph {
    /// Ids of items that use `object_id`.
    fn dependents_of(&self, object_id: &str) -> Vec<String>;
    /// Ids of items `object_id` uses.
    fn dependencies_of(&self, object_id: &str) -> Vec<String>;
    /// Marketplaces the item is available in, `None` when unknown.
    fn marketplaces_of(&self, object_id: &str) -> Option<Vec<Marketplace>>;
    fn from_version_of(&self, object_id: &str) -> Option<ContentVersion>;
    fn is_deprecated(&self, object_id: &str) -> bool;
}

#[derive(Debug, Clone)]
struct Node {
    marketplaces: Vec<Marketplace>,
    from_version: Option<ContentVersion>,
    deprecated: bool,
    uses: Vec<String>,
}

/// Dependency graph materialized from a [`ContentStore`].
///
/// Items are keyed by object id, with display names kept as aliases so
/// relationship fields that reference an item by name still resolve.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraph {
    nodes: BTreeMap<String, Node>,
    aliases: BTreeMap<String, String>,
    dependents: BTreeMap<String, Vec<String>>,
}

impl InMemoryGraph {
    pub fn from_store(store: &ContentStore) -> Self {
        let mut graph = Self::default();
        for (_, item) in store.items() {
            graph.nodes.insert(
                item.object_id.clone(),
                Node {
                    marketplaces: item.marketplaces.clone(),
                    from_version: item.from_version,
                    deprecated: item.deprecated,
                    uses: item.uses.clone(),
                },
            );
            if item.name != item.object_id {
                graph
                    .aliases
                    .insert(item.name.clone(), item.object_id.clone());
            }
        }
        for (_, item) in store.items() {
            for used in &item.uses {
                let used_id = graph.canonical(used).to_string();
                graph
                    .dependents
                    .entry(used_id)
                    .or_default()
                    .push(item.object_id.clone());
            }
        }
        graph
    }

    fn canonical<'a>(&'a self, object_id: &'a str) -> &'a str {
        if self.nodes.contains_key(object_id) {
            object_id
        } else {
            self.aliases
                .get(object_id)
                .map(String::as_str)
                .unwrap_or(object_id)
        }
    }

    fn node(&self, object_id: &str) -> Option<&Node> {
        self.nodes.get(self.canonical(object_id))
    }
}

impl DependencyGraph for InMemoryGraph {
    fn dependents_of(&self, object_id: &str) -> Vec<String> {
        self.dependents
            .get(self.canonical(object_id))
            .cloned()
            .unwrap_or_default()
    }

    fn dependencies_of(&self, object_id: &str) -> Vec<String> {
        self.node(object_id)
            .map(|node| node.uses.clone())
            .unwrap_or_default()
    }

    fn marketplaces_of(&self, object_id: &str) -> Option<Vec<Marketplace>> {
        self.node(object_id).map(|node| node.marketplaces.clone())
    }

    fn from_version_of(&self, object_id: &str) -> Option<ContentVersion> {
        self.node(object_id).and_then(|node| node.from_version)
    }

    fn is_deprecated(&self, object_id: &str) -> bool {
        self.node(object_id).is_some_and(|node| node.deprecated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packlint_model::{ContentItem, ContentType};
    use serde_json::json;

    fn store_with_dependency() -> ContentStore {
        let mut store = ContentStore::new();
        store.add_item(
            ContentItem::new(
                "Packs/A/Scripts/Caller/Caller.yml",
                ContentType::Script,
                json!({
                    "commonfields": {"id": "Caller"},
                    "name": "Caller",
                    "dependson": {"must": ["Helper"]},
                }),
            ),
            None,
        );
        store.add_item(
            ContentItem::new(
                "Packs/B/Scripts/Helper/Helper.yml",
                ContentType::Script,
                json!({
                    "commonfields": {"id": "helper-id"},
                    "name": "Helper",
                    "deprecated": true,
                    "fromversion": "6.8.0",
                    "marketplaces": ["marketplacev2"],
                }),
            ),
            None,
        );
        store
    }

    #[test]
    fn resolves_dependencies_and_reverse_edges() {
        let graph = InMemoryGraph::from_store(&store_with_dependency());
        assert_eq!(graph.dependencies_of("Caller"), vec!["Helper".to_string()]);
        assert_eq!(graph.dependents_of("helper-id"), vec!["Caller".to_string()]);
        // Name aliases resolve to the same node.
        assert_eq!(graph.dependents_of("Helper"), vec!["Caller".to_string()]);
    }

    #[test]
    fn exposes_node_attributes() {
        let graph = InMemoryGraph::from_store(&store_with_dependency());
        assert!(graph.is_deprecated("Helper"));
        assert_eq!(
            graph.from_version_of("Helper"),
            Some(ContentVersion::new(6, 8, 0))
        );
        assert_eq!(
            graph.marketplaces_of("Helper"),
            Some(vec![Marketplace::MarketplaceV2])
        );
        assert_eq!(graph.marketplaces_of("Unknown"), None);
    }
}
