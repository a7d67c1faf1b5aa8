//! Per-run context handed to every rule.

use packlint_model::{ContentItem, ContentStore, ContentType, ItemId, Pack, PackId};

use crate::error::RuleContractError;
use crate::graph::DependencyGraph;
use crate::mode::ExecutionMode;

/// Immutable view of one validation run: the content store, the subset of
/// items and packs in scope, the execution mode, and (when built) the
/// dependency graph handle.
///
/// Rules receive the context by shared reference and must not mutate any of
/// it; the `old` backrefs they rely on are attached by the orchestrator
/// before dispatch.
pub struct ValidationContext<'a> {
    store: &'a ContentStore,
    mode: ExecutionMode,
    items: Vec<ItemId>,
    packs: Vec<PackId>,
    graph: Option<&'a dyn DependencyGraph>,
    validate_all_files: bool,
}

impl<'a> ValidationContext<'a> {
    /// Context with every item and pack of the store in scope.
    pub fn new(store: &'a ContentStore, mode: ExecutionMode) -> Self {
        let items = store.items().map(|(id, _)| id).collect();
        let packs = store.packs().map(|(id, _)| id).collect();
        Self::with_scope(store, mode, items, packs)
    }

    /// Context restricted to an explicit scope, as used in diff-aware and
    /// specific-files runs.
    pub fn with_scope(
        store: &'a ContentStore,
        mode: ExecutionMode,
        items: Vec<ItemId>,
        packs: Vec<PackId>,
    ) -> Self {
        Self {
            store,
            mode,
            items,
            packs,
            graph: None,
            validate_all_files: mode == ExecutionMode::AllFiles,
        }
    }

    pub fn with_graph(mut self, graph: &'a dyn DependencyGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn store(&self) -> &ContentStore {
        self.store
    }

    /// Whether graph rules should look at the whole graph instead of the
    /// subgraph around the scoped items.
    pub fn validate_all_files(&self) -> bool {
        self.validate_all_files
    }

    /// The items in scope for this run.
    pub fn items(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter().map(|id| self.store.item(*id))
    }

    /// Scoped items whose content type is one of `types`.
    pub fn items_of<'t>(
        &'t self,
        types: &'t [ContentType],
    ) -> impl Iterator<Item = &'t ContentItem> {
        self.items()
            .filter(move |item| types.contains(&item.content_type))
    }

    /// The packs in scope for this run.
    pub fn packs(&self) -> impl Iterator<Item = &Pack> {
        self.packs.iter().map(|id| self.store.pack(*id))
    }

    pub fn pack_of(&self, item: &ContentItem) -> Option<&Pack> {
        self.store.pack_of(item)
    }

    /// The dependency graph handle, or a contract error when the rule was
    /// dispatched without one being attached.
    pub fn graph(&self, code: &str) -> std::result::Result<&dyn DependencyGraph, RuleContractError> {
        self.graph.ok_or_else(|| {
            RuleContractError::new(code, "the dependency graph handle is not attached to this run")
        })
    }
}
