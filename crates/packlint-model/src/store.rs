use crate::content_type::ContentType;
use crate::item::ContentItem;
use crate::pack::Pack;

/// Index of a content item inside a [`ContentStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

/// Index of a pack inside a [`ContentStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackId(usize);

/// Arena owning every content item and pack of a validation run.
///
/// Packs refer to their items (and items back to their pack) by index, never
/// by owning pointer, so the aggregate stays cycle-free.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    items: Vec<ContentItem>,
    packs: Vec<Pack>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pack(&mut self, pack: Pack) -> PackId {
        let id = PackId(self.packs.len());
        self.packs.push(pack);
        id
    }

    /// Insert an item, wiring both sides of the pack membership when an
    /// owning pack is given.
    pub fn add_item(&mut self, mut item: ContentItem, pack: Option<PackId>) -> ItemId {
        let id = ItemId(self.items.len());
        item.pack = pack;
        self.items.push(item);
        if let Some(pack_id) = pack {
            self.packs[pack_id.0].items.push(id);
        }
        id
    }

    pub fn item(&self, id: ItemId) -> &ContentItem {
        &self.items[id.0]
    }

    pub fn item_mut(&mut self, id: ItemId) -> &mut ContentItem {
        &mut self.items[id.0]
    }

    pub fn pack(&self, id: PackId) -> &Pack {
        &self.packs[id.0]
    }

    pub fn pack_mut(&mut self, id: PackId) -> &mut Pack {
        &mut self.packs[id.0]
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &ContentItem)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (ItemId(index), item))
    }

    pub fn packs(&self) -> impl Iterator<Item = (PackId, &Pack)> {
        self.packs
            .iter()
            .enumerate()
            .map(|(index, pack)| (PackId(index), pack))
    }

    pub fn items_of_type(&self, content_type: ContentType) -> impl Iterator<Item = &ContentItem> {
        self.items
            .iter()
            .filter(move |item| item.content_type == content_type)
    }

    pub fn pack_of(&self, item: &ContentItem) -> Option<&Pack> {
        item.pack.map(|id| self.pack(id))
    }

    pub fn find_item_by_id(&self, object_id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.object_id == object_id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn pack_count(&self) -> usize {
        self.packs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::PackMetadata;
    use serde_json::json;

    #[test]
    fn pack_membership_is_wired_both_ways() {
        let mut store = ContentStore::new();
        let pack_id = store.add_pack(Pack::new("Packs/P", PackMetadata::default()));
        let item = ContentItem::new(
            "Packs/P/Scripts/S/S.yml",
            ContentType::Script,
            json!({"name": "S"}),
        );
        let item_id = store.add_item(item, Some(pack_id));
        assert_eq!(store.pack(pack_id).items, vec![item_id]);
        assert_eq!(store.item(item_id).pack, Some(pack_id));
        assert_eq!(store.pack_of(store.item(item_id)).unwrap().path, store.pack(pack_id).path);
    }

    #[test]
    fn items_of_type_filters_by_tag() {
        let mut store = ContentStore::new();
        store.add_item(
            ContentItem::new("a.yml", ContentType::Script, json!({"name": "a"})),
            None,
        );
        store.add_item(
            ContentItem::new("b.yml", ContentType::Integration, json!({"name": "b"})),
            None,
        );
        let scripts: Vec<_> = store.items_of_type(ContentType::Script).collect();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].name, "a");
    }
}
