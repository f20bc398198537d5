use std::collections::HashMap;

use crate::{
    foundation::error::{OutlineError, OutlineResult},
    outline::params::MAX_OUTLINE_COUNT,
    scene::bounds::{Aabb, ItemId, ShapeKey},
};

/// Scene queries the outline jobs need each frame.
pub trait OutlineScene {
    /// Items selected into outline group `group`. May contain meta items.
    fn selection(&self, group: usize) -> &[ItemId];

    /// Children of a meta item, or `None` when `id` is a drawable leaf.
    fn sub_items(&self, id: ItemId) -> Option<&[ItemId]>;

    /// Shape key and world bound of a drawable item.
    fn item_shape(&self, id: ItemId) -> Option<(ShapeKey, Aabb)>;
}

/// In-memory [`OutlineScene`] for headless use and tests.
#[derive(Clone, Debug)]
pub struct MemoryScene {
    shapes: HashMap<ItemId, (ShapeKey, Aabb)>,
    metas: HashMap<ItemId, Vec<ItemId>>,
    selections: Vec<Vec<ItemId>>,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self {
            shapes: HashMap::new(),
            metas: HashMap::new(),
            selections: vec![Vec::new(); MAX_OUTLINE_COUNT],
        }
    }
}

impl MemoryScene {
    /// Empty scene with no selections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a drawable item.
    pub fn insert_item(&mut self, id: ItemId, key: ShapeKey, bound: Aabb) -> &mut Self {
        self.shapes.insert(id, (key, bound));
        self
    }

    /// Add or replace a meta item and its children.
    pub fn insert_meta(&mut self, id: ItemId, children: Vec<ItemId>) -> &mut Self {
        self.metas.insert(id, children);
        self
    }

    /// Remove an item or meta item.
    pub fn remove_item(&mut self, id: ItemId) {
        self.shapes.remove(&id);
        self.metas.remove(&id);
    }

    /// Replace the selection of outline group `group`.
    pub fn select(&mut self, group: usize, ids: Vec<ItemId>) -> OutlineResult<()> {
        let Some(slot) = self.selections.get_mut(group) else {
            return Err(OutlineError::validation(format!(
                "outline group {group} is out of range (max {MAX_OUTLINE_COUNT})"
            )));
        };
        *slot = ids;
        Ok(())
    }

    /// Empty the selection of `group`.
    pub fn clear_selection(&mut self, group: usize) {
        if let Some(slot) = self.selections.get_mut(group) {
            slot.clear();
        }
    }
}

impl OutlineScene for MemoryScene {
    fn selection(&self, group: usize) -> &[ItemId] {
        self.selections.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    fn sub_items(&self, id: ItemId) -> Option<&[ItemId]> {
        self.metas.get(&id).map(Vec::as_slice)
    }

    fn item_shape(&self, id: ItemId) -> Option<(ShapeKey, Aabb)> {
        self.shapes.get(&id).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
