use std::collections::HashSet;

use crate::{
    foundation::error::{OutlineError, OutlineResult},
    outline::job::{FrameInputs, OutlineVaryings},
    scene::bounds::{ItemBound, ItemId, ShapeBounds, ShapeKey},
    scene::frustum::ViewFrustum,
    scene::store::OutlineScene,
};

/// Resolve a selection into drawable items with their shape keys and bounds.
///
/// Meta items are expanded recursively. Every item is visited at most once, so cyclic
/// meta graphs terminate; items without a shape are dropped.
pub fn gather_selection(scene: &dyn OutlineScene, group: usize) -> Vec<(ShapeKey, ItemBound)> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut stack: Vec<ItemId> = scene.selection(group).iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        if let Some(children) = scene.sub_items(id) {
            stack.extend(children.iter().rev().copied());
            continue;
        }
        if let Some((key, bound)) = scene.item_shape(id) {
            out.push((key, ItemBound { id, bound }));
        }
    }
    out
}

/// Bucket items by shape key and order each bucket front to back.
pub fn sort_shapes(items: &[(ShapeKey, ItemBound)], frustum: &ViewFrustum) -> ShapeBounds {
    let mut shapes = ShapeBounds::new();
    for &(key, item) in items {
        shapes.entry(key).or_default().push(item);
    }
    for bucket in shapes.values_mut() {
        bucket.sort_by(|a, b| {
            let da = frustum.view_depth(a.bound.center());
            let db = frustum.view_depth(b.bound.center());
            da.total_cmp(&db).then(a.id.cmp(&b.id))
        });
    }
    shapes
}

/// Expands one group's selection into drawable items.
#[derive(Debug)]
pub struct FetchOutlineItems {
    name: String,
    group: usize,
}

impl FetchOutlineItems {
    /// Job for `group`.
    pub fn new(name: impl Into<String>, group: usize) -> Self {
        Self {
            name: name.into(),
            group,
        }
    }

    /// Job name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn run(&self, scene: &dyn OutlineScene, varyings: &mut OutlineVaryings) {
        let Some(slot) = varyings.fetched.get_mut(self.group) else {
            return;
        };
        *slot = gather_selection(scene, self.group);
    }
}

/// Buckets and depth-sorts one group's items.
#[derive(Debug)]
pub struct SortOutlineShapes {
    name: String,
    group: usize,
}

impl SortOutlineShapes {
    /// Job for `group`.
    pub fn new(name: impl Into<String>, group: usize) -> Self {
        Self {
            name: name.into(),
            group,
        }
    }

    /// Job name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn run(
        &self,
        frame: &FrameInputs<'_>,
        varyings: &mut OutlineVaryings,
    ) -> OutlineResult<()> {
        let Some(items) = varyings.fetched.get(self.group) else {
            return Ok(());
        };
        if items.is_empty() {
            return Ok(());
        }
        let frustum = frame
            .view_frustum
            .ok_or_else(|| OutlineError::precondition("depth sort requires a view frustum"))?;
        let sorted = sort_shapes(items, &frustum);
        varyings.shapes[self.group] = sorted;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outline/items.rs"]
mod tests;
