use std::collections::BTreeMap;

use crate::foundation::core::Vec3;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Scene item identifier.
pub struct ItemId(pub u64);

bitflags::bitflags! {
    /// Shape classification used to pick a pipeline for an item.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ShapeKey: u32 {
        /// Deformed by a skeleton; drawn with the skinned mask pipeline.
        const SKINNED = 1 << 0;
        /// Alpha-blended material.
        const TRANSLUCENT = 1 << 1;
        /// Back faces are not culled.
        const DOUBLE_SIDED = 1 << 2;
    }
}

impl ShapeKey {
    /// Whether items of this key need the skinned pipeline.
    pub fn is_skinned(self) -> bool {
        self.contains(Self::SKINNED)
    }
}

/// World-space axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Build a box from any two opposite corners.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box around `center` extending `half` along each axis.
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self::from_corners(center - half, center + half)
    }

    /// Box center.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The eight corners; index bit 0 is x, bit 1 is y, bit 2 is z.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }
}

/// Corner index pairs forming the 12 box edges, matching [`Aabb::corners`].
pub(crate) const AABB_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

#[derive(Clone, Copy, Debug, PartialEq)]
/// An outlined item together with its world bound.
pub struct ItemBound {
    /// Item identifier.
    pub id: ItemId,
    /// World-space bound.
    pub bound: Aabb,
}

/// Outlined items bucketed by shape key; iteration follows key order.
pub type ShapeBounds = BTreeMap<ShapeKey, Vec<ItemBound>>;

/// Total number of items across all buckets.
pub fn item_count(shapes: &ShapeBounds) -> usize {
    shapes.values().map(Vec::len).sum()
}
