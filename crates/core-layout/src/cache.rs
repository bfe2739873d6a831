//! Measure and layout caches keyed on node identity plus constraint tuples.
//!
//! Lookups are single flat hash-map probes on dense integer composite keys
//! (identity + packed constraints) with a fast integer hash — never string
//! keys; these probes sit in the per-node inner loop.
//!
//! Invalidation protocol:
//! * Reads miss (without evicting) when the id is in the frame's dirty set;
//!   the reconciler marks a changed node and every ancestor whose layout
//!   can observe the change.
//! * Entries whose id no longer resolves in the arena are dropped by
//!   `sweep`, giving weak-map semantics without a GC.
//! * Failing subtrees never write entries (enforced at the engine).

use ahash::AHashMap;
use core_geometry::{Axis, Size};
use core_node::{DirtySet, NodeArena, NodeId};

use crate::tree::LayoutTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasureKey {
    pub id: NodeId,
    pub axis: Axis,
    pub max_w: i32,
    pub max_h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    pub id: NodeId,
    pub axis: Axis,
    pub max_w: i32,
    pub max_h: i32,
    pub forced_w: Option<i32>,
    pub forced_h: Option<i32>,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Default)]
pub struct MeasureCache {
    map: AHashMap<MeasureKey, Size>,
}

impl MeasureCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, key: &MeasureKey) -> Option<Size> {
        self.map.get(key).copied()
    }

    #[inline]
    pub fn insert(&mut self, key: MeasureKey, size: Size) {
        self.map.insert(key, size);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Drop entries for descriptors no longer alive in the arena.
    pub fn sweep(&mut self, arena: &NodeArena) {
        self.map.retain(|k, _| arena.contains(k.id));
    }
}

#[derive(Debug, Default)]
pub struct LayoutCache {
    map: AHashMap<LayoutKey, LayoutTree>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, key: &LayoutKey) -> Option<LayoutTree> {
        self.map.get(key).cloned()
    }

    #[inline]
    pub fn insert(&mut self, key: LayoutKey, tree: LayoutTree) {
        self.map.insert(key, tree);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn sweep(&mut self, arena: &NodeArena) {
        self.map.retain(|k, _| arena.contains(k.id));
    }
}

/// Caller-owned cache bundle threaded through one engine call. Nested
/// layout calls during the same engine call (overlay content, absolute
/// children) share this bundle through the call stack.
#[derive(Debug, Default)]
pub struct FrameCaches {
    pub measure: MeasureCache,
    pub layout: LayoutCache,
    pub dirty: DirtySet,
}

impl FrameCaches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sweep(&mut self, arena: &NodeArena) {
        self.measure.sweep(arena);
        self.layout.sweep(arena);
    }
}
