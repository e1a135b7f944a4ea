// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The public [`RTree`] type.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::ControlFlow;

use crate::bbox::BoundingBox;
use crate::config::RTreeConfig;
use crate::error::RTreeError;
use crate::node::{Entry, Node, Region};

/// Dynamic R-tree mapping bounding boxes to values.
///
/// Values are opaque to the tree; removal compares them with `PartialEq`. Queries
/// return candidates whose *boxes* overlap the query; exact geometric tests are up to
/// the caller.
///
/// The tree is not internally synchronized. Mutation needs `&mut self`, so shared
/// read-only traversal from several threads is fine when `T: Sync`.
pub struct RTree<T> {
    root: Node<T>,
    config: RTreeConfig,
    size: usize,
}

impl<T> Default for RTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RTree<T> {
    /// Create an empty tree with the default capacity (32 entries per node).
    pub fn new() -> Self {
        Self {
            root: Node::empty_leaf(),
            config: RTreeConfig::default(),
            size: 0,
        }
    }

    /// Create an empty tree whose nodes hold at most `max_entries` children.
    ///
    /// # Errors
    ///
    /// [`RTreeError::CapacityTooSmall`] if `max_entries < 2`.
    pub fn with_max_entries(max_entries: usize) -> Result<Self, RTreeError> {
        Self::with_config(RTreeConfig::default().with_max_entries(max_entries))
    }

    /// Create an empty tree from explicit settings.
    ///
    /// # Errors
    ///
    /// Any error from [`RTreeConfig::validate`].
    pub fn with_config(config: RTreeConfig) -> Result<Self, RTreeError> {
        config.validate()?;
        log::debug!(
            "creating rtree with max_entries={} min_entries={}",
            config.max_entries,
            config.min_entries
        );
        Ok(Self {
            root: Node::empty_leaf(),
            config,
            size: 0,
        })
    }

    /// The settings this tree was built with.
    pub fn config(&self) -> RTreeConfig {
        self.config
    }

    /// Maximum number of children per node.
    pub fn max_entries(&self) -> usize {
        self.config.max_entries
    }

    /// Nominal minimum fill; not enforced (see [`RTreeConfig::min_entries`]).
    pub fn min_entries(&self) -> usize {
        self.config.min_entries
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree stores no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of node levels, counting the leaves. A fresh tree has height 1.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Box enclosing every stored entry, or `None` when the tree is empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        if self.root.bbox.is_empty() {
            None
        } else {
            Some(self.root.bbox)
        }
    }

    /// Insert `value` under `bbox`.
    ///
    /// The box is copied into the tree. The same value may be inserted any number of
    /// times, under the same or different boxes.
    ///
    /// # Errors
    ///
    /// [`RTreeError::NonFiniteBox`] or [`RTreeError::InvertedBox`] for a malformed box;
    /// the tree is left untouched.
    pub fn insert(&mut self, bbox: BoundingBox, value: T) -> Result<(), RTreeError> {
        bbox.validate()?;
        let entry = Entry { bbox, value };
        if let Some((left, right)) = self.root.insert(entry, self.config.max_entries) {
            self.root = Node::branch(vec![left, right]);
            log::trace!("root split, height is now {}", self.root.height());
        }
        self.size += 1;
        Ok(())
    }

    /// Remove one entry stored under exactly `bbox` whose value equals `value`.
    ///
    /// Returns `false`, changing nothing, if no such entry exists. When duplicates exist
    /// the first one found in a depth-first walk of covering subtrees is removed; which
    /// copy that is depends on insertion history.
    ///
    /// Nodes left underfull (even empty) are not merged or rebalanced.
    pub fn remove(&mut self, bbox: &BoundingBox, value: &T) -> bool
    where
        T: PartialEq,
    {
        if self.size == 0 || !self.root.bbox.contains(bbox) {
            return false;
        }
        let removed = self.root.remove(bbox, value);
        if removed {
            self.size -= 1;
        }
        removed
    }

    /// Drop every entry. The tree returns to a single empty leaf.
    pub fn clear(&mut self) {
        log::debug!("clearing rtree of {} entries", self.size);
        self.root = Node::empty_leaf();
        self.size = 0;
    }

    fn visit_region<'a, F>(&'a self, region: Region, mut action: F) -> ControlFlow<()>
    where
        F: FnMut(&'a Entry<T>) -> ControlFlow<()>,
    {
        if self.size == 0 {
            return ControlFlow::Continue(());
        }
        self.root.visit(&region, &mut action)
    }

    /// Gather the values admitted by `region` and `filter`, in traversal order.
    fn collect_region<F>(&self, region: Region, mut filter: F) -> vec::IntoIter<&T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut out = Vec::new();
        let _ = self.visit_region(region, |e| {
            if filter(&e.value) {
                out.push(&e.value);
            }
            ControlFlow::Continue(())
        });
        out.into_iter()
    }

    /// Call `action` on every stored value.
    pub fn for_each(&self, mut action: impl FnMut(&T)) {
        let _ = self.visit_region(Region::All, |e| {
            action(&e.value);
            ControlFlow::Continue(())
        });
    }

    /// Call `action` on every stored value accepted by `filter`.
    pub fn for_each_filtered(
        &self,
        mut filter: impl FnMut(&T) -> bool,
        mut action: impl FnMut(&T),
    ) {
        let _ = self.visit_region(Region::All, |e| {
            if filter(&e.value) {
                action(&e.value);
            }
            ControlFlow::Continue(())
        });
    }

    /// Call `action` on every value whose box intersects `bbox` (edges inclusive).
    ///
    /// A query box with NaN coordinates, or with `min > max`, matches nothing.
    pub fn for_each_intersecting(&self, bbox: &BoundingBox, mut action: impl FnMut(&T)) {
        let _ = self.visit_region(Region::Intersecting(*bbox), |e| {
            action(&e.value);
            ControlFlow::Continue(())
        });
    }

    /// Like [`RTree::for_each_intersecting`], skipping values rejected by `filter`.
    pub fn for_each_intersecting_filtered(
        &self,
        bbox: &BoundingBox,
        mut filter: impl FnMut(&T) -> bool,
        mut action: impl FnMut(&T),
    ) {
        let _ = self.visit_region(Region::Intersecting(*bbox), |e| {
            if filter(&e.value) {
                action(&e.value);
            }
            ControlFlow::Continue(())
        });
    }

    /// Call `action` on every value whose box contains the point (edges inclusive).
    pub fn for_each_containing_point(&self, x: f64, y: f64, mut action: impl FnMut(&T)) {
        let _ = self.visit_region(Region::ContainingPoint(x, y), |e| {
            action(&e.value);
            ControlFlow::Continue(())
        });
    }

    /// Like [`RTree::for_each_containing_point`], skipping values rejected by `filter`.
    ///
    /// Useful when the box is only a cheap pre-test and `filter` does the exact one.
    pub fn for_each_containing_point_filtered(
        &self,
        x: f64,
        y: f64,
        mut filter: impl FnMut(&T) -> bool,
        mut action: impl FnMut(&T),
    ) {
        let _ = self.visit_region(Region::ContainingPoint(x, y), |e| {
            if filter(&e.value) {
                action(&e.value);
            }
            ControlFlow::Continue(())
        });
    }

    /// Walk every stored value until `action` returns `Break`.
    ///
    /// Returns `Break` if the walk was stopped early.
    pub fn visit(&self, mut action: impl FnMut(&T) -> ControlFlow<()>) -> ControlFlow<()> {
        self.visit_region(Region::All, |e| action(&e.value))
    }

    /// Walk values whose box intersects `bbox` until `action` returns `Break`.
    pub fn visit_intersecting(
        &self,
        bbox: &BoundingBox,
        mut action: impl FnMut(&T) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        self.visit_region(Region::Intersecting(*bbox), |e| action(&e.value))
    }

    /// Like [`RTree::visit_intersecting`], skipping values rejected by `filter`.
    ///
    /// Either callback can stop the walk by returning `Break`; a rejected value
    /// continues it.
    pub fn visit_intersecting_filtered(
        &self,
        bbox: &BoundingBox,
        mut filter: impl FnMut(&T) -> ControlFlow<(), bool>,
        mut action: impl FnMut(&T) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        self.visit_region(Region::Intersecting(*bbox), |e| {
            if filter(&e.value)? {
                action(&e.value)
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// Every stored value, in traversal order.
    ///
    /// The values are gathered up front, so the iterator is a snapshot of the walk.
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.collect_region(Region::All, |_| true)
    }

    /// Values whose box intersects `bbox`, in traversal order.
    pub fn query<'a>(&'a self, bbox: &BoundingBox) -> impl Iterator<Item = &'a T> + use<'a, T> {
        self.collect_region(Region::Intersecting(*bbox), |_| true)
    }

    /// Values whose box intersects `bbox` and that `filter` accepts.
    pub fn query_filtered<'a, F>(
        &'a self,
        bbox: &BoundingBox,
        filter: F,
    ) -> impl Iterator<Item = &'a T> + use<'a, T, F>
    where
        F: FnMut(&T) -> bool,
    {
        self.collect_region(Region::Intersecting(*bbox), filter)
    }

    /// Values whose box contains the point.
    pub fn query_point(&self, x: f64, y: f64) -> impl Iterator<Item = &T> + '_ {
        self.collect_region(Region::ContainingPoint(x, y), |_| true)
    }

    /// Values whose box contains the point and that `filter` accepts.
    pub fn query_point_filtered(
        &self,
        x: f64,
        y: f64,
        filter: impl FnMut(&T) -> bool,
    ) -> impl Iterator<Item = &T> + '_ {
        self.collect_region(Region::ContainingPoint(x, y), filter)
    }
}

impl<T> Debug for RTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("len", &self.size)
            .field("height", &self.height())
            .field("max_entries", &self.config.max_entries)
            .field("bounds", &self.bounds())
            .finish_non_exhaustive()
    }
}
