// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes: leaves holding entries and branches holding child nodes.
//!
//! Nodes never point at their parent. Insertion recurses down the chosen path and a
//! node that had to split hands its two replacements back to the caller's frame;
//! removal reports success back up the stack so each ancestor can tighten its box.

use alloc::vec::Vec;
use core::ops::ControlFlow;

use crate::bbox::BoundingBox;

/// A stored box and the caller's value.
#[derive(Clone, Debug)]
pub(crate) struct Entry<T> {
    pub(crate) bbox: BoundingBox,
    pub(crate) value: T,
}

/// The two nodes that take the place of a node that split.
pub(crate) type SplitPair<T> = (Node<T>, Node<T>);

#[derive(Clone, Debug)]
pub(crate) enum NodeKind<T> {
    Leaf(Vec<Entry<T>>),
    Branch(Vec<Node<T>>),
}

/// A node and the minimal box enclosing all of its children.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) bbox: BoundingBox,
    pub(crate) kind: NodeKind<T>,
}

/// Spatial predicate used to prune a traversal.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Region {
    All,
    Intersecting(BoundingBox),
    ContainingPoint(f64, f64),
}

impl Region {
    #[inline]
    fn admits(&self, bbox: &BoundingBox) -> bool {
        match self {
            Self::All => true,
            Self::Intersecting(query) => bbox.intersects(query),
            Self::ContainingPoint(x, y) => bbox.contains_point(*x, *y),
        }
    }
}

impl<T> Node<T> {
    pub(crate) fn empty_leaf() -> Self {
        Self {
            bbox: BoundingBox::EMPTY,
            kind: NodeKind::Leaf(Vec::new()),
        }
    }

    fn leaf(entries: Vec<Entry<T>>) -> Self {
        let bbox = BoundingBox::union_of(entries.iter().map(|e| &e.bbox));
        Self {
            bbox,
            kind: NodeKind::Leaf(entries),
        }
    }

    pub(crate) fn branch(children: Vec<Self>) -> Self {
        let bbox = BoundingBox::union_of(children.iter().map(|c| &c.bbox));
        Self {
            bbox,
            kind: NodeKind::Branch(children),
        }
    }

    /// Number of levels from this node down to its leaves.
    ///
    /// Splits only ever add a level at the root, so every leaf sits at the same depth.
    pub(crate) fn height(&self) -> usize {
        let mut node = self;
        let mut h = 1;
        while let NodeKind::Branch(children) = &node.kind {
            let Some(first) = children.first() else { break };
            node = first;
            h += 1;
        }
        h
    }

    /// Recompute this node's box from its current children.
    pub(crate) fn update_envelope(&mut self) {
        self.bbox = match &self.kind {
            NodeKind::Leaf(entries) => BoundingBox::union_of(entries.iter().map(|e| &e.bbox)),
            NodeKind::Branch(children) => BoundingBox::union_of(children.iter().map(|c| &c.bbox)),
        };
    }

    /// Insert `entry` below this node.
    ///
    /// Returns `Some` when this node was full and split; the caller must then put the
    /// returned pair in this node's place. The node itself is left drained in that case.
    pub(crate) fn insert(&mut self, entry: Entry<T>, max_entries: usize) -> Option<SplitPair<T>> {
        match &mut self.kind {
            NodeKind::Leaf(entries) => {
                if entries.len() < max_entries {
                    self.bbox.expand_to_include(&entry.bbox);
                    entries.push(entry);
                    None
                } else {
                    Some(split_leaf(core::mem::take(entries), entry))
                }
            }
            NodeKind::Branch(children) => {
                // The branch encloses the new box however the insertion resolves below.
                self.bbox.expand_to_include(&entry.bbox);
                let idx = choose_subtree(children, &entry.bbox);
                let pair = children[idx].insert(entry, max_entries)?;
                if children.len() < max_entries {
                    replace_child(children, idx, pair);
                    None
                } else {
                    Some(split_branch(core::mem::take(children), idx, pair))
                }
            }
        }
    }

    /// Remove the first entry equal to `(bbox, value)` found below this node.
    ///
    /// Branches only descend into children whose box covers `bbox`, in order, and stop
    /// at the first child that removes something. Every node on the successful path
    /// recomputes its box on the way back up. Empty nodes are left in place.
    pub(crate) fn remove(&mut self, bbox: &BoundingBox, value: &T) -> bool
    where
        T: PartialEq,
    {
        let removed = match &mut self.kind {
            NodeKind::Leaf(entries) => {
                match entries
                    .iter()
                    .position(|e| e.bbox == *bbox && e.value == *value)
                {
                    Some(pos) => {
                        let _ = entries.remove(pos);
                        true
                    }
                    None => false,
                }
            }
            NodeKind::Branch(children) => children
                .iter_mut()
                .any(|c| c.bbox.contains(bbox) && c.remove(bbox, value)),
        };
        if removed {
            self.update_envelope();
        }
        removed
    }

    /// Depth-first walk over every entry admitted by `region`, in sibling order.
    ///
    /// Subtrees whose box is not admitted are skipped. A `Break` from `action` stops the
    /// whole walk and is returned to the caller.
    pub(crate) fn visit<'a, F>(&'a self, region: &Region, action: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&'a Entry<T>) -> ControlFlow<()>,
    {
        match &self.kind {
            NodeKind::Leaf(entries) => {
                for e in entries {
                    if region.admits(&e.bbox) {
                        action(e)?;
                    }
                }
            }
            NodeKind::Branch(children) => {
                for c in children {
                    if region.admits(&c.bbox) {
                        c.visit(region, action)?;
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }
}

/// Pick the child needing the least area growth to enclose `bbox`.
///
/// Ties go to the child with the smaller current area, then to the earlier child.
fn choose_subtree<T>(children: &[Node<T>], bbox: &BoundingBox) -> usize {
    let mut best_idx = 0;
    let mut best_cost = f64::INFINITY;
    let mut best_area = f64::INFINITY;
    for (i, c) in children.iter().enumerate() {
        let cost = c.bbox.required_expansion(bbox);
        let area = c.bbox.area();
        if cost < best_cost || (cost == best_cost && area < best_area) {
            best_idx = i;
            best_cost = cost;
            best_area = area;
        }
    }
    best_idx
}

/// Cut `items` in order: the first `ceil(n / 2)` stay left, the rest go right.
fn split_positional<I>(mut items: Vec<I>) -> (Vec<I>, Vec<I>) {
    let mid = items.len().div_ceil(2);
    let right = items.split_off(mid);
    (items, right)
}

/// Split a full leaf's entries plus the incoming one into two leaves.
fn split_leaf<T>(mut entries: Vec<Entry<T>>, entry: Entry<T>) -> SplitPair<T> {
    entries.push(entry);
    log::trace!("splitting leaf of {} entries", entries.len());
    let (left, right) = split_positional(entries);
    (Node::leaf(left), Node::leaf(right))
}

/// Put a split child's pair into a branch with spare room.
///
/// The first node takes the old child's slot; the second is appended.
fn replace_child<T>(children: &mut Vec<Node<T>>, idx: usize, (first, second): SplitPair<T>) {
    children[idx] = first;
    children.push(second);
}

/// Split a full branch after one of its children split.
///
/// Same layout as [`replace_child`], then the enlarged list is cut positionally.
fn split_branch<T>(mut children: Vec<Node<T>>, idx: usize, pair: SplitPair<T>) -> SplitPair<T> {
    replace_child(&mut children, idx, pair);
    log::trace!("splitting branch of {} children", children.len());
    let (left, right) = split_positional(children);
    (Node::branch(left), Node::branch(right))
}

#[cfg(test)]
impl<T> Node<T> {
    /// Walk the subtree asserting its structural invariants; returns (entry count, height).
    pub(crate) fn assert_invariants(&self, max_entries: usize, is_root: bool) -> (usize, usize) {
        match &self.kind {
            NodeKind::Leaf(entries) => {
                assert!(entries.len() <= max_entries, "leaf over capacity");
                let expect = BoundingBox::union_of(entries.iter().map(|e| &e.bbox));
                assert_eq!(self.bbox, expect, "leaf box is stale");
                (entries.len(), 1)
            }
            NodeKind::Branch(children) => {
                assert!(!children.is_empty(), "branch without children");
                assert!(children.len() <= max_entries, "branch over capacity");
                if is_root {
                    assert!(children.len() >= 2, "branch root with a single child");
                }
                let expect = BoundingBox::union_of(children.iter().map(|c| &c.bbox));
                assert_eq!(self.bbox, expect, "branch box is stale");
                let mut count = 0;
                let mut height = None;
                for c in children {
                    let (n, h) = c.assert_invariants(max_entries, false);
                    count += n;
                    assert!(height.is_none_or(|prev| prev == h), "uneven leaf depth");
                    height = Some(h);
                }
                (count, height.unwrap_or(0) + 1)
            }
        }
    }
}
