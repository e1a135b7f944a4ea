// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_rtree --heading-base-level=0

//! Understory R-tree: a dynamic, in-memory bounding-box index.
//!
//! Understory R-tree answers "which objects overlap this rectangle" over large sets of 2D
//! objects that are inserted and removed one at a time.
//!
//! - Insert any value under an `f64` [`BoundingBox`]; the value stays opaque to the tree.
//! - Query by intersecting rectangle or by point, with an optional value filter, or list
//!   every stored value.
//! - Stop a traversal early by returning [`ControlFlow::Break`](core::ops::ControlFlow::Break)
//!   from the callback.
//! - Remove an entry by its exact box and value.
//!
//! Results are box-overlap *candidates*; callers that need exact geometry must test it themselves.
//!
//! # Example
//!
//! ```rust
//! use understory_rtree::{BoundingBox, RTree};
//!
//! let mut tree = RTree::new();
//! tree.insert(BoundingBox::new(0.0, 0.0, 10.0, 10.0), "parcel-1").unwrap();
//! tree.insert(BoundingBox::new(20.0, 0.0, 30.0, 10.0), "parcel-2").unwrap();
//!
//! let hits = tree.query(&BoundingBox::new(5.0, 5.0, 25.0, 6.0));
//! assert_eq!(hits.count(), 2);
//!
//! assert!(tree.remove(&BoundingBox::new(0.0, 0.0, 10.0, 10.0), &"parcel-1"));
//! assert_eq!(tree.query_point(5.0, 5.0).count(), 0);
//! assert!(tree.items().eq([&"parcel-2"]));
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! Early exit:
//!
//! ```rust
//! use core::ops::ControlFlow;
//! use understory_rtree::{BoundingBox, RTree};
//!
//! let mut tree = RTree::with_max_entries(4).unwrap();
//! for i in 0..100_u32 {
//!     let x = f64::from(i);
//!     tree.insert(BoundingBox::from_xywh(x, 0.0, 1.0, 1.0), i).unwrap();
//! }
//!
//! // Find any value above 50 and stop looking.
//! let mut found = None;
//! let flow = tree.visit(|v| {
//!     if *v > 50 {
//!         found = Some(*v);
//!         ControlFlow::Break(())
//!     } else {
//!         ControlFlow::Continue(())
//!     }
//! });
//! assert!(flow.is_break());
//! assert!(found.is_some());
//! ```
//!
//! ## How it works
//!
//! Each node stores the exact union of its children's boxes. Insertion descends through the
//! child needing the least area growth (ties go to the smaller child), growing each crossed
//! box as it goes. A full leaf splits in two, and the split propagates upward; a root split
//! adds a level, which is the only way the tree gets taller.
//!
//! Splits are positional: children keep their order and the first `ceil(n / 2)` go left.
//! This is deterministic and cheap, but not an area-minimizing (R*-style) split.
//!
//! ## Known limitations
//!
//! - Removal never merges or rebalances nodes. Leaves emptied by removal stay in the tree,
//!   so long insert/remove churn can leave many sparse nodes and slow queries down. Counts
//!   and results stay correct. [`RTree::clear`] resets the structure.
//! - The tree is not synchronized. Concurrent writers need an external lock; concurrent
//!   readers through `&RTree<T>` are fine.
//! - Boxes with NaN or infinite coordinates, or with `min > max`, are rejected by
//!   [`RTree::insert`] with an [`RTreeError`].
//!
//! ## Features
//!
//! - `kurbo`: conversions between [`BoundingBox`] and `kurbo::Rect`.
//!   Pair with `std` (default) or `libm`.
//! - `serde`: `Serialize`/`Deserialize` for [`BoundingBox`] and [`RTreeConfig`].
//!
//! Diagnostics go through the `log` facade: splits and root growth at `trace`, construction
//! and clearing at `debug`.

#![no_std]

extern crate alloc;

pub mod bbox;
pub mod config;
pub mod error;
mod node;
pub mod tree;

pub use bbox::BoundingBox;
pub use config::{DEFAULT_MAX_ENTRIES, DEFAULT_MIN_ENTRIES, RTreeConfig};
pub use error::RTreeError;
pub use tree::RTree;
