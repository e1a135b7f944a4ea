// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory R-tree: insert, query, and remove.

use understory_rtree::{BoundingBox, RTree};

fn main() {
    let mut tree = RTree::new();
    tree.insert(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 1_u32)
        .unwrap();
    tree.insert(BoundingBox::new(5.0, 5.0, 15.0, 15.0), 2)
        .unwrap();

    // Query a point covered by both boxes
    let hits: Vec<_> = tree.query_point(6.0, 6.0).collect();
    println!("hits at (6,6): {hits:?}");

    // Remove the first box and query again
    let removed = tree.remove(&BoundingBox::new(0.0, 0.0, 10.0, 10.0), &1);
    let hits: Vec<_> = tree.query_point(6.0, 6.0).collect();
    println!("removed: {removed}, hits at (6,6): {hits:?}");
}
