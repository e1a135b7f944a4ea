// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree basics.
//!
//! Insert a few boxes, query by rectangle and point, remove one, and stop a walk early.
//!
//! Run:
//! - `cargo run -p understory_demos --example rtree_basics`

use std::ops::ControlFlow;

use understory_rtree::{BoundingBox, RTree};

fn main() {
    let mut tree = RTree::with_max_entries(4).expect("4 is a valid capacity");
    for i in 0..10_u32 {
        let x = f64::from(i) * 10.0;
        tree.insert(BoundingBox::from_xywh(x, 0.0, 8.0, 8.0), i)
            .expect("finite box");
    }
    println!("{tree:?}");

    // Rectangle query
    let window = BoundingBox::new(15.0, 2.0, 35.0, 4.0);
    let hits: Vec<_> = tree.query(&window).collect();
    println!("hits in [15,35]x[2,4]: {hits:?}");

    // Point query
    let hits: Vec<_> = tree.query_point(42.0, 1.0).collect();
    println!("hits at (42,1): {hits:?}");
    assert_eq!(hits, vec![&4]);

    // Point query with an exact refinement on the value
    let even = tree.query_point_filtered(42.0, 1.0, |v| v % 2 == 0);
    println!("even hits at (42,1): {:?}", even.collect::<Vec<_>>());

    // Remove by exact box and value
    let removed = tree.remove(&BoundingBox::from_xywh(40.0, 0.0, 8.0, 8.0), &4);
    println!("removed 4: {removed}, len now {}", tree.len());
    let left: Vec<_> = tree.items().collect();
    println!("remaining values: {left:?}");

    // Stop at the first odd value
    let mut first_odd = None;
    let _ = tree.visit(|v| {
        if v % 2 == 1 {
            first_odd = Some(*v);
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    println!("first odd value in traversal order: {first_odd:?}");
}
