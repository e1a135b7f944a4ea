// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible set from Kurbo rectangles.
//!
//! Index a scatter of `kurbo::Rect`s, then find which ones fall inside a viewport and
//! refine the candidates with an exact test.
//!
//! Run:
//! - `cargo run -p understory_demos --example rtree_visible_set`

use kurbo::{Circle, Point, Rect, Shape};
use understory_rtree::{BoundingBox, RTree};

fn main() {
    // A grid of circles, indexed by their bounding rectangles.
    let mut circles = Vec::new();
    let mut tree = RTree::new();
    for y in 0..20 {
        for x in 0..20 {
            let c = Circle::new(Point::new(f64::from(x) * 25.0, f64::from(y) * 25.0), 10.0);
            tree.insert(BoundingBox::from(c.bounding_box()), circles.len())
                .expect("finite box");
            circles.push(c);
        }
    }

    let viewport = Rect::new(90.0, 90.0, 210.0, 160.0);
    let candidates = tree.query(&viewport.into()).count();
    println!("{candidates} candidates intersect the viewport box");

    // Box overlap is only a candidate test; keep circles whose center is inside.
    let visible: Vec<usize> = tree
        .query_filtered(&viewport.into(), |&i| viewport.contains(circles[i].center))
        .copied()
        .collect();
    let count = visible.len();
    println!("{count} circles have their center in view: {visible:?}");

    let bounds: Rect = tree.bounds().expect("tree is not empty").into();
    println!("index bounds: {bounds:?}");
}
