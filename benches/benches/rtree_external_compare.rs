// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rtree::{BoundingBox, RTree as UnderstoryRTree};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<BoundingBox> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(BoundingBox::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

fn to_rstar_rects(v: &[BoundingBox]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.min_x, r.min_y], [r.max_x, r.max_y]))
        .collect()
}

fn bench_rtree_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_f64");
    for &n in &[64usize, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let query = BoundingBox::from_xywh(100.0, 100.0, 400.0, 400.0);
        let aabb = AABB::from_corners([query.min_x, query.min_y], [query.max_x, query.max_y]);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_insert_query_n{}", n), |b| {
            b.iter(|| {
                let mut tree = UnderstoryRTree::new();
                for (i, r) in rects.iter().copied().enumerate() {
                    tree.insert(r, i as u32).unwrap();
                }
                let hits: usize = tree.query(&query).count();
                black_box(hits);
            })
        });

        group.bench_function(format!("rstar_insert_query_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let mut tree = RTree::new();
                    for r in rectangles {
                        tree.insert(r);
                    }
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_f64);
criterion_main!(benches);
