// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rtree::{BoundingBox, RTree};

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

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, extent: f64, rect_w: f64, rect_h: f64) -> Vec<BoundingBox> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (extent - rect_w).max(1.0);
        let y0 = rng.next_f64() * (extent - rect_h).max(1.0);
        out.push(BoundingBox::from_xywh(x0, y0, rect_w, rect_h));
    }
    out
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<BoundingBox> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(BoundingBox::from_xywh(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

fn build(rects: &[BoundingBox], max_entries: usize) -> RTree<u32> {
    let mut tree = RTree::with_max_entries(max_entries).unwrap();
    for (i, r) in rects.iter().copied().enumerate() {
        tree.insert(r, i as u32).unwrap();
    }
    tree
}

fn bench_insert_query_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_grid");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        for &cap in &[8usize, 32] {
            group.bench_function(format!("insert_query_n{}_cap{}", n, cap), |b| {
                b.iter(|| {
                    let tree = build(&rects, cap);
                    let hits = tree
                        .query(&BoundingBox::from_xywh(100.0, 100.0, 400.0, 400.0))
                        .count();
                    black_box(hits);
                })
            });
        }
    }
    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_random");
    let rects = gen_random_rects(4096, 2000.0, 12.0, 12.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("insert_query", |b| {
        b.iter(|| {
            let tree = build(&rects, 32);
            let hits = tree
                .query(&BoundingBox::from_xywh(800.0, 800.0, 400.0, 400.0))
                .count();
            black_box(hits);
        })
    });
    group.finish();
}

fn bench_insert_clustered(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_clustered");
    let rects = gen_clustered_rects(16, 256, 128.0);
    group.bench_function("insert_query", |b| {
        b.iter(|| {
            let tree = build(&rects, 32);
            let hits = tree
                .query(&BoundingBox::from_xywh(800.0, 800.0, 400.0, 400.0))
                .count();
            black_box(hits);
        })
    });
    group.finish();
}

fn bench_query_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_query_heavy");
    let rects = gen_grid_rects(128, 8.0);
    let tree = build(&rects, 32);
    group.bench_function("many_rect_queries", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..256 {
                let x = (q % 64) as f64 * 8.0;
                let y = (q / 64) as f64 * 8.0;
                tree.for_each_intersecting(&BoundingBox::from_xywh(x, y, 64.0, 64.0), |_| {
                    total += 1;
                });
            }
            black_box(total);
        })
    });
    group.bench_function("many_point_queries", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..1024 {
                let x = (q % 128) as f64 * 8.0 + 4.0;
                let y = (q / 128) as f64 * 8.0 + 4.0;
                total += tree.query_point(x, y).count();
            }
            black_box(total);
        })
    });
    group.finish();
}

fn bench_remove_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_remove_churn");
    let rects = gen_grid_rects(64, 10.0);
    group.bench_function("remove_half_then_reinsert", |b| {
        b.iter_batched(
            || build(&rects, 16),
            |mut tree| {
                for (i, r) in rects.iter().enumerate().step_by(2) {
                    let removed = tree.remove(r, &(i as u32));
                    debug_assert!(removed);
                }
                for (i, r) in rects.iter().copied().enumerate().step_by(2) {
                    tree.insert(r, i as u32).unwrap();
                }
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_query_grid,
    bench_insert_random,
    bench_insert_clustered,
    bench_query_heavy,
    bench_remove_churn,
);
criterion_main!(benches);
