// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb2D, Point, QuadTree};

const EXTENT: f64 = 1000.0;

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
    fn coord(&mut self) -> f64 {
        (self.next_f64() - 0.5) * EXTENT
    }
}

fn gen_random_points(count: usize, seed: u64) -> Vec<Point<u32>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|i| Point::with_data(rng.coord(), rng.coord(), i as u32))
        .collect()
}

fn gen_clustered_points(count: usize, clusters: usize, spread: f64, seed: u64) -> Vec<Point<u32>> {
    let mut rng = Rng::new(seed);
    let centers: Vec<_> = (0..clusters).map(|_| (rng.coord() * 0.8, rng.coord() * 0.8)).collect();
    (0..count)
        .map(|i| {
            let (cx, cy) = centers[i % clusters];
            let x = cx + (rng.next_f64() - 0.5) * spread;
            let y = cy + (rng.next_f64() - 0.5) * spread;
            Point::with_data(x, y, i as u32)
        })
        .collect()
}

fn build(points: &[Point<u32>], capacity: usize) -> QuadTree<u32> {
    let mut tree = QuadTree::with_capacity((0.0, 0.0), EXTENT, EXTENT, capacity)
        .expect("center and extent are valid");
    for p in points.iter().copied() {
        tree.insert_point(p).expect("points lie inside the extent");
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_insert");
    for &n in &[1_000usize, 10_000] {
        let uniform = gen_random_points(n, 0xA11CE);
        let clustered = gen_clustered_points(n, 16, 20.0, 0xB0B);
        group.throughput(Throughput::Elements(n as u64));
        for &capacity in &[4usize, 16] {
            group.bench_function(format!("uniform_n{n}_cap{capacity}"), |b| {
                b.iter_batched(
                    || uniform.clone(),
                    |pts| black_box(build(&pts, capacity)),
                    BatchSize::SmallInput,
                )
            });
            group.bench_function(format!("clustered_n{n}_cap{capacity}"), |b| {
                b.iter_batched(
                    || clustered.clone(),
                    |pts| black_box(build(&pts, capacity)),
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query");
    for &n in &[1_000usize, 10_000] {
        let points = gen_random_points(n, 0xC0FFEE);
        let tree = build(&points, 8);
        let mut rng = Rng::new(7);
        let probes: Vec<_> = (0..256).map(|_| (rng.coord(), rng.coord())).collect();

        group.bench_function(format!("find_n{n}"), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for p in points.iter().take(256) {
                    hits += usize::from(matches!(tree.find((p.x, p.y)), Ok(Some(_))));
                }
                black_box(hits)
            })
        });

        for &side in &[10.0, 100.0] {
            group.bench_function(format!("within_bb_side{side}_n{n}"), |b| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for &(x, y) in &probes {
                        let bb = Aabb2D::new(x, y, x + side, y + side);
                        hits += tree.within_bb(&bb).len();
                    }
                    black_box(hits)
                })
            });
        }

        for &k in &[1usize, 10, 50] {
            group.bench_function(format!("nearest_k{k}_n{n}"), |b| {
                b.iter(|| {
                    let mut total = 0.0;
                    for &probe in &probes {
                        if let Ok(found) = tree.nearest_neighbors(probe, k) {
                            total += found.last().map_or(0.0, |nb| nb.distance_squared);
                        }
                    }
                    black_box(total)
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_queries);
criterion_main!(benches);
