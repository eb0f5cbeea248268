// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb2D, QuadTree};

use rstar::{AABB, RTree};

const EXTENT: f64 = 1000.0;

fn gen_grid_points(n: usize, cell: f64) -> Vec<[f64; 2]> {
    let origin = -(n as f64) * cell / 2.0;
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            // Nudge off the grid lines so quadrant splits are not all ties.
            let px = origin + x as f64 * cell + 0.25 * cell;
            let py = origin + y as f64 * cell + 0.5 * cell;
            out.push([px, py]);
        }
    }
    out
}

fn bench_rstar_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_external_compare");
    for &n in &[64usize, 128] {
        let points = gen_grid_points(n, EXTENT / n as f64);
        let query = Aabb2D::new(-200.0, -200.0, 200.0, 200.0);
        let probe = [3.3, -7.7];
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_query_n{n}"), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let mut tree: QuadTree = QuadTree::new((0.0, 0.0), EXTENT, EXTENT)
                        .expect("center and extent are valid");
                    tree.extend(pts).expect("points lie inside the extent");
                    let hits = tree.within_bb(&query).len();
                    let nearest = tree.nearest_neighbors(probe, 10).map_or(0, |v| v.len());
                    black_box((hits, nearest));
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{n}"), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    let envelope = AABB::from_corners(
                        [query.min_x, query.min_y],
                        [query.max_x, query.max_y],
                    );
                    let hits = tree.locate_in_envelope(&envelope).count();
                    let nearest = tree.nearest_neighbor_iter(&probe).take(10).count();
                    black_box((hits, nearest));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_external_compare);
criterion_main!(benches);
