// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Insert labelled points, look one up, run a range query, and watch the tree subdivide.
//!
//! Run:
//! - `cargo run -p understory_quadtree_demos --example quadtree_basics`
//! - `RUST_LOG=understory_quadtree=trace cargo run -p understory_quadtree_demos --example quadtree_basics`

use understory_quadtree::{Aabb2D, Error, QuadTree};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // A 100×100 region centered on the origin.
    let mut tree = QuadTree::new((0.0, 0.0), 100.0, 100.0)?;
    let places = [
        ((1.0, 2.0), "home"),
        ((7.0, 5.0), "dog"),
        ((6.0, 4.0), "cat"),
        ((-1.0, -2.0), "garden"),
        ((10.0, -22.0), "shop"),
        ((10.0, 35.0), "fish"),
        ((11.0, 42.0), "station"),
        ((-15.0, 17.0), "park"),
    ];
    for (at, label) in places {
        tree.insert(at, label)?;
    }
    tracing::info!(len = tree.len(), stats = ?tree.stats(), "built tree");

    // Exact lookup.
    let found = tree.find((7.0, 5.0))?;
    println!("at (7, 5): {:?}", found.map(|p| p.data));

    // Range query; edges are inclusive.
    let bb = Aabb2D::new(-20.0, -20.0, 20.0, 20.0);
    for p in tree.within_bb(&bb) {
        println!("in {bb:?}: ({}, {}) {}", p.x, p.y, p.data);
    }

    // Points outside the region are rejected and the tree is unchanged.
    match tree.insert((170.0, 55.0), "moon") {
        Err(err) => println!("rejected: {err}"),
        Ok(()) => unreachable!("point lies outside the tree region"),
    }
    assert_eq!(tree.len(), places.len());
    Ok(())
}
