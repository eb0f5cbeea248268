// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest neighbors.
//!
//! Scatter points on a grid, then ask for the closest few to a couple of probes.
//!
//! Run:
//! - `cargo run -p understory_quadtree_demos --example quadtree_nearest`

use kurbo::Point;
use understory_quadtree::{Error, QuadTree, QuadTreeOptions};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = QuadTreeOptions {
        capacity: 8,
        ..Default::default()
    };
    let mut tree = QuadTree::with_options(Point::ZERO, 200.0, 200.0, options)?;
    for gx in -9..10 {
        for gy in -9..10 {
            let at = (f64::from(gx) * 10.0 + 0.5, f64::from(gy) * 10.0 - 0.25);
            tree.insert(at, (gx, gy))?;
        }
    }
    tracing::info!(len = tree.len(), stats = ?tree.stats(), "built grid");

    for probe in [Point::new(3.0, 4.0), Point::new(-42.0, 77.0)] {
        let nearest = tree.nearest_neighbors(probe, 5)?;
        println!("closest to ({}, {}):", probe.x, probe.y);
        for n in &nearest {
            println!(
                "  cell {:?} at ({}, {}) distance {:.3}",
                n.point.data, n.point.x, n.point.y, n.distance
            );
        }
    }

    // Outside the region there is nothing to report.
    let outside = tree.nearest_neighbors(Point::new(500.0, 0.0), 5)?;
    assert!(outside.is_empty());
    Ok(())
}
