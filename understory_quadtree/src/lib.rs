// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Quadtree: a 2D point quadtree over a fixed region.
//!
//! Understory Quadtree stores points with optional payloads and answers spatial queries.
//!
//! - Insert points; leaves split into four quadrants once they exceed their capacity.
//! - Look up a point by exact coordinates, or gather everything inside a rectangle.
//! - Find the `k` nearest stored points to a location with a best-first search.
//!
//! Locations can be given as a [`Point`], a [`kurbo::Point`], an `(x, y)` tuple, a
//! `[x, y]` array, or a coordinate slice; see [`ToPoint`].
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{Aabb2D, QuadTree};
//!
//! // A 100×100 region centered on the origin.
//! let mut tree = QuadTree::new((0.0, 0.0), 100.0, 100.0)?;
//! tree.insert((1.0, 2.0), "home")?;
//! tree.insert((7.0, 5.0), "dog")?;
//! tree.insert((-15.0, 17.0), "park")?;
//!
//! // Exact lookup.
//! assert_eq!(tree.find((7.0, 5.0))?.map(|p| p.data), Some("dog"));
//!
//! // Closed-interval range query.
//! let near_origin = tree.within_bb(&Aabb2D::new(-5.0, -5.0, 10.0, 10.0));
//! assert_eq!(near_origin.len(), 2);
//!
//! // Nearest neighbors, closest first.
//! let nearest = tree.nearest_neighbors((5.0, 5.0), 2)?;
//! assert_eq!(nearest[0].point.data, "dog");
//! assert_eq!(nearest[1].point.data, "home");
//! # Ok::<(), understory_quadtree::Error>(())
//! ```
//!
//! Points outside the region are rejected rather than growing the tree:
//!
//! ```rust
//! use understory_quadtree::{Error, QuadTree};
//!
//! let mut tree: QuadTree = QuadTree::new((0.0, 0.0), 20.0, 20.0)?;
//! assert!(matches!(tree.insert((17.0, 55.0), ()), Err(Error::OutOfBounds { .. })));
//! assert!(tree.is_empty());
//! # Ok::<(), Error>(())
//! ```
//!
//! ## Containment
//!
//! Placement uses half-open boxes: a point on a node's maximum edge belongs to the
//! neighbor, so every point in the region has exactly one home. Range queries use
//! closed boxes, so points on the query's edges are reported.
//!
//! Within a node, "left" is `x <= center.x` and "upper" is `y >= center.y`.
//!
//! ## Depth limit
//!
//! Leaves stop subdividing at [`QuadTreeOptions::max_depth`] and keep any further
//! points locally. Many points with identical coordinates therefore cost a deep but
//! bounded chain of nodes instead of unbounded recursion.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for coordinates. NaN locations are never contained in
//! any node, so they are rejected on insertion and never match.
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature when building
//! without `std` so Kurbo can provide the float math used for distances.

#![no_std]

extern crate alloc;

pub mod error;
pub mod nearest;
pub mod node;
pub mod tree;
pub mod types;

pub use error::Error;
pub use nearest::Neighbor;
pub use node::{
    DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH, Descent, MAX_DEPTH_LIMIT, NodeStats, QuadNode, Quadrant,
};
pub use tree::{QuadTree, QuadTreeOptions};
pub use types::{Aabb2D, Point, ToPoint, euclidean_compare, euclidean_distance};
