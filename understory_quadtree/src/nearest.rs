// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Best-first k-nearest-neighbor search.
//!
//! Candidates (subtrees and individual points) sit in one priority queue keyed by
//! squared distance. A subtree's key is the distance from the query to its box, which
//! never exceeds the distance to anything inside it, so points pop in ascending order.
//!
//! Equal keys are broken so the output matches a stable sort of
//! [`QuadNode::all_points`] by distance: a subtree pops before a point with the same
//! key, and points pop in traversal order (quadrant path, then slot within the leaf).

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::node::{MAX_DEPTH_LIMIT, QuadNode, Quadrant};
use crate::types::{Point, euclidean_compare, euclidean_distance};

/// A stored point returned by a nearest-neighbor query.
#[derive(Debug)]
pub struct Neighbor<'a, D> {
    /// The stored point.
    pub point: &'a Point<D>,
    /// Squared distance from the query; this is the ranking key.
    pub distance_squared: f64,
    /// Distance from the query.
    pub distance: f64,
}

impl<D> Clone for Neighbor<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Neighbor<'_, D> {}

enum Item<'a, D> {
    Node(&'a QuadNode<D>),
    Point(&'a Point<D>),
}

struct Candidate<'a, D> {
    distance_squared: f64,
    /// Quadrant path of the owning node, two bits per level, plus slot in the leaf.
    rank: (u128, usize),
    item: Item<'a, D>,
}

impl<D> Candidate<'_, D> {
    fn is_node(&self) -> bool {
        matches!(self.item, Item::Node(_))
    }
}

// `BinaryHeap` is a max-heap; "greater" here means "pops first".
impl<D> Ord for Candidate<'_, D> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance_squared
            .total_cmp(&self.distance_squared)
            .then_with(|| self.is_node().cmp(&other.is_node()))
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl<D> PartialOrd for Candidate<'_, D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D> PartialEq for Candidate<'_, D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<D> Eq for Candidate<'_, D> {}

fn path_bits(parent: u128, quadrant: Quadrant, depth: u8) -> u128 {
    let shift = 2 * u32::from(MAX_DEPTH_LIMIT.saturating_sub(depth));
    parent | ((quadrant.index() as u128) << shift)
}

/// The `count` points under `root` closest to `query`, nearest first.
///
/// Returns nothing when `count` is zero or `query` lies outside `root`.
pub(crate) fn search<D>(root: &QuadNode<D>, query: Point, count: usize) -> Vec<Neighbor<'_, D>> {
    if count == 0 {
        return Vec::new();
    }
    if root.locate(query.x, query.y).is_none() {
        tracing::debug!(
            x = query.x,
            y = query.y,
            "nearest-neighbor query outside tree bounds"
        );
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut heap = BinaryHeap::new();
    heap.push(Candidate {
        distance_squared: root.bounding_box().distance_squared_to(query.x, query.y),
        rank: (0, 0),
        item: Item::Node(root),
    });

    while let Some(Candidate {
        distance_squared,
        rank: (path, _),
        item,
    }) = heap.pop()
    {
        match item {
            Item::Point(point) => {
                out.push(Neighbor {
                    point,
                    distance_squared,
                    distance: euclidean_distance(&query, point),
                });
                if out.len() == count {
                    break;
                }
            }
            Item::Node(node) => match node.children() {
                Some(children) => {
                    for (quadrant, child) in Quadrant::ALL.into_iter().zip(children) {
                        heap.push(Candidate {
                            distance_squared: child
                                .bounding_box()
                                .distance_squared_to(query.x, query.y),
                            rank: (path_bits(path, quadrant, child.depth()), 0),
                            item: Item::Node(child),
                        });
                    }
                }
                None => {
                    for (slot, point) in node.points().iter().enumerate() {
                        heap.push(Candidate {
                            distance_squared: euclidean_compare(&query, point),
                            rank: (path, slot),
                            item: Item::Point(point),
                        });
                    }
                }
            },
        }
    }
    out
}
