// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive quadrant partition: insertion, subdivision, lookup, and range gathering.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::Error;
use crate::nearest::{self, Neighbor};
use crate::types::{Aabb2D, Point};

/// Number of points a leaf holds before it subdivides, unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 4;

/// Depth at which leaves stop subdividing, unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: u8 = 32;

/// Hard ceiling for node depth.
///
/// Nearest-neighbor ranking packs the quadrant path of a node into a `u128`, two bits per level.
pub const MAX_DEPTH_LIMIT: u8 = 64;

/// One of the four equal partitions of an internal node.
///
/// Relative to the node center, "left" is `x <= center.x` and "upper" is `y >= center.y`,
/// so every point falls in exactly one quadrant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `x <= center.x` and `y >= center.y`.
    UpperLeft = 0,
    /// `x > center.x` and `y >= center.y`.
    UpperRight = 1,
    /// `x <= center.x` and `y < center.y`.
    LowerLeft = 2,
    /// `x > center.x` and `y < center.y`.
    LowerRight = 3,
}

impl Quadrant {
    /// All quadrants, in traversal order.
    pub const ALL: [Self; 4] = [
        Self::UpperLeft,
        Self::UpperRight,
        Self::LowerLeft,
        Self::LowerRight,
    ];

    /// Position of this quadrant in [`QuadNode::children`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A node of the quadtree.
///
/// A node is either a leaf holding points directly, or an internal node owning exactly
/// four children and no points. Leaves switch to internal the first time they would
/// exceed their capacity, and never switch back.
///
/// Leaves at the depth limit never subdivide and keep any overflow locally, so
/// duplicate coordinates cannot drive unbounded subdivision.
#[derive(Clone)]
pub struct QuadNode<D = ()> {
    center: Point,
    width: f64,
    height: f64,
    capacity: usize,
    max_depth: u8,
    depth: u8,
    bounding_box: Aabb2D,
    points: Vec<Point<D>>,
    children: Option<Box<[Self; 4]>>,
}

impl<D> core::fmt::Debug for QuadNode<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadNode")
            .field("center", &self.center)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("depth", &self.depth)
            .field("points", &self.points.len())
            .field("leaf", &self.is_leaf())
            .finish_non_exhaustive()
    }
}

/// Result of [`QuadNode::find_node`]: the node reached and how we got there.
#[derive(Debug)]
pub struct Descent<'a, D> {
    /// The leaf that holds (or would hold) the searched point.
    pub node: &'a QuadNode<D>,
    /// Every node visited, from the starting node to `node` (inclusive).
    pub path: Vec<&'a QuadNode<D>>,
}

/// Structural summary of a subtree, see [`QuadNode::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeStats {
    /// Total number of nodes.
    pub node_count: usize,
    /// Number of leaves.
    pub leaf_count: usize,
    /// Number of stored points.
    pub point_count: usize,
    /// Absolute depth of the deepest node.
    pub max_depth: u8,
    /// Leaves holding more points than their capacity (only possible at the depth limit).
    pub overflow_leaves: usize,
}

/// Whether `width` × `height` is a usable node extent.
pub(crate) fn extent_is_valid(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0
}

impl<D> QuadNode<D> {
    /// Create an empty leaf with the default capacity.
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self::with_capacity(center, width, height, DEFAULT_CAPACITY)
    }

    /// Create an empty leaf holding up to `capacity` points before subdividing.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(center: Point, width: f64, height: f64, capacity: usize) -> Self {
        Self::with_limits(center, width, height, capacity, DEFAULT_MAX_DEPTH)
    }

    /// Create an empty leaf with both a capacity and a depth limit.
    ///
    /// `max_depth` is clamped to [`MAX_DEPTH_LIMIT`].
    ///
    /// `width` and `height` must be finite and non-negative. Debug builds assert this;
    /// release builds produce a node that rejects every point.
    /// [`QuadTree`](crate::QuadTree) validates the extent before building its root.
    pub fn with_limits(
        center: Point,
        width: f64,
        height: f64,
        capacity: usize,
        max_depth: u8,
    ) -> Self {
        debug_assert!(
            extent_is_valid(width, height),
            "node extent must be finite and non-negative"
        );
        Self {
            center,
            width,
            height,
            capacity: capacity.max(1),
            max_depth: max_depth.min(MAX_DEPTH_LIMIT),
            depth: 0,
            bounding_box: Aabb2D::from_center_size(center.x, center.y, width, height),
            points: Vec::new(),
            children: None,
        }
    }

    // Children take their edges straight from the parent so siblings tile it exactly.
    fn child(&self, bounding_box: Aabb2D) -> Self {
        Self {
            center: bounding_box.center(),
            width: bounding_box.width(),
            height: bounding_box.height(),
            capacity: self.capacity,
            max_depth: self.max_depth,
            depth: self.depth + 1,
            bounding_box,
            points: Vec::new(),
            children: None,
        }
    }

    /// Center of this node; also the split point between its quadrants.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Width of this node.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height of this node.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Point capacity of a leaf.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Depth at which leaves stop subdividing.
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Depth of this node; a freshly constructed node is at depth zero.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Extent of this node, fixed at construction.
    pub fn bounding_box(&self) -> Aabb2D {
        self.bounding_box
    }

    /// Points stored directly on this node. Always empty for internal nodes.
    pub fn points(&self) -> &[Point<D>] {
        &self.points
    }

    /// The four children in [`Quadrant::ALL`] order, or `None` for a leaf.
    pub fn children(&self) -> Option<&[Self; 4]> {
        self.children.as_deref()
    }

    /// The child covering `quadrant`, or `None` for a leaf.
    pub fn child_at(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children().map(|c| &c[quadrant.index()])
    }

    /// Whether this node stores points directly.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether `point` may be placed under this node (max edges excluded).
    pub fn contains_point<E>(&self, point: &Point<E>) -> bool {
        self.bounding_box.contains_half_open(point.x, point.y)
    }

    /// The quadrant of this node that `point` routes to.
    pub fn quadrant<E>(&self, point: &Point<E>) -> Quadrant {
        self.quadrant_at(point.x, point.y)
    }

    #[inline]
    fn quadrant_at(&self, x: f64, y: f64) -> Quadrant {
        let left = x <= self.center.x;
        let upper = y >= self.center.y;
        match (left, upper) {
            (true, true) => Quadrant::UpperLeft,
            (false, true) => Quadrant::UpperRight,
            (true, false) => Quadrant::LowerLeft,
            (false, false) => Quadrant::LowerRight,
        }
    }

    /// Whether `point` routes to the upper-left quadrant.
    pub fn is_ul<E>(&self, point: &Point<E>) -> bool {
        self.quadrant(point) == Quadrant::UpperLeft
    }

    /// Whether `point` routes to the upper-right quadrant.
    pub fn is_ur<E>(&self, point: &Point<E>) -> bool {
        self.quadrant(point) == Quadrant::UpperRight
    }

    /// Whether `point` routes to the lower-left quadrant.
    pub fn is_ll<E>(&self, point: &Point<E>) -> bool {
        self.quadrant(point) == Quadrant::LowerLeft
    }

    /// Whether `point` routes to the lower-right quadrant.
    pub fn is_lr<E>(&self, point: &Point<E>) -> bool {
        self.quadrant(point) == Quadrant::LowerRight
    }

    /// Insert a point into this subtree.
    ///
    /// Fails with [`Error::OutOfBounds`] when the point is outside this node's placement
    /// box; nothing is modified in that case. Subdivides a full leaf before placing the
    /// point.
    pub fn insert(&mut self, point: Point<D>) -> Result<(), Error> {
        if !self.contains_point(&point) {
            tracing::debug!(
                x = point.x,
                y = point.y,
                depth = self.depth,
                "rejected point outside node bounds"
            );
            return Err(Error::OutOfBounds {
                x: point.x,
                y: point.y,
                bounds: self.bounding_box,
            });
        }
        self.insert_routed(point);
        Ok(())
    }

    // Placement was checked at the entry point. Below it the quadrant predicates are
    // authoritative: a point on `center.x` goes left even though the left child's
    // half-open box stops just short of it.
    fn insert_routed(&mut self, point: Point<D>) {
        if self.children.is_none() {
            if self.points.len() < self.capacity {
                self.points.push(point);
                return;
            }
            if self.depth >= self.max_depth {
                if self.points.len() == self.capacity {
                    tracing::debug!(
                        x = self.center.x,
                        y = self.center.y,
                        depth = self.depth,
                        capacity = self.capacity,
                        "leaf at depth limit is overflowing"
                    );
                }
                self.points.push(point);
                return;
            }
            self.subdivide();
        }
        let quadrant = self.quadrant_at(point.x, point.y);
        match self.children.as_deref_mut() {
            Some(children) => children[quadrant.index()].insert_routed(point),
            None => self.points.push(point),
        }
    }

    /// Split a leaf into four children and move its points into them.
    ///
    /// Does nothing on an internal node or on a leaf at [`MAX_DEPTH_LIMIT`].
    pub fn subdivide(&mut self) {
        if self.children.is_some() || self.depth >= MAX_DEPTH_LIMIT {
            return;
        }
        let bb = self.bounding_box;
        let Point { x: cx, y: cy, .. } = self.center;
        let mut children = Box::new([
            self.child(Aabb2D::new(bb.min_x, cy, cx, bb.max_y)),
            self.child(Aabb2D::new(cx, cy, bb.max_x, bb.max_y)),
            self.child(Aabb2D::new(bb.min_x, bb.min_y, cx, cy)),
            self.child(Aabb2D::new(cx, bb.min_y, bb.max_x, cy)),
        ]);
        let migrated = core::mem::take(&mut self.points);
        tracing::trace!(
            x = cx,
            y = cy,
            depth = self.depth,
            migrated = migrated.len(),
            "subdividing leaf"
        );
        for point in migrated {
            let quadrant = self.quadrant_at(point.x, point.y);
            children[quadrant.index()].insert_routed(point);
        }
        self.children = Some(children);
    }

    /// Walk down from this node toward `(x, y)`, calling `visit` on every node on the way.
    ///
    /// Returns the leaf reached, or `None` if the point is outside this node.
    fn descend<'a>(&'a self, x: f64, y: f64, mut visit: impl FnMut(&'a Self)) -> Option<&'a Self> {
        if !self.bounding_box.contains_half_open(x, y) {
            return None;
        }
        let mut node = self;
        loop {
            visit(node);
            match node.children.as_deref() {
                Some(children) => node = &children[node.quadrant_at(x, y).index()],
                None => return Some(node),
            }
        }
    }

    /// The leaf that holds (or would hold) `(x, y)`, without recording the path.
    pub(crate) fn locate(&self, x: f64, y: f64) -> Option<&Self> {
        self.descend(x, y, |_| {})
    }

    /// Find the leaf for `point` and the chain of nodes visited to reach it.
    ///
    /// Returns `None` when `point` is outside this node.
    pub fn find_node<E>(&self, point: &Point<E>) -> Option<Descent<'_, D>> {
        let mut path = Vec::new();
        let node = self.descend(point.x, point.y, |n| path.push(n))?;
        Some(Descent { node, path })
    }

    /// Find a stored point with the same coordinates as `point`.
    ///
    /// When several stored points share the coordinates, the first one placed in the leaf wins.
    pub fn find<E>(&self, point: &Point<E>) -> Option<&Point<D>> {
        self.locate(point.x, point.y)?
            .points
            .iter()
            .find(|p| p.same_position(point))
    }

    /// Whether a point with these coordinates is stored.
    pub fn contains<E>(&self, point: &Point<E>) -> bool {
        self.find(point).is_some()
    }

    /// Every stored point inside `bb`, edges included.
    ///
    /// Results come in traversal order (upper-left, upper-right, local points,
    /// lower-left, lower-right), not in spatial order. Subtrees whose box misses `bb`
    /// are skipped.
    pub fn within_bb(&self, bb: &Aabb2D) -> Vec<&Point<D>> {
        let mut out = Vec::new();
        self.collect_within(bb, &mut out);
        out
    }

    fn collect_within<'a>(&'a self, bb: &Aabb2D, out: &mut Vec<&'a Point<D>>) {
        if !self.bounding_box.intersects(bb) {
            return;
        }
        let children = self.children.as_deref();
        if let Some([ul, ur, _, _]) = children {
            ul.collect_within(bb, out);
            ur.collect_within(bb, out);
        }
        out.extend(self.points.iter().filter(|p| bb.contains(p.x, p.y)));
        if let Some([_, _, ll, lr]) = children {
            ll.collect_within(bb, out);
            lr.collect_within(bb, out);
        }
    }

    /// Every point stored in this subtree, in quadrant order then placement order.
    pub fn all_points(&self) -> Vec<&Point<D>> {
        let mut out = Vec::new();
        self.collect_all(&mut out);
        out
    }

    fn collect_all<'a>(&'a self, out: &mut Vec<&'a Point<D>>) {
        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.collect_all(out);
            }
        }
        out.extend(self.points.iter());
    }

    /// Number of points stored in this subtree.
    pub fn len(&self) -> usize {
        let below: usize = self
            .children
            .as_deref()
            .map(|c| c.iter().map(Self::len).sum())
            .unwrap_or(0);
        self.points.len() + below
    }

    /// Whether this subtree stores no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `count` stored points closest to `point`, nearest first.
    ///
    /// See [`QuadTree::nearest_neighbors`](crate::QuadTree::nearest_neighbors).
    pub fn nearest_neighbors<E>(&self, point: &Point<E>, count: usize) -> Vec<Neighbor<'_, D>> {
        nearest::search(self, Point::new(point.x, point.y), count)
    }

    /// Count nodes, leaves, points, and depth in this subtree.
    pub fn stats(&self) -> NodeStats {
        let mut stats = NodeStats::default();
        self.collect_stats(&mut stats);
        stats
    }

    fn collect_stats(&self, stats: &mut NodeStats) {
        stats.node_count += 1;
        stats.point_count += self.points.len();
        stats.max_depth = stats.max_depth.max(self.depth);
        match self.children.as_deref() {
            Some(children) => {
                for child in children {
                    child.collect_stats(stats);
                }
            }
            None => {
                stats.leaf_count += 1;
                if self.points.len() > self.capacity {
                    stats.overflow_leaves += 1;
                }
            }
        }
    }
}
