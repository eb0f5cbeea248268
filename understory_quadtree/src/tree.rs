// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The public tree façade: coordinate normalization over a root [`QuadNode`].

use alloc::vec::Vec;

use crate::error::Error;
use crate::nearest::Neighbor;
use crate::node::{DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH, NodeStats, QuadNode, extent_is_valid};
use crate::types::{Aabb2D, Point, ToPoint};

/// Construction options for a [`QuadTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadTreeOptions {
    /// Points a leaf holds before it subdivides. Zero is treated as one.
    pub capacity: usize,
    /// Depth at which leaves stop subdividing and keep overflow locally.
    ///
    /// Clamped to [`MAX_DEPTH_LIMIT`](crate::MAX_DEPTH_LIMIT).
    pub max_depth: u8,
}

impl Default for QuadTreeOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A point quadtree over a fixed rectangular region.
///
/// Accepts anything implementing [`ToPoint`] wherever a location is expected and
/// attaches an optional payload `D` to each stored point.
///
/// The region is fixed at construction: points outside it are rejected, and the
/// tree never grows or rebalances.
#[derive(Clone)]
pub struct QuadTree<D = ()> {
    root: QuadNode<D>,
    len: usize,
}

impl<D> core::fmt::Debug for QuadTree<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let root = &self.root;
        f.debug_struct("QuadTree")
            .field("center", &root.center())
            .field("width", &root.width())
            .field("height", &root.height())
            .field("capacity", &root.capacity())
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl<D> QuadTree<D> {
    /// Create an empty tree centered on `center` with the default options.
    ///
    /// Fails with [`Error::InvalidExtent`] unless `width` and `height` are finite and
    /// non-negative, and with [`Error::InvalidPoint`] for a malformed center.
    pub fn new(center: impl ToPoint, width: f64, height: f64) -> Result<Self, Error> {
        Self::with_options(center, width, height, QuadTreeOptions::default())
    }

    /// Create an empty tree whose leaves hold up to `capacity` points.
    pub fn with_capacity(
        center: impl ToPoint,
        width: f64,
        height: f64,
        capacity: usize,
    ) -> Result<Self, Error> {
        Self::with_options(
            center,
            width,
            height,
            QuadTreeOptions {
                capacity,
                ..Default::default()
            },
        )
    }

    /// Create an empty tree with explicit options.
    pub fn with_options(
        center: impl ToPoint,
        width: f64,
        height: f64,
        options: QuadTreeOptions,
    ) -> Result<Self, Error> {
        let center = center.to_point()?;
        if !extent_is_valid(width, height) {
            return Err(Error::InvalidExtent { width, height });
        }
        Ok(Self {
            root: QuadNode::with_limits(center, width, height, options.capacity, options.max_depth),
            len: 0,
        })
    }

    /// Normalize a point-like value.
    ///
    /// `None` stands for the origin; coordinate slices must have exactly two entries.
    pub fn convert_to_point(value: impl ToPoint) -> Result<Point, Error> {
        value.to_point()
    }

    /// Insert a point carrying `data`.
    ///
    /// Fails with [`Error::OutOfBounds`] for points outside the tree region and with
    /// [`Error::InvalidPoint`] for malformed coordinates. The tree is unchanged on error.
    pub fn insert(&mut self, at: impl ToPoint, data: D) -> Result<(), Error> {
        let Point { x, y, .. } = at.to_point()?;
        self.insert_point(Point::with_data(x, y, data))
    }

    /// Insert an already-built point.
    pub fn insert_point(&mut self, point: Point<D>) -> Result<(), Error> {
        self.root.insert(point)?;
        self.len += 1;
        Ok(())
    }

    /// Find a stored point at the given location.
    pub fn find(&self, at: impl ToPoint) -> Result<Option<&Point<D>>, Error> {
        Ok(self.root.find(&at.to_point()?))
    }

    /// Whether a point is stored at the given location.
    pub fn contains(&self, at: impl ToPoint) -> Result<bool, Error> {
        Ok(self.root.contains(&at.to_point()?))
    }

    /// Every stored point inside `bb`, edges included, in traversal order.
    pub fn within_bb(&self, bb: &Aabb2D) -> Vec<&Point<D>> {
        self.root.within_bb(bb)
    }

    /// The `count` stored points nearest to `at`, closest first.
    ///
    /// Equal distances keep traversal order (quadrants upper-left, upper-right,
    /// lower-left, lower-right, then insertion order within a leaf), so the result is
    /// a prefix of [`all_points`](Self::all_points) stably sorted by distance.
    ///
    /// Queries outside the tree region return an empty list, as does `count == 0`.
    /// Fewer than `count` points are returned only when the tree holds fewer.
    pub fn nearest_neighbors(
        &self,
        at: impl ToPoint,
        count: usize,
    ) -> Result<Vec<Neighbor<'_, D>>, Error> {
        Ok(self.root.nearest_neighbors(&at.to_point()?, count))
    }

    /// Every stored point in traversal order.
    pub fn all_points(&self) -> Vec<&Point<D>> {
        self.root.all_points()
    }

    /// Iterate over every stored point in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &Point<D>> + '_ {
        self.all_points().into_iter()
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no points are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Structural summary of the whole tree.
    pub fn stats(&self) -> NodeStats {
        self.root.stats()
    }

    /// The root node.
    pub fn root(&self) -> &QuadNode<D> {
        &self.root
    }

    /// Center of the tree region.
    pub fn center(&self) -> Point {
        self.root.center()
    }

    /// Width of the tree region.
    pub fn width(&self) -> f64 {
        self.root.width()
    }

    /// Height of the tree region.
    pub fn height(&self) -> f64 {
        self.root.height()
    }

    /// Leaf capacity.
    pub fn capacity(&self) -> usize {
        self.root.capacity()
    }

    /// The tree region.
    pub fn bounding_box(&self) -> Aabb2D {
        self.root.bounding_box()
    }
}

impl<D: Default> QuadTree<D> {
    /// Insert every location with a default payload, stopping at the first error.
    ///
    /// Points before the failing one stay inserted.
    pub fn extend<I>(&mut self, locations: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: ToPoint,
    {
        for at in locations {
            self.insert(at, D::default())?;
        }
        Ok(())
    }
}

impl<'a, D> IntoIterator for &'a QuadTree<D> {
    type Item = &'a Point<D>;
    type IntoIter = alloc::vec::IntoIter<&'a Point<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.all_points().into_iter()
    }
}
