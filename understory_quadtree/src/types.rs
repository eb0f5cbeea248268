// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use crate::error::Error;

/// A 2D point carrying an opaque payload.
///
/// Equality only compares `x` and `y`; the payload is carried along but never
/// inspected by the index.
#[derive(Copy, Clone, Debug, Default)]
pub struct Point<D = ()> {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate. Larger values are "upper".
    pub y: f64,
    /// User payload.
    pub data: D,
}

impl Point {
    /// Create a payload-free point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, data: () }
    }

    /// The origin, used when a point-like value is absent.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);
}

impl<D> Point<D> {
    /// Create a point with a payload.
    pub const fn with_data(x: f64, y: f64, data: D) -> Self {
        Self { x, y, data }
    }

    /// Replace the payload, keeping the coordinates.
    pub fn map_data<E>(self, data: E) -> Point<E> {
        Point {
            x: self.x,
            y: self.y,
            data,
        }
    }

    /// Whether both points sit at exactly the same coordinates.
    #[inline]
    pub fn same_position<E>(&self, other: &Point<E>) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// The coordinates as a Kurbo point.
    #[inline]
    pub fn to_kurbo(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl<D, E> PartialEq<Point<E>> for Point<D> {
    fn eq(&self, other: &Point<E>) -> bool {
        self.same_position(other)
    }
}

// Hashes coordinates only, matching `PartialEq`. Adding `0.0` folds `-0.0` into `0.0`.
impl<D> Hash for Point<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.x + 0.0).to_bits().hash(state);
        (self.y + 0.0).to_bits().hash(state);
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl<D> From<Point<D>> for kurbo::Point {
    fn from(p: Point<D>) -> Self {
        p.to_kurbo()
    }
}

/// Squared Euclidean distance between two points.
///
/// Enough for ordering and avoids a square root.
#[inline]
pub fn euclidean_compare<D, E>(a: &Point<D>, b: &Point<E>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Euclidean distance between two points.
#[inline]
pub fn euclidean_distance<D, E>(a: &Point<D>, b: &Point<E>) -> f64 {
    a.to_kurbo().distance(b.to_kurbo())
}

/// Axis-aligned bounding box in 2D.
///
/// Two containment tests exist and are not interchangeable:
/// [`contains`](Self::contains) is closed on every edge and drives range queries,
/// while [`contains_half_open`](Self::contains_half_open) excludes the max edges and
/// decides which node a point may be placed under.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2D {
    /// Minimum x (left)
    pub min_x: f64,
    /// Minimum y (bottom)
    pub min_y: f64,
    /// Maximum x (right)
    pub max_x: f64,
    /// Maximum y (top)
    pub max_y: f64,
}

impl Aabb2D {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create an AABB centered on `(cx, cy)` with the given extent.
    pub fn from_center_size(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        Self {
            min_x: cx - half_width,
            min_y: cy - half_height,
            max_x: cx + half_width,
            max_y: cy + half_height,
        }
    }

    /// Width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Midpoint of the box.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Whether the point lies inside the box, edges included.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Whether the point lies inside the box, excluding the max edges.
    ///
    /// Sibling boxes sharing an edge never both accept the same point under this test.
    #[inline]
    pub fn contains_half_open(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }

    /// Whether two boxes overlap. Touching edges count as overlap.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Squared distance from a point to the closest point of the box (zero inside).
    #[inline]
    pub fn distance_squared_to(&self, x: f64, y: f64) -> f64 {
        let dx = (self.min_x - x).max(0.0).max(x - self.max_x);
        let dy = (self.min_y - y).max(0.0).max(y - self.max_y);
        dx * dx + dy * dy
    }
}

impl From<kurbo::Rect> for Aabb2D {
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

impl From<Aabb2D> for kurbo::Rect {
    fn from(a: Aabb2D) -> Self {
        Self::new(a.min_x, a.min_y, a.max_x, a.max_y)
    }
}

/// Values that can be normalized into a payload-free [`Point`].
///
/// Accepted shapes are a point (ours or Kurbo's), an `(x, y)` pair, a coordinate
/// array, slice, or vector of length two, and `None`, which stands for the origin.
/// Coordinate sequences of any other length fail with [`Error::InvalidPoint`].
pub trait ToPoint {
    /// Normalize `self` into coordinates.
    fn to_point(&self) -> Result<Point, Error>;
}

impl<D> ToPoint for Point<D> {
    fn to_point(&self) -> Result<Point, Error> {
        Ok(Point::new(self.x, self.y))
    }
}

impl ToPoint for kurbo::Point {
    fn to_point(&self) -> Result<Point, Error> {
        Ok(Point::new(self.x, self.y))
    }
}

impl ToPoint for (f64, f64) {
    fn to_point(&self) -> Result<Point, Error> {
        Ok(Point::new(self.0, self.1))
    }
}

impl ToPoint for [f64; 2] {
    fn to_point(&self) -> Result<Point, Error> {
        Ok(Point::new(self[0], self[1]))
    }
}

impl ToPoint for [f64] {
    fn to_point(&self) -> Result<Point, Error> {
        match *self {
            [x, y] => Ok(Point::new(x, y)),
            _ => Err(Error::InvalidPoint { len: self.len() }),
        }
    }
}

impl ToPoint for Vec<f64> {
    fn to_point(&self) -> Result<Point, Error> {
        self.as_slice().to_point()
    }
}

impl<T: ToPoint> ToPoint for Option<T> {
    fn to_point(&self) -> Result<Point, Error> {
        match self {
            Some(inner) => inner.to_point(),
            None => Ok(Point::ORIGIN),
        }
    }
}

impl<T: ToPoint + ?Sized> ToPoint for &T {
    fn to_point(&self) -> Result<Point, Error> {
        (**self).to_point()
    }
}
