// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the node and tree APIs.

use thiserror::Error;

use crate::types::Aabb2D;

/// Errors reported by quadtree operations.
///
/// Neither kind leaves partial state behind: a failed insertion does not touch the tree.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A point was inserted into a node whose placement box does not contain it.
    #[error("point ({x}, {y}) is not within this node ({bounds:?})")]
    OutOfBounds {
        /// Rejected x coordinate.
        x: f64,
        /// Rejected y coordinate.
        y: f64,
        /// Placement box of the node that rejected the point.
        bounds: Aabb2D,
    },

    /// A tree was given a negative, infinite, or NaN width or height.
    #[error("invalid tree extent {width} x {height}: must be finite and non-negative")]
    InvalidExtent {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// A point-like value did not have exactly two coordinates.
    #[error("unsupported point representation: expected 2 coordinates, got {len}")]
    InvalidPoint {
        /// Number of coordinates supplied.
        len: usize,
    },
}
