// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported at the tree boundary.

use crate::bbox::BoundingBox;

/// Invalid input rejected by [`RTree`](crate::RTree) construction or insertion.
///
/// Removing a value that is not present or querying an empty tree are not errors;
/// those return `false` or invoke no callbacks.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum RTreeError {
    /// A coordinate of the box is NaN or infinite.
    #[error("bounding box has a non-finite coordinate: {0:?}")]
    NonFiniteBox(BoundingBox),
    /// The box has `min > max` on at least one axis.
    #[error("bounding box is inverted: {0:?}")]
    InvertedBox(BoundingBox),
    /// `max_entries` is below 2, so a full node could not be split in two.
    #[error("max_entries must be at least 2, got {0}")]
    CapacityTooSmall(usize),
    /// `min_entries` is larger than half of `max_entries`.
    #[error("min_entries ({min}) must not exceed half of max_entries ({max})")]
    MinEntriesOutOfRange {
        /// Requested minimum fill.
        min: usize,
        /// Requested node capacity.
        max: usize,
    },
}

impl RTreeError {
    /// Whether the error was caused by a malformed bounding box argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::NonFiniteBox(_) | Self::InvertedBox(_))
    }
}
