// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node capacity configuration.

use crate::error::RTreeError;

/// Default number of children a node may hold before it splits.
pub const DEFAULT_MAX_ENTRIES: usize = 32;

/// Default minimum fill. Kept for API compatibility; nodes are never merged.
pub const DEFAULT_MIN_ENTRIES: usize = 12;

/// Capacity settings for an [`RTree`](crate::RTree).
///
/// With the `serde` feature this can be embedded in an application's own
/// configuration file; missing fields fall back to the defaults.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RTreeConfig {
    /// Maximum number of entries (leaf) or children (branch) per node.
    pub max_entries: usize,
    /// Nominal minimum fill.
    ///
    /// Validated, but otherwise unused: removal never rebalances, so nodes can drop
    /// below this count (down to zero for leaves).
    pub min_entries: usize,
}

impl Default for RTreeConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            min_entries: DEFAULT_MIN_ENTRIES,
        }
    }
}

impl RTreeConfig {
    /// Set the node capacity.
    ///
    /// `min_entries` is clamped to half the new capacity so a default config stays
    /// valid for small capacities.
    #[must_use]
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self.min_entries = self.min_entries.min(max_entries / 2);
        self
    }

    /// Set the nominal minimum fill.
    #[must_use]
    pub fn with_min_entries(mut self, min_entries: usize) -> Self {
        self.min_entries = min_entries;
        self
    }

    /// Check the settings can build a tree.
    ///
    /// # Errors
    ///
    /// - [`RTreeError::CapacityTooSmall`] if `max_entries < 2`.
    /// - [`RTreeError::MinEntriesOutOfRange`] if `min_entries > max_entries / 2`.
    pub fn validate(&self) -> Result<(), RTreeError> {
        if self.max_entries < 2 {
            return Err(RTreeError::CapacityTooSmall(self.max_entries));
        }
        if self.min_entries > self.max_entries / 2 {
            return Err(RTreeError::MinEntriesOutOfRange {
                min: self.min_entries,
                max: self.max_entries,
            });
        }
        Ok(())
    }
}
