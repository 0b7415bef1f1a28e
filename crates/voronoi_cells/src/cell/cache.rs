//! Memoization store for feature points.
//!
//! [`FeatureCache`] maps a [`CellId`] to the feature point computed for that cell.
//! Entries are pure functions of the generator seed and the cell, so they are kept
//! for the lifetime of the cache: there is no eviction and no removal. Memory grows
//! linearly with the number of distinct cells ever visited.
use std::collections::HashMap;

use glam::DVec2;

use crate::cell::CellId;

/// Append-only cache of feature points keyed by [`CellId`].
#[derive(Debug, Clone, Default)]
pub struct FeatureCache {
    entries: HashMap<CellId, DVec2>,
}

impl FeatureCache {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Gets the cached feature for the given cell, if it was computed before.
    pub fn get(&self, cell: CellId) -> Option<DVec2> {
        self.entries.get(&cell).copied()
    }

    /// Returns the feature for `cell`, computing and storing it on first access.
    ///
    /// `compute` runs at most once per distinct cell. An existing entry is never
    /// replaced.
    pub fn get_or_insert_with(&mut self, cell: CellId, compute: impl FnOnce() -> DVec2) -> DVec2 {
        *self.entries.entry(cell).or_insert_with(compute)
    }

    /// Number of cells with a cached feature.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the cell has a cached feature.
    pub fn contains(&self, cell: CellId) -> bool {
        self.entries.contains_key(&cell)
    }
}
