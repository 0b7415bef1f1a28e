//! Configuration for [`crate::cellular::CellularNoise`].
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::locate::Neighborhood;

/// Configuration for building a cellular noise generator.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellularConfig {
    /// Seed of the X field. The Y field uses `seed + 1` (wrapping).
    pub seed: u32,
    /// Edge length of a cell in world units.
    pub cell_size: u32,
    /// Cells scanned around each query.
    pub neighborhood: Neighborhood,
}

impl Default for CellularConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            cell_size: 80,
            neighborhood: Neighborhood::Adaptive,
        }
    }
}

impl CellularConfig {
    /// Creates a new [`CellularConfig`] with the given seed and cell size.
    pub fn new(seed: u32, cell_size: u32) -> Self {
        Self {
            seed,
            cell_size,
            ..Default::default()
        }
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the cell size.
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the neighborhood scan policy.
    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(Error::InvalidConfig("cell_size must be > 0".into()));
        }
        self.neighborhood.validate()
    }
}
