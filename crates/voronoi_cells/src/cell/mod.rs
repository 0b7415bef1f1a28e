//! Cell addressing for the cellular noise grid.
//!
//! The plane is tiled by axis-aligned squares of a fixed size. A cell is never
//! materialized; it is identified by its [`CellId`], the integer index obtained by
//! floor-dividing a coordinate by the cell size. The cell's origin is `id * cell_size`
//! and it covers `[origin, origin + cell_size)` on both axes.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod cache;
pub mod generator;

pub use cache::FeatureCache;
pub use generator::FeatureGenerator;

/// Largest coordinate magnitude accepted by queries (`2^52`).
///
/// Up to this bound every cell origin scanned around a query, two cells either side
/// included, is an exactly representable integer, so distinct cells keep distinct
/// origins and features. Beyond it cells collapse onto each other and origins grow
/// past what the noise primitive can sample.
pub const MAX_COORDINATE: f64 = 4_503_599_627_370_496.0;

/// Identifier for a cell in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellId(
    /// Cell index along the X axis.
    pub i64,
    /// Cell index along the Y axis.
    pub i64,
);

impl CellId {
    /// Computes the cell containing `(x, y)`.
    ///
    /// Uses floor division, so negative coordinates tile symmetrically across the origin:
    /// `-0.5` belongs to cell `-1`, not cell `0`.
    pub fn containing(x: f64, y: f64, cell_size: f64) -> Self {
        debug_assert!(cell_size > 0.0, "cell_size must be > 0");
        CellId(
            (x / cell_size).floor() as i64,
            (y / cell_size).floor() as i64,
        )
    }

    /// World-space origin (minimum corner) of this cell.
    pub fn origin(self, cell_size: f64) -> DVec2 {
        DVec2::new(self.0 as f64 * cell_size, self.1 as f64 * cell_size)
    }

    /// Returns the cell `dx` columns and `dy` rows away.
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        CellId(self.0.saturating_add(dx), self.1.saturating_add(dy))
    }
}
