#![forbid(unsafe_code)]
//! voronoi_cells: deterministic 2D cellular (Worley/Voronoi) noise.
//!
//! The plane is tiled by square cells. Every cell owns one pseudo-random feature
//! point, placed by two gradient-noise fields and memoized for the generator's
//! lifetime. Queries resolve against the nearest and second-nearest feature.
//!
//! Modules:
//! - cell: cell addressing, the feature cache, and the feature generator
//! - locate: neighborhood scans and nearest/second-nearest search
//! - cellular: configuration and the public evaluator ([`cellular::CellularNoise`])
//! - field: the gradient-noise capability and its OpenSimplex implementation
pub mod cell;
pub mod cellular;
pub mod error;
pub mod field;
pub mod locate;

/// Feature points and query coordinates.
pub type Position = glam::DVec2;

/// Convenient re-exports for common types. Import with `use voronoi_cells::prelude::*;`.
pub mod prelude {
    pub use crate::cell::{CellId, FeatureCache, FeatureGenerator, MAX_COORDINATE};
    pub use crate::cellular::{CellularConfig, CellularNoise};
    pub use crate::error::{Error, Result};
    pub use crate::field::{NoiseField, SimplexField};
    pub use crate::locate::{Candidate, NearestFeatures, Neighborhood};
    pub use crate::Position;
}
