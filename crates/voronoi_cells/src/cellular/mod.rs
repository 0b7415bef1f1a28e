//! Cellular noise evaluation.
//!
//! [`CellularNoise`] combines a [`FeatureGenerator`] with a
//! [`crate::locate::Neighborhood`] scan and
//! exposes the public queries:
//! - [`CellularNoise::evaluate`]: nearest feature point to a coordinate.
//! - [`CellularNoise::tesselate`]: a stable shade in `[0, 1]` per cell, read from the
//!   X field at the nearest feature's own coordinates.
//! - [`CellularNoise::tesselate_with_edge`]: like `tesselate`, but `0` inside a band of
//!   width `leeway` around cell boundaries.
//!
//! All queries take `&mut self` because they may populate the feature cache.
use glam::DVec2;
use tracing::debug;

use crate::cell::{CellId, FeatureGenerator};
use crate::error::{Error, Result};
use crate::field::{to_unit, NoiseField, SimplexField};
use crate::locate::{self, NearestFeatures};

pub mod config;

pub use config::CellularConfig;

/// Cells per axis on each side of the origin covered by [`CellularNoise::probe_features`].
pub const PROBE_RADIUS: i64 = 8;

/// Deterministic 2D cellular noise.
#[derive(Debug)]
pub struct CellularNoise<F: NoiseField = SimplexField> {
    config: CellularConfig,
    generator: FeatureGenerator<F>,
}

impl CellularNoise<SimplexField> {
    /// Shorthand for `try_new(CellularConfig::new(seed, cell_size))`.
    pub fn new(seed: u32, cell_size: u32) -> Result<Self> {
        Self::try_new(CellularConfig::new(seed, cell_size))
    }

    /// Creates a generator with OpenSimplex fields seeded `seed` and `seed + 1`.
    pub fn try_new(config: CellularConfig) -> Result<Self> {
        let field_x = SimplexField::new(config.seed);
        let field_y = SimplexField::new(config.seed.wrapping_add(1));
        Self::with_fields(config, field_x, field_y)
    }
}

impl<F: NoiseField> CellularNoise<F> {
    /// Creates a generator from caller-provided noise fields.
    ///
    /// `config.seed` is kept for reference only; placement is fully determined by the
    /// supplied fields.
    pub fn with_fields(config: CellularConfig, field_x: F, field_y: F) -> Result<Self> {
        config.validate()?;
        let generator = FeatureGenerator::with_fields(config.cell_size, field_x, field_y)?;

        debug!(
            seed = config.seed,
            cell_size = config.cell_size,
            neighborhood = ?config.neighborhood,
            "created cellular noise generator"
        );

        Ok(Self { config, generator })
    }

    pub fn config(&self) -> &CellularConfig {
        &self.config
    }

    pub fn seed(&self) -> u32 {
        self.config.seed
    }

    /// Cell size in world units.
    pub fn cell_size(&self) -> f64 {
        self.generator.cell_size()
    }

    /// Underlying feature generator.
    pub fn generator(&self) -> &FeatureGenerator<F> {
        &self.generator
    }

    /// Number of cells whose feature has been computed so far.
    pub fn cache_len(&self) -> usize {
        self.generator.cache().len()
    }

    /// Cached feature of `cell`, without computing it.
    pub fn cached_feature(&self, cell: CellId) -> Option<DVec2> {
        self.generator.cache().get(cell)
    }

    /// Feature point of the cell containing `(x, y)`.
    pub fn feature_of(&mut self, x: f64, y: f64) -> Result<DVec2> {
        self.generator.feature_of(x, y)
    }

    /// Feature points of all cells scanned around `(x, y)`.
    pub fn surrounding_features(&mut self, x: f64, y: f64) -> Result<Vec<DVec2>> {
        let features =
            locate::surrounding_features(&mut self.generator, self.config.neighborhood, x, y)?;
        Ok(features.into_iter().map(|(_, p)| p).collect())
    }

    /// Nearest and second-nearest features to `(x, y)`.
    pub fn nearest_features(&mut self, x: f64, y: f64) -> Result<NearestFeatures> {
        locate::nearest_features(&mut self.generator, self.config.neighborhood, x, y)
    }

    /// Nearest feature point to `(x, y)`.
    pub fn evaluate(&mut self, x: f64, y: f64) -> Result<DVec2> {
        Ok(self.nearest_features(x, y)?.first)
    }

    /// Tesselation value in `[0, 1]` for `(x, y)`.
    pub fn tesselate(&mut self, x: f64, y: f64) -> Result<f64> {
        let feature = self.evaluate(x, y)?;
        Ok(self.shade(feature))
    }

    /// Tesselation value with cell boundaries marked as `0`.
    ///
    /// Returns `0` when the distances to the nearest and second-nearest features differ
    /// by less than `leeway`, otherwise the same value as [`Self::tesselate`]. A negative
    /// leeway behaves as `0`, so no boundary is ever marked. A NaN leeway is rejected.
    pub fn tesselate_with_edge(&mut self, x: f64, y: f64, leeway: f64) -> Result<f64> {
        if leeway.is_nan() {
            return Err(Error::InvalidArgument("leeway must not be NaN".into()));
        }
        let leeway = if leeway < 0.0 {
            debug!(leeway, "negative leeway treated as 0");
            0.0
        } else {
            leeway
        };

        let nearest = self.nearest_features(x, y)?;
        if nearest.edge_gap().abs() < leeway {
            return Ok(0.0);
        }

        Ok(self.shade(nearest.first))
    }

    /// Features of the cells `-8..8` on both axes, X-major.
    ///
    /// Intended for diagnostics such as overlaying feature points on a rendered map.
    pub fn probe_features(&mut self) -> Vec<DVec2> {
        let side = (2 * PROBE_RADIUS) as usize;
        let mut features = Vec::with_capacity(side * side);
        for x in -PROBE_RADIUS..PROBE_RADIUS {
            for y in -PROBE_RADIUS..PROBE_RADIUS {
                features.push(self.generator.feature_for_cell(CellId(x, y)));
            }
        }
        features
    }

    fn shade(&self, feature: DVec2) -> f64 {
        to_unit(self.generator.field_x().noise2(feature.x, feature.y))
    }
}
