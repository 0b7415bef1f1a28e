//! Feature point generation with memoization.
//!
//! A [`FeatureGenerator`] owns two independent [`NoiseField`]s and a [`FeatureCache`].
//! The feature of a cell is placed at `origin + (nx, ny) * cell_size`, where `nx` and
//! `ny` are the two fields sampled at the cell origin and mapped into `[0, 1)`.
use glam::DVec2;
use tracing::trace;

use crate::cell::{CellId, FeatureCache};
use crate::error::{ensure_coordinates, Error, Result};
use crate::field::{to_unit, NoiseField, SimplexField};

/// Substitute for a zero origin component when sampling the noise fields.
const ZERO_NUDGE: f64 = 0.001;

/// Deterministic generator of one feature point per cell.
///
/// Not synchronized: sharing one generator between threads needs external locking
/// around every call that may populate the cache.
#[derive(Debug)]
pub struct FeatureGenerator<F: NoiseField = SimplexField> {
    cell_size: f64,
    field_x: F,
    field_y: F,
    cache: FeatureCache,
}

impl FeatureGenerator<SimplexField> {
    /// Creates a generator with OpenSimplex fields seeded `seed` and `seed + 1`.
    pub fn try_new(seed: u32, cell_size: u32) -> Result<Self> {
        Self::with_fields(
            cell_size,
            SimplexField::new(seed),
            SimplexField::new(seed.wrapping_add(1)),
        )
    }
}

impl<F: NoiseField> FeatureGenerator<F> {
    /// Creates a generator from two caller-provided fields.
    ///
    /// `field_x` places the feature along X (and shades cells), `field_y` along Y.
    pub fn with_fields(cell_size: u32, field_x: F, field_y: F) -> Result<Self> {
        if cell_size == 0 {
            return Err(Error::InvalidConfig("cell_size must be > 0".into()));
        }

        Ok(Self {
            cell_size: cell_size as f64,
            field_x,
            field_y,
            cache: FeatureCache::new(),
        })
    }

    /// Cell size in world units.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Field used for the X offset and for cell shading.
    pub fn field_x(&self) -> &F {
        &self.field_x
    }

    /// Field used for the Y offset.
    pub fn field_y(&self) -> &F {
        &self.field_y
    }

    /// Read-only view of the feature cache.
    pub fn cache(&self) -> &FeatureCache {
        &self.cache
    }

    /// Cell containing `(x, y)`.
    pub fn cell_of(&self, x: f64, y: f64) -> CellId {
        CellId::containing(x, y, self.cell_size)
    }

    /// Feature point of the cell containing `(x, y)`.
    pub fn feature_of(&mut self, x: f64, y: f64) -> Result<DVec2> {
        ensure_coordinates(x, y)?;
        let cell = self.cell_of(x, y);
        Ok(self.feature_for_cell(cell))
    }

    /// Feature point of `cell`, computed on first access and cached afterwards.
    pub fn feature_for_cell(&mut self, cell: CellId) -> DVec2 {
        if let Some(feature) = self.cache.get(cell) {
            return feature;
        }

        let feature = self.compute_feature(cell);
        trace!(
            cell_x = cell.0,
            cell_y = cell.1,
            x = feature.x,
            y = feature.y,
            "computed feature point"
        );
        self.cache.get_or_insert_with(cell, || feature)
    }

    fn compute_feature(&self, cell: CellId) -> DVec2 {
        let size = self.cell_size;
        let origin = cell.origin(size);

        let offset_x = unit_offset(&self.field_x, origin.x, origin.y);
        let offset_y = unit_offset(&self.field_y, origin.x, origin.y);

        // Keep the point inside [origin, origin + size) even after rounding. Far from
        // the origin the cell can be narrower than one ulp, so never drop below `origin`.
        let max_x = (origin.x + size).next_down().max(origin.x);
        let max_y = (origin.y + size).next_down().max(origin.y);

        DVec2::new(
            (origin.x + offset_x * size).clamp(origin.x, max_x),
            (origin.y + offset_y * size).clamp(origin.y, max_y),
        )
    }
}

/// Samples `field` at a cell origin and maps the result into `[0, 1)`.
///
/// Only one axis is nudged away from zero: if `x` is zero, `y` is left untouched even
/// when it is zero too.
fn unit_offset<F: NoiseField>(field: &F, x: f64, y: f64) -> f64 {
    let (x, y) = if x == 0.0 {
        (ZERO_NUDGE, y)
    } else if y == 0.0 {
        (x, ZERO_NUDGE)
    } else {
        (x, y)
    };

    to_unit(field.noise2(x, y)).min(1.0_f64.next_down())
}
