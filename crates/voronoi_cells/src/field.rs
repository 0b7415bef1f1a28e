//! Gradient-noise fields that drive feature placement and cell shading.
//!
//! A [`NoiseField`] is any deterministic scalar field returning values in `[-1, 1]`.
//! [`SimplexField`] is the default implementation, backed by OpenSimplex noise from
//! the `noise` crate.
use noise::{NoiseFn, OpenSimplex};

/// Deterministic 2D scalar field with output in `[-1, 1]`.
pub trait NoiseField: Send + Sync {
    fn noise2(&self, x: f64, y: f64) -> f64;
}

/// OpenSimplex noise field for a fixed seed.
#[derive(Clone)]
pub struct SimplexField {
    seed: u32,
    simplex: OpenSimplex,
}

impl SimplexField {
    /// Create a new field with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            simplex: OpenSimplex::new(seed),
        }
    }

    /// Seed this field was built with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl std::fmt::Debug for SimplexField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexField")
            .field("seed", &self.seed)
            .finish()
    }
}

impl NoiseField for SimplexField {
    #[inline]
    fn noise2(&self, x: f64, y: f64) -> f64 {
        self.simplex.get([x, y])
    }
}

/// Map a primitive output in `[-1, 1]` into `[0, 1]`.
///
/// Values the primitive reports slightly outside its nominal range are clamped.
#[inline]
pub fn to_unit(value: f64) -> f64 {
    ((value + 1.0) / 2.0).clamp(0.0, 1.0)
}
