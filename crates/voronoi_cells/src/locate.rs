//! Nearest and second-nearest feature search.
//!
//! Candidate features are gathered from a block of cells around the query (see
//! [`Neighborhood`]), ranked by Euclidean distance, and the two closest are returned
//! as [`NearestFeatures`]. Ranking uses an explicit sort with a coordinate tiebreak,
//! so results never depend on hash iteration order.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cell::{CellId, FeatureGenerator};
use crate::error::{ensure_coordinates, Error, Result};
use crate::field::NoiseField;

/// Which cells around a query are scanned for candidate features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Neighborhood {
    /// Offsets `-1..=1` on each axis, widened to `-2..=1` on an axis whose query
    /// coordinate is `<= cell_size`.
    #[default]
    Adaptive,
    /// Fixed block of `(2 * radius + 1)^2` cells centred on the query cell.
    Square {
        /// Number of cells scanned on each side of the query cell. Must be >= 1.
        radius: u32,
    },
}

impl Neighborhood {
    /// Validates the scan policy, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        match self {
            Neighborhood::Adaptive => Ok(()),
            Neighborhood::Square { radius: 0 } => Err(Error::InvalidConfig(
                "square neighborhood radius must be >= 1".into(),
            )),
            Neighborhood::Square { .. } => Ok(()),
        }
    }

    /// Inclusive cell offset ranges `(x_lo, x_hi, y_lo, y_hi)` scanned for `(x, y)`.
    pub fn offsets(&self, x: f64, y: f64, cell_size: f64) -> (i64, i64, i64, i64) {
        match *self {
            Neighborhood::Adaptive => {
                let lo_x = if x <= cell_size { -2 } else { -1 };
                let lo_y = if y <= cell_size { -2 } else { -1 };
                (lo_x, 1, lo_y, 1)
            }
            Neighborhood::Square { radius } => {
                let r = radius as i64;
                (-r, r, -r, r)
            }
        }
    }
}

/// A feature point considered for a query, with its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Cell owning the feature.
    pub cell: CellId,
    /// Feature point position.
    pub position: DVec2,
    /// Euclidean distance from the query.
    pub distance: f64,
}

/// The two closest features to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestFeatures {
    /// Closest feature.
    pub first: DVec2,
    /// Second closest feature.
    pub second: DVec2,
    /// Distance from the query to `first`.
    pub first_distance: f64,
    /// Distance from the query to `second`. Never smaller than `first_distance`.
    pub second_distance: f64,
}

impl NearestFeatures {
    /// Difference between the second and first distance; zero on a cell boundary.
    pub fn edge_gap(&self) -> f64 {
        self.second_distance - self.first_distance
    }
}

/// Collects the feature points of every cell scanned for `(x, y)`.
///
/// Each scanned cell contributes exactly one entry. Cells are distinct because query
/// coordinates are bounded by [`crate::cell::MAX_COORDINATE`], so offsets never saturate.
/// Entries are ordered by X offset, then Y offset.
pub fn surrounding_features<F: NoiseField>(
    generator: &mut FeatureGenerator<F>,
    neighborhood: Neighborhood,
    x: f64,
    y: f64,
) -> Result<Vec<(CellId, DVec2)>> {
    ensure_coordinates(x, y)?;

    let home = generator.cell_of(x, y);
    let (lo_x, hi_x, lo_y, hi_y) = neighborhood.offsets(x, y, generator.cell_size());

    let mut features =
        Vec::with_capacity(((hi_x - lo_x + 1) * (hi_y - lo_y + 1)).max(0) as usize);
    for dx in lo_x..=hi_x {
        for dy in lo_y..=hi_y {
            let cell = home.offset(dx, dy);
            features.push((cell, generator.feature_for_cell(cell)));
        }
    }

    Ok(features)
}

/// Ranks the surrounding features of `(x, y)` by distance.
///
/// Ties are broken by feature X, then Y, so the order is reproducible.
pub fn ranked_candidates<F: NoiseField>(
    generator: &mut FeatureGenerator<F>,
    neighborhood: Neighborhood,
    x: f64,
    y: f64,
) -> Result<Vec<Candidate>> {
    let query = DVec2::new(x, y);
    let mut candidates: Vec<Candidate> = surrounding_features(generator, neighborhood, x, y)?
        .into_iter()
        .map(|(cell, position)| Candidate {
            cell,
            position,
            distance: position.distance(query),
        })
        .collect();

    candidates.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.position.x.total_cmp(&b.position.x))
            .then_with(|| a.position.y.total_cmp(&b.position.y))
    });

    Ok(candidates)
}

/// Finds the nearest and second-nearest features to `(x, y)`.
pub fn nearest_features<F: NoiseField>(
    generator: &mut FeatureGenerator<F>,
    neighborhood: Neighborhood,
    x: f64,
    y: f64,
) -> Result<NearestFeatures> {
    let candidates = ranked_candidates(generator, neighborhood, x, y)?;

    match candidates.as_slice() {
        [first, second, ..] => Ok(NearestFeatures {
            first: first.position,
            second: second.position,
            first_distance: first.distance,
            second_distance: second.distance,
        }),
        _ => {
            warn!(
                "Only {} candidate feature(s) around ({}, {}).",
                candidates.len(),
                x,
                y
            );
            Err(Error::Other(format!(
                "expected at least two candidate features around ({x}, {y}), found {}",
                candidates.len()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    use super::*;

    struct CenterField;

    impl NoiseField for CenterField {
        fn noise2(&self, _x: f64, _y: f64) -> f64 {
            0.0
        }
    }

    fn centered(cell_size: u32) -> FeatureGenerator<CenterField> {
        FeatureGenerator::with_fields(cell_size, CenterField, CenterField).unwrap()
    }

    fn coord(rng: &mut StdRng, span: f64) -> f64 {
        let unit = (rng.next_u32() as f64) / ((u32::MAX as f64) + 1.0);
        (unit * 2.0 - 1.0) * span
    }

    #[test]
    fn adaptive_offsets_widen_near_origin() {
        let n = Neighborhood::Adaptive;
        assert_eq!(n.offsets(10.0, 10.0, 80.0), (-2, 1, -2, 1));
        assert_eq!(n.offsets(80.0, 81.0, 80.0), (-2, 1, -1, 1));
        assert_eq!(n.offsets(500.0, -500.0, 80.0), (-1, 1, -2, 1));
        assert_eq!(n.offsets(500.0, 500.0, 80.0), (-1, 1, -1, 1));
    }

    #[test]
    fn square_offsets_are_symmetric() {
        let n = Neighborhood::Square { radius: 2 };
        assert_eq!(n.offsets(10.0, 1000.0, 80.0), (-2, 2, -2, 2));
    }

    #[test]
    fn square_radius_zero_is_rejected() {
        assert!(Neighborhood::Square { radius: 0 }.validate().is_err());
        assert!(Neighborhood::Square { radius: 1 }.validate().is_ok());
        assert!(Neighborhood::Adaptive.validate().is_ok());
    }

    #[test]
    fn surrounding_features_cover_scanned_cells() {
        let mut generator = centered(80);

        let far = surrounding_features(&mut generator, Neighborhood::Adaptive, 500.0, 500.0)
            .unwrap();
        assert_eq!(far.len(), 9);
        assert_eq!(far[0].0, CellId(5, 5));
        assert_eq!(far[8].0, CellId(7, 7));

        let near = surrounding_features(&mut generator, Neighborhood::Adaptive, 10.0, 10.0)
            .unwrap();
        assert_eq!(near.len(), 16);
        assert_eq!(near[0], (CellId(-2, -2), DVec2::new(-120.0, -120.0)));

        let square = surrounding_features(
            &mut generator,
            Neighborhood::Square { radius: 2 },
            500.0,
            500.0,
        )
        .unwrap();
        assert_eq!(square.len(), 25);
    }

    #[test]
    fn surrounding_features_are_distinct() {
        let mut generator = FeatureGenerator::try_new(4, 64).unwrap();
        let features =
            surrounding_features(&mut generator, Neighborhood::Adaptive, -33.0, 12.0).unwrap();
        for (i, a) in features.iter().enumerate() {
            for b in &features[i + 1..] {
                assert_ne!(a.0, b.0);
                assert_ne!(a.1, b.1);
            }
        }
    }

    #[test]
    fn cells_stay_distinct_at_coordinate_bound() {
        let mut generator = FeatureGenerator::try_new(4, 1).unwrap();
        let bound = crate::cell::MAX_COORDINATE;
        let features =
            surrounding_features(&mut generator, Neighborhood::Square { radius: 2 }, bound, -bound)
                .unwrap();
        assert_eq!(features.len(), 25);
        for (i, a) in features.iter().enumerate() {
            for b in &features[i + 1..] {
                assert_ne!(a.0, b.0);
            }
        }

        let n = nearest_features(&mut generator, Neighborhood::Adaptive, bound, bound).unwrap();
        assert_ne!(n.first, n.second);
    }

    #[test]
    fn nearest_on_regular_grid() {
        let mut generator = centered(80);
        let nearest =
            nearest_features(&mut generator, Neighborhood::Adaptive, 50.0, 40.0).unwrap();
        assert_eq!(nearest.first, DVec2::new(40.0, 40.0));
        assert_eq!(nearest.second, DVec2::new(120.0, 40.0));
        assert_eq!(nearest.first_distance, 10.0);
        assert_eq!(nearest.second_distance, 70.0);
        assert_eq!(nearest.edge_gap(), 60.0);
    }

    #[test]
    fn ties_break_by_coordinate() {
        let mut generator = centered(80);
        // Four features sit exactly 80 units away; the lowest X wins, then lowest Y.
        let nearest =
            nearest_features(&mut generator, Neighborhood::Adaptive, 40.0, 40.0).unwrap();
        assert_eq!(nearest.first, DVec2::new(40.0, 40.0));
        assert_eq!(nearest.second, DVec2::new(-40.0, 40.0));

        let ranked =
            ranked_candidates(&mut generator, Neighborhood::Adaptive, 40.0, 40.0).unwrap();
        let ring: Vec<DVec2> = ranked[1..5].iter().map(|c| c.position).collect();
        assert_eq!(
            ring,
            vec![
                DVec2::new(-40.0, 40.0),
                DVec2::new(40.0, -40.0),
                DVec2::new(40.0, 120.0),
                DVec2::new(120.0, 40.0),
            ]
        );
    }

    #[test]
    fn first_is_never_farther_than_second() {
        let mut generator = FeatureGenerator::try_new(11, 80).unwrap();
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..2_000 {
            let x = coord(&mut rng, 1_000.0);
            let y = coord(&mut rng, 1_000.0);
            let n = nearest_features(&mut generator, Neighborhood::Adaptive, x, y).unwrap();
            assert!(n.first_distance <= n.second_distance);
            assert_eq!(n.first_distance, n.first.distance(DVec2::new(x, y)));
            assert_ne!(n.first, n.second);
        }
    }

    #[test]
    fn square_radius_two_finds_true_nearest() {
        let mut generator = FeatureGenerator::try_new(23, 40).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let x = coord(&mut rng, 400.0);
            let y = coord(&mut rng, 400.0);
            let query = DVec2::new(x, y);

            let home = generator.cell_of(x, y);
            let mut brute = f64::INFINITY;
            for dx in -3..=3 {
                for dy in -3..=3 {
                    let p = generator.feature_for_cell(home.offset(dx, dy));
                    brute = brute.min(p.distance(query));
                }
            }

            let n = nearest_features(&mut generator, Neighborhood::Square { radius: 2 }, x, y)
                .unwrap();
            assert_eq!(n.first_distance, brute);
        }
    }

    #[test]
    fn rejects_non_finite_queries() {
        let mut generator = centered(80);
        assert!(matches!(
            nearest_features(&mut generator, Neighborhood::Adaptive, f64::NAN, 1.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(generator.cache().is_empty());
    }
}
