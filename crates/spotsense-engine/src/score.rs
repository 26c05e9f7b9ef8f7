//! Weighted multi-criteria scoring.
//!
//! Raw score = weighted sum of four normalized components plus a floor
//! bonus. Normalization bounds are computed once per candidate pool, so raw
//! scores are comparable within a batch only — never across calls.

use crate::normalize::{minmax, norm};
use crate::types::{EnrichedSpot, ScoredSpot};

/// Component weights for one scoring mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub visit: f64,
    pub distance: f64,
    pub rent: f64,
    pub deposit: f64,
}

impl Weights {
    /// Type-recommendation mode: proximity matters slightly more than rent.
    pub const TYPE_RECOMMENDATION: Self = Self {
        visit: 0.42,
        distance: 0.25,
        rent: 0.23,
        deposit: 0.10,
    };

    /// Spot-recommendation mode with a reference point.
    pub const SPOT_WITH_REFERENCE: Self = Self {
        visit: 0.42,
        distance: 0.23,
        rent: 0.25,
        deposit: 0.10,
    };

    /// Spot-recommendation mode without a reference point: the distance
    /// component is excluded entirely and its weight is redistributed.
    pub const SPOT_WITHOUT_REFERENCE: Self = Self {
        visit: 0.55,
        distance: 0.0,
        rent: 0.30,
        deposit: 0.15,
    };
}

/// Normalization bounds captured once per candidate pool.
#[derive(Debug, Clone, Copy)]
pub struct BatchBounds {
    pub distance: (f64, f64),
    pub visit: (f64, f64),
    pub rent: (f64, f64),
    pub deposit: (f64, f64),
}

impl BatchBounds {
    #[must_use]
    pub fn from_pool(pool: &[EnrichedSpot]) -> Self {
        Self {
            distance: minmax(pool.iter().map(|e| e.distance_km)),
            visit: minmax(pool.iter().map(|e| Some(e.estimated_visitors))),
            rent: minmax(pool.iter().map(|e| Some(won(e.spot.monthly_rent)))),
            deposit: minmax(pool.iter().map(|e| Some(won(e.spot.deposit)))),
        }
    }
}

/// Bonus for street-level accessibility.
///
/// Floor 1 gets the full bonus, floors 2–3 a reduced one; anything else —
/// upper floors, basements, unknown — gets nothing.
#[must_use]
pub fn floor_bonus(floor: Option<i16>) -> f64 {
    match floor {
        Some(1) => 0.03,
        Some(2 | 3) => 0.015,
        _ => 0.0,
    }
}

/// Raw score of one candidate against its batch bounds.
///
/// Distance, rent, and deposit components are inverted — closer and cheaper
/// is better. A candidate without a distance (no reference point) scores 0
/// on the distance component, which only occurs in modes where the distance
/// weight is 0.
#[must_use]
pub fn raw_score(enriched: &EnrichedSpot, bounds: &BatchBounds, weights: &Weights) -> f64 {
    let visit_n = norm(enriched.estimated_visitors, bounds.visit.0, bounds.visit.1);
    let dist_n = enriched
        .distance_km
        .map_or(0.0, |d| 1.0 - norm(d, bounds.distance.0, bounds.distance.1));
    let rent_n = 1.0 - norm(won(enriched.spot.monthly_rent), bounds.rent.0, bounds.rent.1);
    let dep_n = 1.0 - norm(won(enriched.spot.deposit), bounds.deposit.0, bounds.deposit.1);

    weights.visit * visit_n
        + weights.distance * dist_n
        + weights.rent * rent_n
        + weights.deposit * dep_n
        + floor_bonus(enriched.spot.floor)
}

/// Score a whole pool with bounds computed once across it.
#[must_use]
pub fn score_pool(pool: Vec<EnrichedSpot>, weights: &Weights) -> Vec<ScoredSpot> {
    let bounds = BatchBounds::from_pool(&pool);
    pool.into_iter()
        .map(|enriched| {
            let raw = raw_score(&enriched, &bounds, weights);
            ScoredSpot {
                enriched,
                raw_score: raw,
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn won(amount: i64) -> f64 {
    amount as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CandidateSpot;

    fn enriched(
        id: i64,
        footfall: i64,
        rent: i64,
        deposit: i64,
        floor: Option<i16>,
        distance_km: Option<f64>,
    ) -> EnrichedSpot {
        let rate = 0.04;
        #[allow(clippy::cast_precision_loss)]
        let estimated_visitors = footfall as f64 * rate;
        EnrichedSpot {
            spot: CandidateSpot {
                id,
                code: format!("C-{id}"),
                business_type: "편의점".to_string(),
                address: "서울".to_string(),
                region: None,
                latitude: 37.5,
                longitude: 127.0,
                monthly_rent: rent,
                deposit,
                daily_footfall_avg: footfall,
                floor,
            },
            distance_km,
            visit_rate: rate,
            estimated_visitors,
        }
    }

    #[test]
    fn weights_presets_sum_to_one() {
        for w in [
            Weights::TYPE_RECOMMENDATION,
            Weights::SPOT_WITH_REFERENCE,
            Weights::SPOT_WITHOUT_REFERENCE,
        ] {
            let sum = w.visit + w.distance + w.rent + w.deposit;
            assert!((sum - 1.0).abs() < 1e-12, "weights sum to {sum}");
        }
    }

    #[test]
    fn first_floor_beats_unknown_floor_all_else_equal() {
        let pool = vec![
            enriched(1, 1000, 100, 1000, Some(1), Some(0.5)),
            enriched(2, 1000, 100, 1000, None, Some(0.5)),
        ];
        let scored = score_pool(pool, &Weights::TYPE_RECOMMENDATION);
        assert!(scored[0].raw_score > scored[1].raw_score);
        assert!((scored[0].raw_score - scored[1].raw_score - 0.03).abs() < 1e-12);
    }

    #[test]
    fn second_floor_bonus_is_positive_but_smaller_than_first() {
        assert!(floor_bonus(Some(2)) > 0.0);
        assert!(floor_bonus(Some(3)) > 0.0);
        assert!(floor_bonus(Some(2)) < floor_bonus(Some(1)));
        assert_eq!(floor_bonus(Some(4)), 0.0);
        assert_eq!(floor_bonus(Some(-1)), 0.0);
        assert_eq!(floor_bonus(None), 0.0);
    }

    #[test]
    fn closer_candidate_scores_higher_on_distance() {
        let pool = vec![
            enriched(1, 1000, 100, 1000, None, Some(0.2)),
            enriched(2, 1000, 100, 1000, None, Some(4.0)),
        ];
        let scored = score_pool(pool, &Weights::TYPE_RECOMMENDATION);
        assert!(scored[0].raw_score > scored[1].raw_score);
    }

    #[test]
    fn cheaper_rent_scores_higher() {
        let pool = vec![
            enriched(1, 1000, 800_000, 1000, None, Some(1.0)),
            enriched(2, 1000, 2_400_000, 1000, None, Some(1.0)),
        ];
        let scored = score_pool(pool, &Weights::TYPE_RECOMMENDATION);
        assert!(scored[0].raw_score > scored[1].raw_score);
    }

    #[test]
    fn missing_distance_contributes_zero_without_reference() {
        let pool = vec![
            enriched(1, 1000, 100, 1000, None, None),
            enriched(2, 1000, 100, 1000, None, None),
        ];
        let scored = score_pool(pool, &Weights::SPOT_WITHOUT_REFERENCE);
        assert!((scored[0].raw_score - scored[1].raw_score).abs() < 1e-12);
    }

    #[test]
    fn degenerate_pool_produces_finite_scores() {
        // All candidates identical: every minmax range collapses to the
        // 1e-9 epsilon and nothing divides by zero.
        let pool = vec![
            enriched(1, 500, 100, 1000, Some(1), Some(1.0)),
            enriched(2, 500, 100, 1000, Some(1), Some(1.0)),
        ];
        let scored = score_pool(pool, &Weights::TYPE_RECOMMENDATION);
        for s in &scored {
            assert!(s.raw_score.is_finite());
        }
    }
}
