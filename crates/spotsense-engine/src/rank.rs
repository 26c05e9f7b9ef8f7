//! Per-business-type aggregation.

use std::collections::HashMap;

use crate::types::{EnrichedSpot, ScoredSpot};

/// Candidates per type that feed the base score.
pub(crate) const TYPE_TOP_K: usize = 3;

/// Multiplier on `ln(1 + count)` rewarding well-supported types.
pub(crate) const DIVERSITY_BONUS_FACTOR: f64 = 0.02;

/// One business type's aggregate over a scored pool.
#[derive(Debug, Clone)]
pub struct TypeAggregate {
    pub business_type: String,
    /// Candidates of this type in the pool.
    pub count: usize,
    /// Mean raw score of the top-[`TYPE_TOP_K`] candidates.
    pub base_score: f64,
    pub diversity_bonus: f64,
    /// `base_score + diversity_bonus`; ranked and scaled downstream.
    pub agg_raw: f64,
    /// Best-scoring candidate of this type, used for the narrative.
    pub representative: EnrichedSpot,
}

/// Group a scored pool by type label and aggregate each group.
///
/// Groups keep first-seen order from the pool, which makes the downstream
/// stable sort deterministic for equal aggregate scores.
#[must_use]
pub fn aggregate_by_type(scored: &[ScoredSpot]) -> Vec<TypeAggregate> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&ScoredSpot>> = HashMap::new();

    for item in scored {
        let label = item.enriched.spot.business_type.as_str();
        groups
            .entry(label)
            .or_insert_with(|| {
                order.push(label);
                Vec::new()
            })
            .push(item);
    }

    order
        .into_iter()
        .filter_map(|label| {
            let mut group = groups.remove(label)?;
            group.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));

            let top = &group[..group.len().min(TYPE_TOP_K)];
            #[allow(clippy::cast_precision_loss)]
            let base_score =
                top.iter().map(|s| s.raw_score).sum::<f64>() / top.len().max(1) as f64;
            #[allow(clippy::cast_precision_loss)]
            let diversity_bonus = (1.0 + group.len() as f64).ln() * DIVERSITY_BONUS_FACTOR;

            Some(TypeAggregate {
                business_type: label.to_string(),
                count: group.len(),
                base_score,
                diversity_bonus,
                agg_raw: base_score + diversity_bonus,
                representative: group[0].enriched.clone(),
            })
        })
        .collect()
}
