//! Recommendation pipeline orchestration.
//!
//! Both entry points follow the same shape:
//!
//! 1. Validate and clamp the query.
//! 2. Fetch a candidate pool through the [`SpotStore`].
//! 3. Enrich and score the pool with bounds computed once across it.
//! 4. Rank, scale to the five-point display range, truncate to top-N.
//! 5. Attach a narrative per surviving item.
//!
//! Every pass is stateless: bounds and the scaler live on the stack and die
//! with the call, so concurrent requests need no coordination.

use crate::enrich::{enrich, enrich_with_rate};
use crate::error::EngineError;
use crate::explain::{truncate_visitors, ExplanationFeatures, ExplanationProvider};
use crate::geo::{BoundingBox, GeoPoint};
use crate::matcher::TypeMatcher;
use crate::normalize::FivePointScaler;
use crate::rank::aggregate_by_type;
use crate::score::{score_pool, Weights};
use crate::store::SpotStore;
use crate::types::{SpotQuery, SpotRecommendation, TypeQuery, TypeRecommendation};
use crate::visit_rate::visit_rate_for;

/// Default number of recommendations returned per call.
pub const DEFAULT_TOP_N: usize = 3;

/// Upper bound a caller-supplied limit is clamped to.
pub const MAX_TOP_N: usize = 50;

/// Cap on the candidate pool for spot search, bounding scoring cost.
pub const MAX_SPOT_CANDIDATES: usize = 10_000;

const RADIUS_KM_MIN: f64 = 0.1;
const RADIUS_KM_MAX: f64 = 50.0;

/// Widened radii tried after the requested one, in order. Together with the
/// requested radius this caps retrieval at 5 attempts while guaranteeing a
/// result whenever any data exists within 30 km.
const ESCALATION_RADII_KM: [f64; 4] = [5.0, 10.0, 20.0, 30.0];

/// Recommend business types around a point.
///
/// Retrieval escalates through the radius ladder and stops at the first
/// non-empty pool; an empty result after the full ladder is not an error.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] for non-finite or out-of-range
///   coordinates.
/// - [`EngineError::Store`] if candidate retrieval fails.
pub async fn recommend_types<S: SpotStore>(
    store: &S,
    explainer: &ExplanationProvider,
    query: &TypeQuery,
) -> Result<Vec<TypeRecommendation>, EngineError> {
    validate_coordinates(query.latitude, query.longitude)?;
    let reference = GeoPoint {
        latitude: query.latitude,
        longitude: query.longitude,
    };
    let radius_km = clamp_radius(query.radius_km);
    let limit = clamp_limit(query.limit);

    let mut candidates = Vec::new();
    for radius in escalation_ladder(radius_km) {
        candidates = store
            .fetch_by_bbox(&BoundingBox::around(reference, radius))
            .await?;
        if !candidates.is_empty() {
            tracing::debug!(
                radius_km = radius,
                count = candidates.len(),
                "candidate pool found"
            );
            break;
        }
    }
    if candidates.is_empty() {
        tracing::info!("no candidates within any escalation radius");
        return Ok(Vec::new());
    }

    let scored = score_pool(
        enrich(candidates, Some(reference)),
        &Weights::TYPE_RECOMMENDATION,
    );
    let mut aggregates = aggregate_by_type(&scored);

    let raw_values: Vec<f64> = aggregates.iter().map(|a| a.agg_raw).collect();
    let scaler = FivePointScaler::from_batch(&raw_values);

    // Stable sort: equal aggregate scores keep first-seen group order.
    aggregates.sort_by(|a, b| b.agg_raw.total_cmp(&a.agg_raw));
    aggregates.truncate(limit);

    let mut results = Vec::with_capacity(aggregates.len());
    for aggregate in aggregates {
        let why = explainer
            .explain(&ExplanationFeatures::from_aggregate(&aggregate))
            .await;
        results.push(TypeRecommendation {
            score: scaler.scale(aggregate.agg_raw),
            business_type: aggregate.business_type,
            count: aggregate.count,
            why,
        });
    }
    Ok(results)
}

/// Recommend spots within a business type, optionally near a point.
///
/// No radius escalation here — an empty pool is a valid empty result.
/// Without a reference point the distance component is excluded from
/// scoring and `distance_km` is reported as `None`.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] for a blank type query or an invalid
///   reference point.
/// - [`EngineError::Store`] if candidate retrieval fails.
pub async fn recommend_spots<S: SpotStore, M: TypeMatcher>(
    store: &S,
    explainer: &ExplanationProvider,
    matcher: &M,
    query: &SpotQuery,
) -> Result<Vec<SpotRecommendation>, EngineError> {
    let type_query = query.business_type.trim();
    if type_query.is_empty() {
        return Err(EngineError::InvalidInput(
            "business type query must not be blank".to_string(),
        ));
    }
    if let Some(reference) = query.reference {
        validate_coordinates(reference.latitude, reference.longitude)?;
    }
    let radius_km = clamp_radius(query.radius_km);
    let limit = clamp_limit(query.limit);

    let bbox = query
        .reference
        .map(|point| BoundingBox::around(point, radius_km));
    let mut candidates = store
        .fetch_by_type_substring(type_query, bbox.as_ref())
        .await?;
    // The store already filters; re-applying the matcher here keeps the
    // matching rule a single swappable policy rather than a storage detail.
    candidates.retain(|c| matcher.matches(type_query, &c.business_type));
    candidates.truncate(MAX_SPOT_CANDIDATES);

    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let rate = visit_rate_for(type_query);
    let weights = if query.reference.is_some() {
        Weights::SPOT_WITH_REFERENCE
    } else {
        Weights::SPOT_WITHOUT_REFERENCE
    };
    let mut scored = score_pool(enrich_with_rate(candidates, query.reference, rate), &weights);

    let raw_values: Vec<f64> = scored.iter().map(|s| s.raw_score).collect();
    let scaler = FivePointScaler::from_batch(&raw_values);

    // Stable sort: equal raw scores keep storage order.
    scored.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));
    scored.truncate(limit);

    let mut results = Vec::with_capacity(scored.len());
    for item in scored {
        let enriched = item.enriched;
        let distance_km = enriched.distance_km.map(round3);

        let mut features = ExplanationFeatures::from_enriched(&enriched);
        features.business_type = Some(type_query.to_string());
        features.distance_km = distance_km;
        let why = explainer.explain(&features).await;

        let estimated_visitors = Some(truncate_visitors(enriched.estimated_visitors));
        let spot = enriched.spot;
        results.push(SpotRecommendation {
            id: spot.id,
            code: spot.code,
            business_type: spot.business_type,
            address: spot.address,
            region: spot.region,
            latitude: spot.latitude,
            longitude: spot.longitude,
            monthly_rent: spot.monthly_rent,
            deposit: spot.deposit,
            daily_footfall_avg: spot.daily_footfall_avg,
            assumed_visit_rate: enriched.visit_rate,
            estimated_visitors,
            floor: spot.floor,
            distance_km,
            score: scaler.scale(item.raw_score),
            why,
        });
    }
    Ok(results)
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), EngineError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(EngineError::InvalidInput(
            "latitude and longitude must be finite numbers".to_string(),
        ));
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(EngineError::InvalidInput(format!(
            "coordinates out of range: ({latitude}, {longitude})"
        )));
    }
    Ok(())
}

fn clamp_radius(radius_km: f64) -> f64 {
    if radius_km.is_finite() {
        radius_km.clamp(RADIUS_KM_MIN, RADIUS_KM_MAX)
    } else {
        RADIUS_KM_MIN
    }
}

fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_TOP_N)
}

fn escalation_ladder(requested_km: f64) -> impl Iterator<Item = f64> {
    std::iter::once(requested_km).chain(ESCALATION_RADII_KM)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_clamped_to_supported_window() {
        assert_eq!(clamp_radius(0.0), 0.1);
        assert_eq!(clamp_radius(3.0), 3.0);
        assert_eq!(clamp_radius(500.0), 50.0);
        assert_eq!(clamp_radius(f64::NAN), 0.1);
    }

    #[test]
    fn limit_is_clamped_to_supported_window() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(3), 3);
        assert_eq!(clamp_limit(1_000), MAX_TOP_N);
    }

    #[test]
    fn escalation_ladder_tries_requested_radius_first_and_caps_attempts() {
        let ladder: Vec<f64> = escalation_ladder(3.0).collect();
        assert_eq!(ladder, vec![3.0, 5.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn coordinates_outside_wgs84_are_rejected() {
        assert!(validate_coordinates(37.5, 127.0).is_ok());
        assert!(validate_coordinates(91.0, 127.0).is_err());
        assert!(validate_coordinates(37.5, 181.0).is_err());
        assert!(validate_coordinates(f64::NAN, 127.0).is_err());
    }

    #[test]
    fn round3_keeps_three_decimals() {
        assert!((round3(1.234_567) - 1.235).abs() < 1e-12);
    }
}
