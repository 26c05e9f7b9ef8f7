//! Per-candidate feature derivation.

use crate::geo::{haversine_km, GeoPoint};
use crate::types::{CandidateSpot, EnrichedSpot};
use crate::visit_rate::visit_rate_for;

/// Label applied to candidates whose type field is blank.
pub(crate) const UNCLASSIFIED_LABEL: &str = "미분류";

/// Enrich a candidate pool, resolving the visit rate per candidate from its
/// own type label.
///
/// Blank type labels are normalized to [`UNCLASSIFIED_LABEL`] so they form
/// their own aggregation group instead of vanishing. No candidate is
/// dropped here regardless of missing optional fields.
#[must_use]
pub fn enrich(spots: Vec<CandidateSpot>, reference: Option<GeoPoint>) -> Vec<EnrichedSpot> {
    spots
        .into_iter()
        .map(|spot| {
            let rate = visit_rate_for(&spot.business_type);
            enrich_one(spot, reference, rate)
        })
        .collect()
}

/// Enrich a candidate pool with one shared visit rate.
///
/// Used by spot search, where the rate comes from the queried type rather
/// than each candidate's own label.
#[must_use]
pub fn enrich_with_rate(
    spots: Vec<CandidateSpot>,
    reference: Option<GeoPoint>,
    visit_rate: f64,
) -> Vec<EnrichedSpot> {
    spots
        .into_iter()
        .map(|spot| enrich_one(spot, reference, visit_rate))
        .collect()
}

fn enrich_one(mut spot: CandidateSpot, reference: Option<GeoPoint>, visit_rate: f64) -> EnrichedSpot {
    if spot.business_type.trim().is_empty() {
        spot.business_type = UNCLASSIFIED_LABEL.to_string();
    }

    let distance_km = reference.map(|p| {
        haversine_km(p.latitude, p.longitude, spot.latitude, spot.longitude)
    });

    #[allow(clippy::cast_precision_loss)]
    let footfall = spot.daily_footfall_avg.max(0) as f64;

    EnrichedSpot {
        spot,
        distance_km,
        visit_rate,
        estimated_visitors: footfall * visit_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(business_type: &str, footfall: i64) -> CandidateSpot {
        CandidateSpot {
            id: 1,
            code: "C-1".to_string(),
            business_type: business_type.to_string(),
            address: "서울 마포구".to_string(),
            region: None,
            latitude: 37.55,
            longitude: 126.92,
            monthly_rent: 1_200_000,
            deposit: 10_000_000,
            daily_footfall_avg: footfall,
            floor: Some(1),
        }
    }

    #[test]
    fn enrich_derives_visitors_from_candidate_type() {
        let enriched = enrich(vec![spot("편의점", 1000)], None);
        assert_eq!(enriched.len(), 1);
        assert!((enriched[0].visit_rate - 0.040).abs() < 1e-12);
        assert!((enriched[0].estimated_visitors - 40.0).abs() < 1e-9);
    }

    #[test]
    fn enrich_without_reference_has_no_distance() {
        let enriched = enrich(vec![spot("카페", 500)], None);
        assert!(enriched[0].distance_km.is_none());
    }

    #[test]
    fn enrich_with_reference_computes_distance() {
        let reference = GeoPoint {
            latitude: 37.55,
            longitude: 126.92,
        };
        let enriched = enrich(vec![spot("카페", 500)], Some(reference));
        let d = enriched[0].distance_km.expect("distance present");
        assert!(d.abs() < 1e-9, "same point should be ~0 km, got {d}");
    }

    #[test]
    fn blank_type_label_becomes_unclassified() {
        let enriched = enrich(vec![spot("   ", 100)], None);
        assert_eq!(enriched[0].spot.business_type, UNCLASSIFIED_LABEL);
        // Unclassified falls back to the default conversion rate.
        assert!((enriched[0].visit_rate - 0.025).abs() < 1e-12);
    }

    #[test]
    fn shared_rate_overrides_candidate_labels() {
        let enriched = enrich_with_rate(vec![spot("편의점", 1000)], None, 0.05);
        assert!((enriched[0].estimated_visitors - 50.0).abs() < 1e-9);
    }
}
