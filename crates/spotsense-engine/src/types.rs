//! Candidate, intermediate, and result types for one scoring pass.

use serde::Serialize;

use crate::geo::GeoPoint;
use crate::pipeline::DEFAULT_TOP_N;

/// A candidate storefront spot as returned by the store.
///
/// Values are copied out of storage and immutable for the duration of one
/// scoring pass. `floor` is `None` for unknown or below-grade floors, which
/// are excluded from the floor bonus.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSpot {
    pub id: i64,
    /// Storefront registry code.
    pub code: String,
    /// Free-text business-type label from the source data.
    pub business_type: String,
    pub address: String,
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Monthly rent in won.
    pub monthly_rent: i64,
    /// Deposit in won.
    pub deposit: i64,
    /// Average daily pedestrian traffic — footfall, not visitors.
    pub daily_footfall_avg: i64,
    pub floor: Option<i16>,
}

/// A candidate plus derived features, created per scoring pass.
#[derive(Debug, Clone)]
pub struct EnrichedSpot {
    pub spot: CandidateSpot,
    /// Distance from the reference point; `None` when no reference was given.
    pub distance_km: Option<f64>,
    /// Assumed footfall-to-visitor conversion rate, `0 < rate <= 1`.
    pub visit_rate: f64,
    /// `daily_footfall_avg * visit_rate`.
    pub estimated_visitors: f64,
}

/// An enriched candidate with its raw batch score attached.
#[derive(Debug, Clone)]
pub struct ScoredSpot {
    pub enriched: EnrichedSpot,
    /// Unbounded weighted-sum score; comparable within one batch only.
    pub raw_score: f64,
}

/// Parameters for business-type recommendation around a point.
#[derive(Debug, Clone)]
pub struct TypeQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub limit: usize,
}

impl TypeQuery {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km: 3.0,
            limit: DEFAULT_TOP_N,
        }
    }
}

/// Parameters for spot recommendation within a business type.
#[derive(Debug, Clone)]
pub struct SpotQuery {
    pub business_type: String,
    /// Optional reference point; without it the distance component is
    /// excluded from scoring and reporting.
    pub reference: Option<GeoPoint>,
    pub radius_km: f64,
    pub limit: usize,
}

impl SpotQuery {
    #[must_use]
    pub fn new(business_type: impl Into<String>) -> Self {
        Self {
            business_type: business_type.into(),
            reference: None,
            radius_km: 5.0,
            limit: DEFAULT_TOP_N,
        }
    }
}

/// One ranked business type in a type-recommendation response.
#[derive(Debug, Clone, Serialize)]
pub struct TypeRecommendation {
    pub business_type: String,
    /// Batch-scaled display score, `"0.00"`–`"5.00"`.
    pub score: String,
    /// Number of supporting candidates of this type in the pool.
    pub count: usize,
    /// Narrative explanation.
    pub why: String,
}

/// One ranked spot in a spot-recommendation response.
#[derive(Debug, Clone, Serialize)]
pub struct SpotRecommendation {
    pub id: i64,
    pub code: String,
    pub business_type: String,
    pub address: String,
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub monthly_rent: i64,
    pub deposit: i64,
    pub daily_footfall_avg: i64,
    /// The disclosed footfall-to-visitor conversion assumption.
    pub assumed_visit_rate: f64,
    pub estimated_visitors: Option<i64>,
    pub floor: Option<i16>,
    /// `None` when the query carried no reference point.
    pub distance_km: Option<f64>,
    /// Batch-scaled display score, `"0.00"`–`"5.00"`.
    pub score: String,
    pub why: String,
}
