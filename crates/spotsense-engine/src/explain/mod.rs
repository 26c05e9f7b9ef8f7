//! Narrative explanations for recommendations.
//!
//! The primary path asks a generative backend to write the "why" text; the
//! deterministic template takes over whenever that backend is missing,
//! times out, or fails in any other way. Which path runs is decided per
//! call, never by a global flag, so tests can exercise the fallback by
//! simply constructing [`ExplanationProvider::Deterministic`].

mod fallback;
mod openai;

use serde::Serialize;

pub use openai::OpenAiClient;

use crate::rank::TypeAggregate;
use crate::types::EnrichedSpot;

/// The feature subset a narrative may reference.
///
/// Every field is optional — the provider must tolerate any subset being
/// absent and must never invent values that are not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExplanationFeatures {
    pub business_type: Option<String>,
    pub distance_km: Option<f64>,
    /// Raw pedestrian traffic, not a visitor count.
    pub daily_footfall_avg: Option<i64>,
    pub assumed_visit_rate: Option<f64>,
    pub estimated_visitors: Option<i64>,
    pub monthly_rent: Option<i64>,
    pub deposit: Option<i64>,
    pub floor: Option<i16>,
    pub address: Option<String>,
}

impl ExplanationFeatures {
    /// Features of a type aggregate's representative candidate.
    #[must_use]
    pub fn from_aggregate(aggregate: &TypeAggregate) -> Self {
        let mut features = Self::from_enriched(&aggregate.representative);
        features.business_type = Some(aggregate.business_type.clone());
        features.address = None;
        features
    }

    /// Features of a single enriched candidate.
    #[must_use]
    pub fn from_enriched(enriched: &EnrichedSpot) -> Self {
        Self {
            business_type: Some(enriched.spot.business_type.clone()),
            distance_km: enriched.distance_km,
            daily_footfall_avg: Some(enriched.spot.daily_footfall_avg),
            assumed_visit_rate: Some(enriched.visit_rate),
            estimated_visitors: Some(truncate_visitors(enriched.estimated_visitors)),
            monthly_rent: Some(enriched.spot.monthly_rent),
            deposit: Some(enriched.spot.deposit),
            floor: enriched.spot.floor,
            address: Some(enriched.spot.address.clone()),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn truncate_visitors(estimated: f64) -> i64 {
    estimated.max(0.0) as i64
}

/// Narrative generator, selected by backend availability.
pub enum ExplanationProvider {
    /// Generative backend with per-call fallback on failure.
    OpenAi(OpenAiClient),
    /// Template-only; what you get when no credentials are configured.
    Deterministic,
}

impl ExplanationProvider {
    /// Produce the narrative for one recommendation.
    ///
    /// Infallible by design: a backend failure of any kind — network, quota,
    /// timeout, malformed or empty response — is logged and recovered with
    /// the deterministic template.
    pub async fn explain(&self, features: &ExplanationFeatures) -> String {
        match self {
            Self::OpenAi(client) => match client.explain(features).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(error = %e, "explanation backend failed; using fallback");
                    fallback::fallback_explain(features)
                }
            },
            Self::Deterministic => fallback::fallback_explain(features),
        }
    }
}
