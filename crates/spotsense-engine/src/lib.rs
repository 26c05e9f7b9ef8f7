//! Scoring and ranking engine for storefront spot recommendations.
//!
//! Fetches candidate spots through a [`SpotStore`], derives per-candidate
//! features (distance, estimated visitors, normalized economics), scores them
//! with a weighted linear blend plus a floor bonus, aggregates per business
//! type, and converts raw scores to a 0–5 display scale per batch. Each
//! recommendation carries a narrative produced by the [`ExplanationProvider`],
//! which falls back to a deterministic template whenever the generative
//! backend is unavailable.

pub mod enrich;
pub mod error;
pub mod explain;
pub mod geo;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod score;
pub mod store;
pub mod types;
pub mod visit_rate;

pub use enrich::{enrich, enrich_with_rate};
pub use error::{EngineError, ExplainError};
pub use explain::{ExplanationFeatures, ExplanationProvider, OpenAiClient};
pub use geo::{bbox_degrees, haversine_km, BoundingBox, GeoPoint};
pub use matcher::{SubstringMatcher, TypeMatcher};
pub use normalize::{minmax, norm, FivePointScaler};
pub use pipeline::{recommend_spots, recommend_types, DEFAULT_TOP_N, MAX_SPOT_CANDIDATES};
pub use rank::{aggregate_by_type, TypeAggregate};
pub use score::{floor_bonus, score_pool, BatchBounds, Weights};
pub use store::SpotStore;
pub use types::{
    CandidateSpot, EnrichedSpot, ScoredSpot, SpotQuery, SpotRecommendation, TypeQuery,
    TypeRecommendation,
};
pub use visit_rate::{visit_rate_for, DEFAULT_VISIT_RATE};
