//! Candidate retrieval boundary.

use std::future::Future;

use crate::error::EngineError;
use crate::geo::BoundingBox;
use crate::types::CandidateSpot;

/// Source of candidate spots.
///
/// Implementations must return plain owned attribute data — the engine
/// copies nothing back and expects no lazy-loading side effects. Backends
/// map their own failures through [`EngineError::store`].
pub trait SpotStore: Send + Sync {
    /// All spots inside the window.
    fn fetch_by_bbox(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<Vec<CandidateSpot>, EngineError>> + Send;

    /// Spots whose type label contains `query` (case-insensitive),
    /// optionally restricted to a window. Result size is expected to be
    /// capped at the backend (see [`crate::pipeline::MAX_SPOT_CANDIDATES`]).
    fn fetch_by_type_substring(
        &self,
        query: &str,
        bbox: Option<&BoundingBox>,
    ) -> impl Future<Output = Result<Vec<CandidateSpot>, EngineError>> + Send;
}
