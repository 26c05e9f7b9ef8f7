//! Postgres-backed implementation of the engine's candidate store.

use spotsense_engine::{BoundingBox, CandidateSpot, EngineError, SpotStore, MAX_SPOT_CANDIDATES};
use sqlx::PgPool;

use crate::spots::{list_spots_by_bbox, list_spots_by_type_substring};

/// [`SpotStore`] over the `spots` table.
///
/// Cheap to clone; holds only the pool handle.
#[derive(Clone)]
pub struct PgSpotStore {
    pool: PgPool,
}

impl PgSpotStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SpotStore for PgSpotStore {
    async fn fetch_by_bbox(&self, bbox: &BoundingBox) -> Result<Vec<CandidateSpot>, EngineError> {
        let limit = i64::try_from(MAX_SPOT_CANDIDATES).unwrap_or(i64::MAX);
        let rows = list_spots_by_bbox(
            &self.pool,
            bbox.lat_min,
            bbox.lat_max,
            bbox.lon_min,
            bbox.lon_max,
            limit,
        )
        .await
        .map_err(EngineError::store)?;
        Ok(rows.into_iter().map(CandidateSpot::from).collect())
    }

    async fn fetch_by_type_substring(
        &self,
        query: &str,
        bbox: Option<&BoundingBox>,
    ) -> Result<Vec<CandidateSpot>, EngineError> {
        let limit = i64::try_from(MAX_SPOT_CANDIDATES).unwrap_or(i64::MAX);
        let window = bbox.map(|b| (b.lat_min, b.lat_max, b.lon_min, b.lon_max));
        let rows = list_spots_by_type_substring(&self.pool, query, window, limit)
            .await
            .map_err(EngineError::store)?;
        Ok(rows.into_iter().map(CandidateSpot::from).collect())
    }
}
