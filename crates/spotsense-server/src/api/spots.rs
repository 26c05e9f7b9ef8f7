//! Raw candidate listing inside a bounding box.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use spotsense_db::SpotRow;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct BboxParams {
    min_lat: Option<String>,
    max_lat: Option<String>,
    min_lon: Option<String>,
    max_lon: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SpotItem {
    pub id: i64,
    pub code: String,
    pub business_type: String,
    pub address: String,
    pub region: Option<String>,
    pub floor: Option<i16>,
    pub latitude: f64,
    pub longitude: f64,
    pub monthly_rent: i64,
    pub deposit: i64,
    pub daily_footfall_avg: i64,
}

impl From<SpotRow> for SpotItem {
    fn from(row: SpotRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            business_type: row.business_type,
            address: row.address,
            region: row.region,
            floor: row.floor,
            latitude: row.latitude,
            longitude: row.longitude,
            monthly_rent: row.monthly_rent,
            deposit: row.deposit,
            daily_footfall_avg: row.daily_footfall_avg,
        }
    }
}

pub(super) async fn list_by_bbox(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<BboxParams>,
) -> Result<Json<ApiResponse<Vec<SpotItem>>>, ApiError> {
    let min_lat = parse_bound(&req_id.0, params.min_lat.as_deref(), "min_lat")?;
    let max_lat = parse_bound(&req_id.0, params.max_lat.as_deref(), "max_lat")?;
    let min_lon = parse_bound(&req_id.0, params.min_lon.as_deref(), "min_lon")?;
    let max_lon = parse_bound(&req_id.0, params.max_lon.as_deref(), "max_lon")?;
    let limit = normalize_limit(params.limit.as_deref().and_then(|s| s.parse::<i64>().ok()));

    let rows = spotsense_db::list_spots_by_bbox(
        &state.pool,
        min_lat,
        max_lat,
        min_lon,
        max_lon,
        limit,
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &spotsense_db::DbError::from(e)))?;

    let data = rows.into_iter().map(SpotItem::from).collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn parse_bound(request_id: &str, raw: Option<&str>, name: &str) -> Result<f64, ApiError> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| {
            ApiError::new(
                request_id,
                "validation_error",
                format!("{name} must be a number"),
            )
        })
}
