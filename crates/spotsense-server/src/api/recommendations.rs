//! Recommendation endpoints.
//!
//! Query parameters arrive as raw strings and are parsed here so invalid
//! input maps onto the standard error envelope instead of a framework
//! rejection. Everything past validation is the engine's job.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use spotsense_db::PgSpotStore;
use spotsense_engine::{
    GeoPoint, SpotQuery, SpotRecommendation, SubstringMatcher, TypeQuery, TypeRecommendation,
    DEFAULT_TOP_N,
};

use crate::middleware::RequestId;

use super::{map_engine_error, ApiError, ApiResponse, AppState, ResponseMeta};

const DEFAULT_TYPE_RADIUS_KM: f64 = 3.0;
const DEFAULT_SPOT_RADIUS_KM: f64 = 5.0;

#[derive(Debug, Serialize)]
pub(super) struct ResultsData<T: Serialize> {
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TypeRecommendationParams {
    lat: Option<String>,
    lon: Option<String>,
    radius_km: Option<String>,
    limit: Option<String>,
}

pub(super) async fn recommend_types(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<TypeRecommendationParams>,
) -> Result<Json<ApiResponse<ResultsData<TypeRecommendation>>>, ApiError> {
    let lat = parse_required_f64(&req_id.0, params.lat.as_deref(), "lat")?;
    let lon = parse_required_f64(&req_id.0, params.lon.as_deref(), "lon")?;

    let mut query = TypeQuery::new(lat, lon);
    query.radius_km = parse_f64_or(params.radius_km.as_deref(), DEFAULT_TYPE_RADIUS_KM);
    query.limit = parse_usize_or(params.limit.as_deref(), DEFAULT_TOP_N);

    let store = PgSpotStore::new(state.pool.clone());
    let results = spotsense_engine::recommend_types(&store, &state.explainer, &query)
        .await
        .map_err(|e| map_engine_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ResultsData { results },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct SpotRecommendationParams {
    #[serde(rename = "type")]
    type_label: Option<String>,
    /// Accepted alias for `type`.
    business_type: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
    radius_km: Option<String>,
    limit: Option<String>,
}

pub(super) async fn recommend_spots(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SpotRecommendationParams>,
) -> Result<Json<ApiResponse<ResultsData<SpotRecommendation>>>, ApiError> {
    let type_query = params
        .type_label
        .as_deref()
        .or(params.business_type.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                "type (or business_type) query parameter is required",
            )
        })?;

    let reference = parse_reference(&req_id.0, params.lat.as_deref(), params.lon.as_deref())?;

    let mut query = SpotQuery::new(type_query);
    query.reference = reference;
    query.radius_km = parse_f64_or(params.radius_km.as_deref(), DEFAULT_SPOT_RADIUS_KM);
    query.limit = parse_usize_or(params.limit.as_deref(), DEFAULT_TOP_N);

    let store = PgSpotStore::new(state.pool.clone());
    let results =
        spotsense_engine::recommend_spots(&store, &state.explainer, &SubstringMatcher, &query)
            .await
            .map_err(|e| map_engine_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ResultsData { results },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn parse_reference(
    request_id: &str,
    lat: Option<&str>,
    lon: Option<&str>,
) -> Result<Option<GeoPoint>, ApiError> {
    match (lat, lon) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => {
            let latitude = parse_required_f64(request_id, Some(lat), "lat")?;
            let longitude = parse_required_f64(request_id, Some(lon), "lon")?;
            Ok(Some(GeoPoint {
                latitude,
                longitude,
            }))
        }
        _ => Err(ApiError::new(
            request_id,
            "validation_error",
            "lat and lon must be provided together",
        )),
    }
}

fn parse_required_f64(
    request_id: &str,
    raw: Option<&str>,
    name: &str,
) -> Result<f64, ApiError> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| {
            ApiError::new(
                request_id,
                "validation_error",
                format!("{name} must be a number"),
            )
        })
}

/// Optional float parameter; unparsable values fall back to the default
/// rather than erroring, matching the tolerant radius handling.
fn parse_f64_or(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(default)
}

fn parse_usize_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_f64_accepts_numbers_and_rejects_garbage() {
        assert!((parse_required_f64("r", Some("37.56"), "lat").expect("parse") - 37.56).abs() < 1e-12);
        assert!(parse_required_f64("r", Some("abc"), "lat").is_err());
        assert!(parse_required_f64("r", None, "lat").is_err());
    }

    #[test]
    fn optional_parsers_fall_back_to_defaults() {
        assert!((parse_f64_or(Some("2.5"), 3.0) - 2.5).abs() < 1e-12);
        assert!((parse_f64_or(Some("junk"), 3.0) - 3.0).abs() < 1e-12);
        assert!((parse_f64_or(None, 3.0) - 3.0).abs() < 1e-12);
        assert_eq!(parse_usize_or(Some("7"), 3), 7);
        assert_eq!(parse_usize_or(Some("-1"), 3), 3);
    }

    #[test]
    fn reference_requires_both_coordinates() {
        assert!(parse_reference("r", None, None).expect("none is fine").is_none());
        assert!(parse_reference("r", Some("37.5"), Some("127.0"))
            .expect("pair parses")
            .is_some());
        assert!(parse_reference("r", Some("37.5"), None).is_err());
        assert!(parse_reference("r", None, Some("127.0")).is_err());
    }

    #[test]
    fn results_data_serializes_under_results_key() {
        let data = ResultsData::<TypeRecommendation> {
            results: vec![TypeRecommendation {
                business_type: "카페".to_string(),
                score: "4.17".to_string(),
                count: 5,
                why: "narrative".to_string(),
            }],
        };
        let json = serde_json::to_value(&data).expect("serialize");
        assert_eq!(json["results"][0]["business_type"], "카페");
        assert_eq!(json["results"][0]["score"], "4.17");
    }
}
