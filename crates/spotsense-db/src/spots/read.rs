//! Read operations for the `spots` table.

use sqlx::PgPool;

use super::types::SpotRow;

const SPOT_COLUMNS: &str = "id, code, business_code, business_type, address, region_code, \
     region, floor, latitude, longitude, monthly_rent, deposit, \
     daily_footfall_avg, created_at, updated_at";

/// Spots inside a rectangular lat/lon window, ordered by `id`.
///
/// The `id` ordering makes downstream stable-sort tie-breaking
/// deterministic across calls.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_spots_by_bbox(
    pool: &PgPool,
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
    limit: i64,
) -> Result<Vec<SpotRow>, sqlx::Error> {
    sqlx::query_as::<_, SpotRow>(&format!(
        "SELECT {SPOT_COLUMNS} \
         FROM spots \
         WHERE latitude  >= $1 AND latitude  <= $2 \
           AND longitude >= $3 AND longitude <= $4 \
         ORDER BY id ASC \
         LIMIT $5",
    ))
    .bind(lat_min)
    .bind(lat_max)
    .bind(lon_min)
    .bind(lon_max)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Spots whose type label contains `query` (case-insensitive), optionally
/// restricted to a window, ordered by `id`.
///
/// `query` is treated as a literal — `ILIKE` metacharacters in it are
/// escaped.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_spots_by_type_substring(
    pool: &PgPool,
    query: &str,
    bbox: Option<(f64, f64, f64, f64)>,
    limit: i64,
) -> Result<Vec<SpotRow>, sqlx::Error> {
    let pattern = format!("%{}%", escape_like(query));

    if let Some((lat_min, lat_max, lon_min, lon_max)) = bbox {
        sqlx::query_as::<_, SpotRow>(&format!(
            "SELECT {SPOT_COLUMNS} \
             FROM spots \
             WHERE business_type ILIKE $1 ESCAPE '\\' \
               AND latitude  >= $2 AND latitude  <= $3 \
               AND longitude >= $4 AND longitude <= $5 \
             ORDER BY id ASC \
             LIMIT $6",
        ))
        .bind(pattern)
        .bind(lat_min)
        .bind(lat_max)
        .bind(lon_min)
        .bind(lon_max)
        .bind(limit)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, SpotRow>(&format!(
            "SELECT {SPOT_COLUMNS} \
             FROM spots \
             WHERE business_type ILIKE $1 ESCAPE '\\' \
             ORDER BY id ASC \
             LIMIT $2",
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}

/// Total number of stored spots.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_spots(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM spots")
        .fetch_one(pool)
        .await
}

fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
