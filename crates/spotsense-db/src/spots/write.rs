//! Write operations for the `spots` table.

use sqlx::PgPool;

use super::types::NewSpot;
use crate::DbError;

/// Upsert candidate spots keyed on `code`.
///
/// Returns the number of spots processed (inserted or updated). All upserts
/// run inside a single transaction; if any operation fails the entire batch
/// is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn upsert_spots(pool: &PgPool, spots: &[NewSpot]) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;

    for spot in spots {
        sqlx::query(
            "INSERT INTO spots (code, business_code, business_type, address, region_code, \
                                region, floor, latitude, longitude, monthly_rent, deposit, \
                                daily_footfall_avg) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT (code) DO UPDATE SET \
                 business_code = EXCLUDED.business_code, \
                 business_type = EXCLUDED.business_type, \
                 address = EXCLUDED.address, \
                 region_code = EXCLUDED.region_code, \
                 region = EXCLUDED.region, \
                 floor = EXCLUDED.floor, \
                 latitude = EXCLUDED.latitude, \
                 longitude = EXCLUDED.longitude, \
                 monthly_rent = EXCLUDED.monthly_rent, \
                 deposit = EXCLUDED.deposit, \
                 daily_footfall_avg = EXCLUDED.daily_footfall_avg, \
                 updated_at = NOW()",
        )
        .bind(&spot.code)
        .bind(&spot.business_code)
        .bind(&spot.business_type)
        .bind(&spot.address)
        .bind(&spot.region_code)
        .bind(&spot.region)
        .bind(spot.floor)
        .bind(spot.latitude)
        .bind(spot.longitude)
        .bind(spot.monthly_rent)
        .bind(spot.deposit)
        .bind(spot.daily_footfall_avg)
        .execute(&mut *tx)
        .await?;

        count += 1;
    }

    tx.commit().await?;
    Ok(count)
}
