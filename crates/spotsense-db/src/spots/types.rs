//! Row types for the `spots` table.

use chrono::{DateTime, Utc};
use spotsense_engine::CandidateSpot;

/// Input record for inserting/upserting a candidate spot.
#[derive(Debug, Clone)]
pub struct NewSpot {
    /// Storefront registry code; upsert key.
    pub code: String,
    pub business_code: String,
    pub business_type: String,
    pub address: String,
    pub region_code: String,
    pub region: Option<String>,
    pub floor: Option<i16>,
    pub latitude: f64,
    pub longitude: f64,
    pub monthly_rent: i64,
    pub deposit: i64,
    pub daily_footfall_avg: i64,
}

/// A row from the `spots` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SpotRow {
    pub id: i64,
    pub code: String,
    pub business_code: String,
    pub business_type: String,
    pub address: String,
    pub region_code: String,
    pub region: Option<String>,
    pub floor: Option<i16>,
    pub latitude: f64,
    pub longitude: f64,
    pub monthly_rent: i64,
    pub deposit: i64,
    pub daily_footfall_avg: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SpotRow> for CandidateSpot {
    fn from(row: SpotRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            business_type: row.business_type,
            address: row.address,
            region: row.region,
            latitude: row.latitude,
            longitude: row.longitude,
            monthly_rent: row.monthly_rent,
            deposit: row.deposit,
            daily_footfall_avg: row.daily_footfall_avg,
            floor: row.floor,
        }
    }
}
