//! Deterministic demo data for local bring-up and live tests.

use sqlx::PgPool;

use crate::spots::NewSpot;
use crate::DbError;

/// Upsert a small fixed pool of demo spots around central Seoul.
///
/// Deterministic on purpose — re-running refreshes the same rows instead of
/// growing the table, and tests can assert against known values.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_demo_spots(pool: &PgPool) -> Result<usize, DbError> {
    crate::spots::upsert_spots(pool, &demo_spots()).await
}

fn demo_spot(
    code: &str,
    business_type: &str,
    address: &str,
    region: &str,
    floor: Option<i16>,
    latitude: f64,
    longitude: f64,
    monthly_rent: i64,
    deposit: i64,
    daily_footfall_avg: i64,
) -> NewSpot {
    NewSpot {
        code: code.to_string(),
        business_code: String::new(),
        business_type: business_type.to_string(),
        address: address.to_string(),
        region_code: String::new(),
        region: Some(region.to_string()),
        floor,
        latitude,
        longitude,
        monthly_rent,
        deposit,
        daily_footfall_avg,
    }
}

#[allow(clippy::too_many_lines)]
fn demo_spots() -> Vec<NewSpot> {
    vec![
        demo_spot(
            "DEMO-0001",
            "편의점",
            "서울 중구 세종대로 110",
            "중구",
            Some(1),
            37.5663,
            126.9779,
            2_100_000,
            30_000_000,
            18_400,
        ),
        demo_spot(
            "DEMO-0002",
            "카페",
            "서울 종로구 종로 19",
            "종로구",
            Some(2),
            37.5704,
            126.9821,
            1_565_000,
            26_600_000,
            4_790,
        ),
        demo_spot(
            "DEMO-0003",
            "카페",
            "서울 마포구 양화로 45",
            "마포구",
            Some(1),
            37.5536,
            126.9193,
            1_800_000,
            25_000_000,
            9_200,
        ),
        demo_spot(
            "DEMO-0004",
            "음식점",
            "서울 종로구 인사동길 12",
            "종로구",
            Some(1),
            37.5717,
            126.9857,
            2_400_000,
            40_000_000,
            12_300,
        ),
        demo_spot(
            "DEMO-0005",
            "한식 식당",
            "서울 중구 명동길 26",
            "중구",
            Some(3),
            37.5636,
            126.9850,
            2_000_000,
            35_000_000,
            15_100,
        ),
        demo_spot(
            "DEMO-0006",
            "미용실",
            "서울 강남구 테헤란로 152",
            "강남구",
            Some(4),
            37.5006,
            127.0364,
            2_800_000,
            50_000_000,
            11_700,
        ),
        demo_spot(
            "DEMO-0007",
            "헤어샵",
            "서울 마포구 홍익로 10",
            "마포구",
            Some(2),
            37.5563,
            126.9238,
            1_400_000,
            20_000_000,
            8_600,
        ),
        demo_spot(
            "DEMO-0008",
            "약국",
            "서울 종로구 대학로 101",
            "종로구",
            Some(1),
            37.5822,
            127.0017,
            1_200_000,
            18_000_000,
            6_900,
        ),
        demo_spot(
            "DEMO-0009",
            "편의점",
            "서울 송파구 올림픽로 240",
            "송파구",
            None,
            37.5111,
            127.0980,
            1_900_000,
            28_000_000,
            13_800,
        ),
        demo_spot(
            "DEMO-0010",
            "카페",
            "서울 광진구 능동로 120",
            "광진구",
            Some(1),
            37.5412,
            127.0794,
            1_100_000,
            15_000_000,
            5_400,
        ),
        demo_spot(
            "DEMO-0011",
            "",
            "서울 중구 을지로 30",
            "중구",
            None,
            37.5660,
            126.9827,
            1_000_000,
            12_000_000,
            7_500,
        ),
        demo_spot(
            "DEMO-0012",
            "치킨 음식점",
            "서울 마포구 월드컵로 25",
            "마포구",
            Some(2),
            37.5569,
            126.9106,
            1_300_000,
            17_000_000,
            6_200,
        ),
    ]
}
