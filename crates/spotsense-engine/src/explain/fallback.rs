//! Deterministic explanation template.
//!
//! Concatenates the present features in fixed order and appends a fixed
//! closing clause. Produces identical text for identical features, which is
//! what the tests pin down.

use super::ExplanationFeatures;

const NO_FEATURES_PHRASE: &str = "여러 지표가 균형적";
const CLOSING_CLAUSE: &str = " 등을 종합해 상위 후보로 선정했습니다.";

pub(super) fn fallback_explain(features: &ExplanationFeatures) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(distance) = features.distance_km {
        parts.push(format!("요청 지점에서 약 {distance:.2}km"));
    }
    if let Some(footfall) = features.daily_footfall_avg {
        parts.push(format!("유동인구 {}명", group_thousands(footfall)));
    }
    if let Some(rent) = features.monthly_rent {
        parts.push(format!("월세 {}원", group_thousands(rent)));
    }
    if let Some(deposit) = features.deposit {
        parts.push(format!("보증금 {}원", group_thousands(deposit)));
    }
    if let Some(floor @ 1..=3) = features.floor {
        parts.push(format!("{floor}층"));
    }

    let base = if parts.is_empty() {
        NO_FEATURES_PHRASE.to_string()
    } else {
        parts.join(", ")
    };
    base + CLOSING_CLAUSE
}

/// `1234567` → `"1,234,567"`.
pub(super) fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_thousands_formats_expected_groups() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(4790), "4,790");
        assert_eq!(group_thousands(1_565_000), "1,565,000");
        assert_eq!(group_thousands(26_600_000), "26,600,000");
    }

    #[test]
    fn features_render_in_fixed_order() {
        let features = ExplanationFeatures {
            distance_km: Some(0.42),
            daily_footfall_avg: Some(4790),
            monthly_rent: Some(1_565_000),
            deposit: Some(26_600_000),
            floor: Some(1),
            ..ExplanationFeatures::default()
        };
        assert_eq!(
            fallback_explain(&features),
            "요청 지점에서 약 0.42km, 유동인구 4,790명, 월세 1,565,000원, \
             보증금 26,600,000원, 1층 등을 종합해 상위 후보로 선정했습니다."
        );
    }

    #[test]
    fn missing_features_are_skipped() {
        let features = ExplanationFeatures {
            monthly_rent: Some(800_000),
            ..ExplanationFeatures::default()
        };
        assert_eq!(
            fallback_explain(&features),
            "월세 800,000원 등을 종합해 상위 후보로 선정했습니다."
        );
    }

    #[test]
    fn upper_floor_is_not_mentioned() {
        let features = ExplanationFeatures {
            monthly_rent: Some(800_000),
            floor: Some(5),
            ..ExplanationFeatures::default()
        };
        assert!(!fallback_explain(&features).contains("5층"));
    }

    #[test]
    fn no_features_uses_balanced_phrase() {
        assert_eq!(
            fallback_explain(&ExplanationFeatures::default()),
            "여러 지표가 균형적 등을 종합해 상위 후보로 선정했습니다."
        );
    }
}
