//! Min-max scaling helpers and the per-batch five-point scaler.

/// Minimum and maximum of the present values.
///
/// `None` entries are ignored. An empty input yields `(0.0, 1.0)`; an
/// all-equal input yields `(v, v + 1e-9)` so downstream division by the
/// range never hits zero.
pub fn minmax<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = false;
    for v in values.into_iter().flatten() {
        seen = true;
        min = min.min(v);
        max = max.max(v);
    }
    if !seen {
        return (0.0, 1.0);
    }
    if max == min {
        return (min, max + 1e-9);
    }
    (min, max)
}

/// Linear position of `x` within `[a, b]`.
///
/// Returns `0.0` when the range is degenerate (`b <= a`).
#[must_use]
pub fn norm(x: f64, a: f64, b: f64) -> f64 {
    if b > a {
        (x - a) / (b - a)
    } else {
        0.0
    }
}

/// Rescales one ranking batch's raw scores onto the 0.00–5.00 display range.
///
/// Built fresh from each batch — the min/max captured here must never be
/// shared across calls, or scores stop being comparable (see the per-batch
/// normalization invariant in [`crate::score::BatchBounds`]).
#[derive(Debug, Clone, Copy)]
pub struct FivePointScaler {
    min: f64,
    span: f64,
    empty: bool,
}

impl FivePointScaler {
    /// Capture the min/max of `values` for later scaling.
    #[must_use]
    pub fn from_batch(values: &[f64]) -> Self {
        let Some(first) = values.first().copied() else {
            return Self {
                min: 0.0,
                span: 0.0,
                empty: true,
            };
        };
        let (min, max) = values
            .iter()
            .copied()
            .fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self {
            min,
            span: max - min,
            empty: false,
        }
    }

    /// Scale `x` to a `"x.xx"` string in `[0.00, 5.00]`.
    ///
    /// A collapsed batch range (width <= 1e-12) maps every value to
    /// `"5.00"`; an empty batch maps everything to `"0.00"`.
    #[must_use]
    pub fn scale(&self, x: f64) -> String {
        if self.empty {
            return "0.00".to_string();
        }
        let value = if self.span <= 1e-12 {
            5.0
        } else {
            ((x - self.min) / self.span).clamp(0.0, 1.0) * 5.0
        };
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minmax_empty_returns_unit_range() {
        assert_eq!(minmax(std::iter::empty::<Option<f64>>()), (0.0, 1.0));
    }

    #[test]
    fn minmax_ignores_missing_values() {
        let values = [None, Some(2.0), None, Some(8.0)];
        assert_eq!(minmax(values), (2.0, 8.0));
    }

    #[test]
    fn minmax_all_none_returns_unit_range() {
        assert_eq!(minmax([None::<f64>, None]), (0.0, 1.0));
    }

    #[test]
    fn minmax_single_value_widens_by_epsilon() {
        let (min, max) = minmax([Some(3.0)]);
        assert_eq!(min, 3.0);
        assert_eq!(max - min, 1e-9);
    }

    #[test]
    fn norm_degenerate_range_is_zero() {
        assert_eq!(norm(5.0, 2.0, 2.0), 0.0);
        assert_eq!(norm(5.0, 3.0, 2.0), 0.0);
    }

    #[test]
    fn norm_linear_within_range() {
        assert!((norm(5.0, 0.0, 10.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn scaler_maps_batch_extremes_to_zero_and_five() {
        let scaler = FivePointScaler::from_batch(&[1.0, 2.0, 3.0]);
        assert_eq!(scaler.scale(1.0), "0.00");
        assert_eq!(scaler.scale(3.0), "5.00");
        assert_eq!(scaler.scale(2.0), "2.50");
    }

    #[test]
    fn scaler_is_monotonic_and_bounded() {
        let batch = [0.31, 0.77, 0.42, 0.55, 0.61];
        let scaler = FivePointScaler::from_batch(&batch);
        let mut sorted = batch;
        sorted.sort_by(f64::total_cmp);
        let mut prev = -1.0_f64;
        for raw in sorted {
            let scaled: f64 = scaler.scale(raw).parse().expect("parse scaled");
            assert!((0.0..=5.0).contains(&scaled));
            assert!(scaled >= prev, "scaled scores must not decrease with raw");
            prev = scaled;
        }
    }

    #[test]
    fn scaler_collapsed_batch_maps_to_five() {
        let scaler = FivePointScaler::from_batch(&[0.4, 0.4, 0.4]);
        assert_eq!(scaler.scale(0.4), "5.00");
    }

    #[test]
    fn scaler_empty_batch_maps_to_zero() {
        let scaler = FivePointScaler::from_batch(&[]);
        assert_eq!(scaler.scale(123.0), "0.00");
    }

    #[test]
    fn scaler_clamps_out_of_batch_values() {
        let scaler = FivePointScaler::from_batch(&[1.0, 2.0]);
        assert_eq!(scaler.scale(0.0), "0.00");
        assert_eq!(scaler.scale(9.0), "5.00");
    }
}
