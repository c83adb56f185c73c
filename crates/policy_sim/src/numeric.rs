//! Clamped arithmetic shared by every engine model.
//!
//! All scores and percentages produced by the engine pass through these
//! helpers, which is what keeps every output finite and inside [0, 100].
//! Missing or malformed input is represented as a non-finite `f64` and
//! degrades to 0 instead of propagating.

/// Lower bound of every percentage and score.
pub const PERCENT_MIN: f64 = 0.0;
/// Upper bound of every percentage and score.
pub const PERCENT_MAX: f64 = 100.0;

/// Replace a non-finite value (NaN, ±inf) with 0.
#[inline]
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Like [`sanitize`], but also maps negative values to 0.
///
/// Used for concentrations, AQI readings and counts, none of which can be
/// negative.
#[inline]
pub fn non_negative(value: f64) -> f64 {
    let v = sanitize(value);
    if v > 0.0 {
        v
    } else {
        0.0
    }
}

/// Restrict `value` to [0, 100]. Non-finite input yields 0.
#[inline]
pub fn clamp_percent(value: f64) -> f64 {
    sanitize(value).clamp(PERCENT_MIN, PERCENT_MAX)
}

/// Round half up: `2.5 → 3`, `-2.5 → -2`.
///
/// Computed as `floor(x)` plus the exact fractional part, so values just
/// below one half (e.g. `0.49999999999999994`) are not pushed over the tie
/// by the addition. Non-finite input yields 0.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    let v = sanitize(value);
    let floor = v.floor();
    let rounded = if v - floor >= 0.5 { floor + 1.0 } else { floor };
    // Normalize -0.0 so formatting never prints "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round half up to a fixed number of decimal places.
///
/// Finite values too large to scale are returned unrounded; they carry no
/// fractional digits at that magnitude anyway.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let value = sanitize(value);
    let scale = 10f64.powi(decimals.min(i32::MAX as u32) as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    round_half_up(scaled) / scale
}

/// `min(cap_percent, count / total * 100)` rounded to two decimals.
///
/// Returns 0 when `total <= 0`, when `count` is not positive, or when either
/// input is non-finite.
pub fn safe_ratio(count: f64, total: f64, cap_percent: f64) -> f64 {
    if !count.is_finite() || !total.is_finite() || total <= 0.0 || count <= 0.0 {
        return 0.0;
    }
    let raw = count / total * 100.0;
    round_to(raw.min(sanitize(cap_percent)), 2)
}

/// Format `value` with a fixed number of decimals, rounding ties up.
///
/// Non-finite input formats as `"0"`.
pub fn safe_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = round_to(value, decimals as u32);
    format!("{:.*}", decimals, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_percent_bounds() {
        assert_eq!(clamp_percent(150.0), 100.0);
        assert_eq!(clamp_percent(-50.0), 0.0);
        assert_eq!(clamp_percent(50.0), 50.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
        assert_eq!(clamp_percent(f64::INFINITY), 0.0);
        assert_eq!(clamp_percent(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(12.5), 12.5);
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
    }

    #[test]
    fn test_round_half_up_ties() {
        assert_eq!(round_half_up(97.5), 98.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(f64::NAN), 0.0);
    }

    #[test]
    fn test_round_half_up_never_negative_zero() {
        let r = round_half_up(-0.4);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn test_safe_ratio_edge_cases() {
        assert_eq!(safe_ratio(0.0, 24.0, 75.0), 0.0);
        assert_eq!(safe_ratio(100.0, 24.0, 75.0), 75.0);
        assert_eq!(safe_ratio(f64::NAN, 24.0, 75.0), 0.0);
        assert_eq!(safe_ratio(5.0, 0.0, 75.0), 0.0);
        assert_eq!(safe_ratio(5.0, -1.0, 75.0), 0.0);
        assert_eq!(safe_ratio(-5.0, 24.0, 75.0), 0.0);
    }

    #[test]
    fn test_safe_ratio_rounds_to_two_decimals() {
        // 5 / 24 = 20.8333...
        assert!((safe_ratio(5.0, 24.0, 75.0) - 20.83).abs() < 1e-9);
    }

    #[test]
    fn test_safe_fixed() {
        assert_eq!(safe_fixed(45.123, 2), "45.12");
        assert_eq!(safe_fixed(0.0, 2), "0.00");
        assert_eq!(safe_fixed(f64::NAN, 2), "0");
        assert_eq!(safe_fixed(f64::INFINITY, 1), "0");
        assert_eq!(safe_fixed(0.125, 2), "0.13");
        assert_eq!(safe_fixed(-0.0001, 2), "0.00");
    }

    #[test]
    fn test_round_to_keeps_values_too_large_to_scale() {
        assert_eq!(round_to(1e307, 2), 1e307);
        assert_eq!(round_to(123.456, 400), 123.456);
        assert_eq!(round_to(0.0, 400), 0.0);
        assert_eq!(round_to(f64::NAN, 400), 0.0);
    }

    #[test]
    fn test_safe_fixed_large_finite_values() {
        let big = 2f64.powi(1020);
        let formatted = safe_fixed(big, 2);
        assert_eq!(formatted, format!("{big:.2}"));
        assert!(formatted.len() > 300, "got {formatted}");

        assert!(safe_fixed(123.456, 400).starts_with("123.456"));
    }
}
