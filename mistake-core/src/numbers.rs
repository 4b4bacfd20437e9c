//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

use crate::constants::SCORE_DECIMALS;

/// Round a f64 and clamp it to the u64 range, returning 0 for NaN or negative values.
#[must_use]
pub fn round_f64_to_u64(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u64, f64>(u64::MAX).unwrap_or(f64::MAX);
    let clamped = value.min(max).round();
    cast::<f64, u64>(clamped).unwrap_or(u64::MAX)
}

/// Convert u64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Convert usize to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Round a score to the display precision, mapping non-finite values to 0.
#[must_use]
pub fn round_score(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10_f64.powi(SCORE_DECIMALS);
    (value * factor).round() / factor
}

/// Parse raw user input as a non-negative integer.
///
/// Surrounding whitespace is ignored. Negative numbers clamp to 0 and anything
/// that does not parse falls back to 0. A fractional value keeps its integer
/// part, matching how numeric inputs truncate on entry.
#[must_use]
pub fn coerce_non_negative(raw: &str) -> u64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if let Ok(value) = trimmed.parse::<u64>() {
        return value;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return u64::try_from(value).unwrap_or(0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => {
            cast::<f64, u64>(value.trunc()).unwrap_or(u64::MAX)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_handles_non_finite_and_negative() {
        assert_eq!(round_f64_to_u64(f64::NAN), 0);
        assert_eq!(round_f64_to_u64(-12.0), 0);
        assert_eq!(round_f64_to_u64(1.5), 2);
        assert_eq!(round_f64_to_u64(f64::INFINITY), u64::MAX);
    }

    #[test]
    fn score_rounding_keeps_two_decimals() {
        assert!((round_score(0.710_000_000_1) - 0.71).abs() < f64::EPSILON);
        assert!((round_score(0.65) - 0.65).abs() < f64::EPSILON);
        assert!(round_score(f64::NAN).abs() < f64::EPSILON);
    }

    #[test]
    fn coercion_clamps_and_defaults() {
        assert_eq!(coerce_non_negative("42"), 42);
        assert_eq!(coerce_non_negative("  7 "), 7);
        assert_eq!(coerce_non_negative("-3"), 0);
        assert_eq!(coerce_non_negative("abc"), 0);
        assert_eq!(coerce_non_negative(""), 0);
        assert_eq!(coerce_non_negative("12.9"), 12);
        assert_eq!(coerce_non_negative("NaN"), 0);
    }
}
