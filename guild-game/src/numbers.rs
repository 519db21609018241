//! Numeric conversion helpers keeping lossy casts in one place.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Probability in `[0, 1]` as a whole percentage.
#[must_use]
pub fn percent(probability: f64) -> i32 {
    round_f64_to_i32(probability * 100.0)
}

/// Convert a count to f64, accepting precision loss above 2^53.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// `part / whole`, or 0.0 when `whole` is zero.
#[must_use]
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    usize_to_f64(part) / usize_to_f64(whole)
}

/// Saturating conversion of a count into the signed resource domain.
#[must_use]
pub fn usize_to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f64_to_i32(1.6), 2);
        assert_eq!(round_f64_to_i32(f64::NAN), 0);
        assert_eq!(round_f64_to_i32(f64::from(i32::MAX) * 2.0), i32::MAX);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(0.9), 90);
        assert_eq!(percent(0.555), 56);
        assert_eq!(percent(0.1), 10);
    }

    #[test]
    fn ratio_handles_empty_denominator() {
        assert!((ratio(1, 4) - 0.25).abs() < f64::EPSILON);
        assert!(ratio(3, 0).abs() < f64::EPSILON);
        assert_eq!(usize_to_i32(usize::MAX), i32::MAX);
        assert_eq!(usize_to_i32(7), 7);
    }
}
