/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

/// Highest degree a polynomial may reach.
pub const MAX_DEGREE: usize = 1024;

/// Converts an `f64` to `usize` if the value is finite, non-negative, whole
/// and exactly representable.
///
/// ## Errors
/// Returns `Err(error)` for negative, fractional, non-finite or oversized
/// values.
///
/// ## Example
/// ```
/// use minimatica::util::num::f64_to_usize_checked;
///
/// assert_eq!(f64_to_usize_checked(3.0, "bad"), Ok(3));
/// assert_eq!(f64_to_usize_checked(-1.0, "bad"), Err("bad"));
/// assert_eq!(f64_to_usize_checked(2.5, "bad"), Err("bad"));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_usize_checked<E>(value: f64, error: E) -> Result<usize, E> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_INT || value.fract() != 0.0 {
        return Err(error);
    }
    usize::try_from(value as u64).map_err(|_| error)
}

/// Converts a `usize` to `f64`.
///
/// Indices and counts in this crate stay far below `2^53`, so the conversion
/// is exact in practice.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Rounds `value` to `digits` decimal places.
///
/// ## Example
/// ```
/// use minimatica::util::num::round_to_decimals;
///
/// assert_eq!(round_to_decimals(0.999_999_999_999_9, 10), 1.0);
/// assert_eq!(round_to_decimals(6.123e-17, 10), 0.0);
/// ```
#[must_use]
pub fn round_to_decimals(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    let rounded = (value * scale).round() / scale;
    // Collapse -0.0 so results print and compare as plain zero.
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_values_that_are_not_whole_counts() {
        assert!(f64_to_usize_checked(f64::NAN, ()).is_err());
        assert!(f64_to_usize_checked(f64::INFINITY, ()).is_err());
        assert!(f64_to_usize_checked(1e300, ()).is_err());
        assert!(f64_to_usize_checked(-0.5, ()).is_err());
        assert_eq!(f64_to_usize_checked(0.0, ()), Ok(0));
    }

    #[test]
    fn rounding_removes_floating_noise() {
        assert_eq!(round_to_decimals(-1.2e-16, 10), 0.0);
        assert!(round_to_decimals(-1.2e-16, 10).is_sign_positive());
        assert_eq!(round_to_decimals(0.5, 10), 0.5);
        assert_eq!(round_to_decimals(1.234_567_891_26, 10), 1.234_567_891_3);
    }
}
