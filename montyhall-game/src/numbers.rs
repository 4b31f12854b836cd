//! Numeric conversion helpers centralizing lossy count casts.

use num_traits::cast::cast;

/// Convert a trial count to f64, allowing precision loss in a single location.
#[must_use]
pub fn count_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// `part / whole * 100`, or `None` when `whole` is zero.
#[must_use]
pub fn percentage(part: u64, whole: u64) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    Some(count_to_f64(part) / count_to_f64(whole) * 100.0)
}

/// Convert an elapsed duration in whole microseconds to milliseconds.
#[must_use]
pub fn micros_to_millis(micros: u128) -> f64 {
    cast::<u128, f64>(micros).unwrap_or(0.0) / 1_000.0
}
