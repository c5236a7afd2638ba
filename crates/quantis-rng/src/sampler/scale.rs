//! Pure scaling and encoding functions.
//!
//! Nothing here touches a device; every function maps raw values to the
//! requested shape deterministically.

use crate::error::{RngError, Result};

/// `2^64` as a double, the denominator for mapping a raw `u64` into `[0, 1)`.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Reject `min > max` for integer draws.
pub fn validate_int_range(min: i32, max: i32) -> Result<()> {
    if min > max {
        return Err(RngError::InvalidParameters(format!(
            "min ({min}) is greater than max ({max})"
        )));
    }
    Ok(())
}

/// Reject `min > max` and non-finite bounds for double draws.
pub fn validate_double_range(min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(RngError::InvalidParameters(format!(
            "bounds must be finite (min {min}, max {max})"
        )));
    }
    if min > max {
        return Err(RngError::InvalidParameters(format!(
            "min ({min}) is greater than max ({max})"
        )));
    }
    Ok(())
}

/// Scale a raw `i32` into `[min, max]` by double-modulo reduction.
///
/// `range = max - min + 1; ((raw % range) + range) % range + min`, with `%`
/// truncating toward zero. Computed in `i64` so that the full `i32` range
/// does not overflow. Biased for ranges that do not divide `2^32`; the bias
/// is kept so output matches existing deployments.
pub fn scale_int(raw: i32, min: i32, max: i32) -> i32 {
    let range = i64::from(max) - i64::from(min) + 1;
    let raw = i64::from(raw);
    let scaled = ((raw % range) + range) % range + i64::from(min);
    // In [min, max] by construction.
    scaled as i32
}

/// Map a raw `u64` into the unit interval as `raw / 2^64`.
pub fn unit_interval(raw: u64) -> f64 {
    raw as f64 / TWO_POW_64
}

/// Scale a unit-interval value into `[min, max]`.
pub fn scale_unit(unit: f64, min: f64, max: f64) -> f64 {
    unit * (max - min) + min
}

/// Round to two decimal places, halves away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Lowercase hex, two characters per byte, no separators.
pub fn hex_encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
