//! Result types produced by scaled draws.
//!
//! All values are call-scoped; nothing here is retained after the draw that
//! produced it.

use serde::{Deserialize, Serialize};

use crate::error::{RngError, Result};

/// A single scaled integer with the bounds it was drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledInt {
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

impl ScaledInt {
    /// Build a result, enforcing `min <= value <= max`.
    ///
    /// # Errors
    ///
    /// Returns `RngError::NoResult` when `value` lies outside the bounds.
    pub fn checked(value: i32, min: i32, max: i32) -> Result<Self> {
        if value < min || value > max {
            return Err(RngError::NoResult(format!(
                "value {value} outside [{min}, {max}]"
            )));
        }
        Ok(Self { value, min, max })
    }
}

/// A single scaled double, rounded to two decimals.
///
/// The bounds check runs on the unrounded value. When `min` or `max` is not
/// on the 0.01 grid, the rounded `value` may sit up to 0.005 outside them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledDouble {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Independently scaled integers, all within `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledIntArray {
    pub values: Vec<i32>,
    pub min: i32,
    pub max: i32,
}

impl ScaledIntArray {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Independently drawn byte strings, hex-encoded (lowercase, 2 chars per byte).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexStringArray {
    pub strings: Vec<String>,
    /// Length of each string in bytes (each encoded string has `2 * length` chars).
    pub length: usize,
}

impl HexStringArray {
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
