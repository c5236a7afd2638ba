//! Scaled draws against a device session.
//!
//! Every draw validates its parameters first, then performs at most one raw
//! read of exactly the bytes it needs. Range errors never reach the device:
//! an invalid scaled read can leave the hardware in an error state that
//! persists until power-cycle.

use crate::buffer::{self, RawBuffer, I32_WIDTH, U64_WIDTH};
use crate::device::{DeviceSelector, RngDevice};
use crate::error::{RngError, Result};
use crate::session::DeviceSession;

use super::scale;
use super::types::{HexStringArray, ScaledDouble, ScaledInt, ScaledIntArray};

/// Typed, range-scaled draws from one device unit.
#[derive(Debug)]
pub struct Sampler<D> {
    session: DeviceSession<D>,
    strict_status: bool,
}

impl<D: RngDevice> Sampler<D> {
    pub fn new(session: DeviceSession<D>) -> Self {
        Self {
            session,
            strict_status: false,
        }
    }

    /// Open a sampler on unit `selector` of `device`.
    pub fn open(device: D, selector: DeviceSelector) -> Self {
        Self::new(DeviceSession::new(device, selector))
    }

    /// Make the hex string draw fail on a non-zero read status.
    ///
    /// By default that draw ignores the status and encodes whatever the
    /// buffer holds (zeroes when the device wrote nothing).
    pub fn strict_status(mut self, strict: bool) -> Self {
        self.strict_status = strict;
        self
    }

    pub fn session(&self) -> &DeviceSession<D> {
        &self.session
    }

    /// Draw one integer in `[min, max]`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `min > max` (no device I/O)
    /// - `DeviceError` if the device reports a non-zero status
    /// - `NoResult` if the scaled value fails post-validation
    pub fn draw_scaled_int(&self, min: i32, max: i32) -> Result<ScaledInt> {
        scale::validate_int_range(min, max)?;

        let raw_buf = self.session.read_raw(I32_WIDTH)?;
        let raw = raw_buf
            .read_i32_le(0)
            .ok_or_else(|| RngError::NoResult("short raw read".to_string()))?;
        let value = scale::scale_int(raw, min, max);
        log::trace!("{}: scaled int {value} in [{min}, {max}]", self.session.selector());

        ScaledInt::checked(value, min, max)
    }

    /// Draw one double in `[min, max]`, rounded to two decimals.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `min > max` or a bound is not finite (no device I/O)
    /// - `DeviceError` if the device reports a non-zero status
    /// - `NoResult` if the scaled value fails post-validation
    pub fn draw_scaled_double(&self, min: f64, max: f64) -> Result<ScaledDouble> {
        scale::validate_double_range(min, max)?;

        let raw_buf = self.session.read_raw(U64_WIDTH)?;
        let raw = raw_buf
            .read_u64_le(0)
            .ok_or_else(|| RngError::NoResult("short raw read".to_string()))?;
        let scaled = scale::scale_unit(scale::unit_interval(raw), min, max);

        if !(min..=max).contains(&scaled) {
            return Err(RngError::NoResult(format!(
                "value {scaled} outside [{min}, {max}]"
            )));
        }
        let value = scale::round_to_cents(scaled);
        log::trace!("{}: scaled double {value} in [{min}, {max}]", self.session.selector());

        Ok(ScaledDouble { value, min, max })
    }

    /// Draw `count` integers, each independently scaled into `[min, max]`.
    ///
    /// One raw read of `4 * count` bytes; each little-endian `i32` chunk is
    /// reduced with [`scale::scale_int`].
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `min > max` (no device I/O)
    /// - `TooLargeRequest` if `4 * count` exceeds 16 MiB (no device I/O)
    /// - `NoResult` if `count` is zero
    /// - `DeviceError` if the device reports a non-zero status
    pub fn draw_scaled_int_array(&self, count: usize, min: i32, max: i32) -> Result<ScaledIntArray> {
        scale::validate_int_range(min, max)?;
        let byte_count = buffer::request_size(count, I32_WIDTH)?;
        if count == 0 {
            return Err(RngError::NoResult("requested zero values".to_string()));
        }

        let raw_buf = self.session.read_raw(byte_count)?;
        let values: Vec<i32> = raw_buf
            .i32_values()
            .map(|raw| scale::scale_int(raw, min, max))
            .collect();

        if values.len() != count {
            return Err(RngError::NoResult(format!(
                "decoded {} of {count} values",
                values.len()
            )));
        }
        Ok(ScaledIntArray { values, min, max })
    }

    /// Draw `count` random byte strings of `length` bytes, hex-encoded.
    ///
    /// One raw read of `count * length` bytes into a zeroed buffer, split
    /// into `count` contiguous slices. The read status is ignored unless
    /// [`Sampler::strict_status`] is set; a failed read then yields the
    /// zeroed bytes.
    ///
    /// # Errors
    ///
    /// - `TooLargeRequest` if `count * length` exceeds 16 MiB (no device I/O)
    /// - `DeviceError` on a non-zero status, in strict mode only
    pub fn draw_hex_string_array(&self, count: usize, length: usize) -> Result<HexStringArray> {
        let byte_count = buffer::request_size(count, length)?;

        let mut raw_buf = RawBuffer::allocate(byte_count)?;
        if byte_count > 0 {
            let status = self.session.fill_raw(&mut raw_buf);
            if status != 0 {
                if self.strict_status {
                    return Err(RngError::device(status));
                }
                log::warn!(
                    "{}: ignoring read status {status} for hex string draw",
                    self.session.selector()
                );
            }
        }

        let strings = if length == 0 {
            vec![String::new(); count]
        } else {
            raw_buf.slices(length).map(scale::hex_encode).collect()
        };
        Ok(HexStringArray { strings, length })
    }
}
