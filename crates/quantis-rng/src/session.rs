//! Device session: one selected unit and its raw read primitive.
//!
//! A session owns the [`DeviceSelector`] for its whole lifetime and wraps
//! the collaborator's raw read. Device-health failures surface as
//! `RngError::DeviceError`; request sizes above the 16 MiB ceiling are
//! rejected before the device is touched.
//!
//! Sessions are synchronous: each read performs one transfer and blocks until
//! the driver returns. A device handle is not reentrant, so concurrent draws
//! against the same selector must be serialised by the caller.

use crate::buffer::RawBuffer;
use crate::device::{BoardInfo, DeviceClass, DeviceSelector, RngDevice};
use crate::error::{RngError, Result};

/// A logical connection to one hardware RNG unit.
#[derive(Debug)]
pub struct DeviceSession<D> {
    device: D,
    selector: DeviceSelector,
}

impl<D: RngDevice> DeviceSession<D> {
    /// Bind `device` to the unit identified by `selector`.
    pub fn new(device: D, selector: DeviceSelector) -> Self {
        Self { device, selector }
    }

    /// The unit this session reads from.
    pub fn selector(&self) -> DeviceSelector {
        self.selector
    }

    /// The underlying collaborator.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Number of units of `class`, exactly as the driver reports it.
    pub fn count(&self, class: DeviceClass) -> i32 {
        self.device.count(class)
    }

    /// Driver version for `class`; negative on error.
    pub fn driver_version(&self, class: DeviceClass) -> f64 {
        self.device.driver_version(class)
    }

    /// Board details for unit `index` of `class`.
    pub fn board_info(&self, class: DeviceClass, index: u32) -> BoardInfo {
        self.device.board_info(class, index)
    }

    /// Read exactly `byte_count` raw bytes from the selected unit.
    ///
    /// # Errors
    ///
    /// Returns `RngError::TooLargeRequest` (without device I/O) when
    /// `byte_count` exceeds the ceiling, or `RngError::DeviceError` when the
    /// driver reports a non-zero status. Never retries.
    pub fn read_raw(&self, byte_count: usize) -> Result<RawBuffer> {
        let mut buffer = RawBuffer::allocate(byte_count)?;
        let status = self.fill_raw(&mut buffer);
        if status != 0 {
            let err = RngError::device(status);
            log::warn!("{}: {err}", self.selector);
            return Err(err);
        }
        Ok(buffer)
    }

    /// Issue one raw read into `buffer` and return the driver status as-is.
    pub fn fill_raw(&self, buffer: &mut RawBuffer) -> i32 {
        log::debug!("{}: reading {} raw bytes", self.selector, buffer.len());
        self.device.read_raw(
            self.selector.class,
            self.selector.index,
            buffer.as_mut_slice(),
        )
    }
}
