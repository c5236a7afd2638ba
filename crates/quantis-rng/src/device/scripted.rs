//! Scripted device, a deterministic collaborator for tests.
//!
//! Serves raw bytes from a queue, can be told to report failure status
//! codes, and records every read so tests can assert on device I/O.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{BoardInfo, DeviceClass, RngDevice, MAX_DEVICE_INDEX};
use crate::error::DriverStatus;

#[derive(Debug, Default)]
struct ScriptState {
    bytes: VecDeque<u8>,
    statuses: VecDeque<i32>,
    reads: Vec<usize>,
}

/// A device whose output is fully scripted.
///
/// Reads consume bytes from the front of the script. When the script runs
/// dry the read reports an I/O failure and leaves the destination untouched.
#[derive(Debug)]
pub struct ScriptedDevice {
    state: Mutex<ScriptState>,
    sticky_status: i32,
    counts: [i32; 2],
    driver_version: f64,
    board: BoardInfo,
}

impl ScriptedDevice {
    /// Create a device that will serve `bytes` in order.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            state: Mutex::new(ScriptState {
                bytes: bytes.into(),
                ..ScriptState::default()
            }),
            sticky_status: 0,
            counts: [1, 1],
            driver_version: 2.0,
            board: BoardInfo {
                version: 1.0,
                serial: "SCRIPTED-0001".to_string(),
                manufacturer: "Scripted".to_string(),
            },
        }
    }

    /// Script a sequence of little-endian `i32` raw values.
    pub fn from_i32s(values: &[i32]) -> Self {
        Self::new(values.iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<_>>())
    }

    /// Script a sequence of little-endian `u64` raw values.
    pub fn from_u64s(values: &[u64]) -> Self {
        Self::new(values.iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<_>>())
    }

    /// Report `status` on every read.
    pub fn with_status(mut self, status: i32) -> Self {
        self.sticky_status = status;
        self
    }

    /// Report `status` on the next read only (queued after earlier failures).
    pub fn fail_next(self, status: i32) -> Self {
        self.lock().statuses.push_back(status);
        self
    }

    /// Override the number of units reported for `class`.
    pub fn with_count(mut self, class: DeviceClass, count: i32) -> Self {
        self.counts[class_slot(class)] = count;
        self
    }

    /// Override the driver version reported for both classes.
    pub fn with_driver_version(mut self, version: f64) -> Self {
        self.driver_version = version;
        self
    }

    /// Number of `read_raw` calls made so far.
    pub fn read_count(&self) -> usize {
        self.lock().reads.len()
    }

    /// Byte counts of every read, in call order.
    pub fn requested_sizes(&self) -> Vec<usize> {
        self.lock().reads.clone()
    }

    /// Bytes left in the script.
    pub fn remaining(&self) -> usize {
        self.lock().bytes.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptState> {
        // A panicking test thread must not poison the script for the others.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn unit_exists(&self, class: DeviceClass, index: u32) -> bool {
        index < MAX_DEVICE_INDEX && i64::from(index) < i64::from(self.counts[class_slot(class)])
    }
}

fn class_slot(class: DeviceClass) -> usize {
    match class {
        DeviceClass::Pci => 0,
        DeviceClass::Usb => 1,
    }
}

impl RngDevice for ScriptedDevice {
    fn count(&self, class: DeviceClass) -> i32 {
        self.counts[class_slot(class)]
    }

    fn driver_version(&self, _class: DeviceClass) -> f64 {
        self.driver_version
    }

    fn board_info(&self, class: DeviceClass, index: u32) -> BoardInfo {
        if !self.unit_exists(class, index) {
            return BoardInfo::unavailable(DriverStatus::NoDevice.code());
        }
        self.board.clone()
    }

    fn read_raw(&self, class: DeviceClass, index: u32, dest: &mut [u8]) -> i32 {
        let mut state = self.lock();
        state.reads.push(dest.len());

        if let Some(status) = state.statuses.pop_front() {
            return status;
        }
        if self.sticky_status != 0 {
            return self.sticky_status;
        }
        if !self.unit_exists(class, index) {
            return DriverStatus::NoDevice.code();
        }
        if state.bytes.len() < dest.len() {
            return DriverStatus::Io.code();
        }
        for slot in dest.iter_mut() {
            // Length checked above.
            *slot = state.bytes.pop_front().unwrap_or_default();
        }
        0
    }
}
