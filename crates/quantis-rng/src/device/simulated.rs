//! Simulated device — a hardware-free stand-in for both device classes.
//!
//! Reports a single board per class and fills reads from a pseudo-random
//! generator. Useful for demos and tests on machines without a Quantis card.
//! The output is NOT hardware entropy.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::{BoardInfo, DeviceClass, RngDevice, MAX_DEVICE_INDEX, NOT_AVAILABLE, NO_SERIAL};
use crate::error::DriverStatus;

/// Driver version reported by the simulated driver.
pub const SIMULATED_DRIVER_VERSION: f64 = 0.1;

/// Hardware-free device backed by a seedable PRNG.
pub struct SimulatedDevice {
    rng: Mutex<StdRng>,
    units_per_class: i32,
}

impl SimulatedDevice {
    /// Create a simulated device. With a seed the byte stream is reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            units_per_class: 1,
        }
    }

    /// Report `units` boards per class instead of one.
    pub fn with_units(mut self, units: u32) -> Self {
        self.units_per_class = units.min(MAX_DEVICE_INDEX) as i32;
        self
    }

    fn unit_exists(&self, index: u32) -> bool {
        (index as i64) < i64::from(self.units_per_class)
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for SimulatedDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedDevice")
            .field("rng", &"<Mutex<StdRng>>")
            .field("units_per_class", &self.units_per_class)
            .finish()
    }
}

impl RngDevice for SimulatedDevice {
    fn count(&self, _class: DeviceClass) -> i32 {
        self.units_per_class
    }

    fn driver_version(&self, _class: DeviceClass) -> f64 {
        SIMULATED_DRIVER_VERSION
    }

    fn board_info(&self, _class: DeviceClass, index: u32) -> BoardInfo {
        if !self.unit_exists(index) {
            return BoardInfo::unavailable(DriverStatus::NoDevice.code());
        }
        BoardInfo {
            version: 0.0,
            serial: NO_SERIAL.to_string(),
            manufacturer: NOT_AVAILABLE.to_string(),
        }
    }

    fn read_raw(&self, _class: DeviceClass, index: u32, dest: &mut [u8]) -> i32 {
        if index >= MAX_DEVICE_INDEX {
            return DriverStatus::InvalidDeviceNumber.code();
        }
        if !self.unit_exists(index) {
            return DriverStatus::NoDevice.code();
        }
        match self.rng.lock() {
            Ok(mut rng) => {
                rng.fill_bytes(dest);
                0
            }
            Err(_) => DriverStatus::InvalidStatus.code(),
        }
    }
}
