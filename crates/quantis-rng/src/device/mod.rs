//! Device collaborator interface and backends.
//!
//! This module provides:
//! - [`DeviceClass`] and [`DeviceSelector`]: which physical unit to talk to
//! - [`RngDevice`]: the raw capability every backend offers
//! - [`SimulatedDevice`]: hardware-free stand-in backed by a seedable PRNG
//! - [`DevNodeDevice`]: PCI units exposed as `/dev/qrandomN` character devices
//! - [`ScriptedDevice`]: deterministic collaborator for tests

pub mod devnode;
pub mod scripted;
pub mod simulated;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{RngError, Result};

pub use devnode::DevNodeDevice;
pub use scripted::ScriptedDevice;
pub use simulated::SimulatedDevice;

/// Highest device index (exclusive) a backend will address.
pub const MAX_DEVICE_INDEX: u32 = 127;

/// Serial number reported when the board cannot be queried.
pub const NO_SERIAL: &str = "S/N not available";

/// Manufacturer reported when the board cannot be queried.
pub const NOT_AVAILABLE: &str = "Not available";

/// Transport a device is attached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Pci,
    Usb,
}

impl DeviceClass {
    /// Both classes, in enumeration order.
    pub const ALL: [DeviceClass; 2] = [DeviceClass::Pci, DeviceClass::Usb];

    /// The driver's numeric code for this class.
    pub fn code(self) -> u32 {
        match self {
            Self::Pci => 1,
            Self::Usb => 2,
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pci => write!(f, "PCI"),
            Self::Usb => write!(f, "USB"),
        }
    }
}

impl TryFrom<u32> for DeviceClass {
    type Error = RngError;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            1 => Ok(Self::Pci),
            2 => Ok(Self::Usb),
            other => Err(RngError::InvalidParameters(format!(
                "unknown device class code {other} (expected 1 = PCI, 2 = USB)"
            ))),
        }
    }
}

impl FromStr for DeviceClass {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pci" | "pcie" | "1" => Ok(Self::Pci),
            "usb" | "2" => Ok(Self::Usb),
            other => Err(RngError::InvalidParameters(format!(
                "unknown device class '{other}' (expected pci or usb)"
            ))),
        }
    }
}

/// Identifies one physical unit: device class plus index within that class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceSelector {
    pub class: DeviceClass,
    pub index: u32,
}

impl DeviceSelector {
    pub fn new(class: DeviceClass, index: u32) -> Self {
        Self { class, index }
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.class, self.index)
    }
}

/// Board details as reported by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardInfo {
    /// Core (board) version; negative on failure.
    pub version: f64,
    pub serial: String,
    pub manufacturer: String,
}

impl BoardInfo {
    /// Placeholder returned when a board cannot be opened.
    pub fn unavailable(status: i32) -> Self {
        Self {
            version: f64::from(status),
            serial: NO_SERIAL.to_string(),
            manufacturer: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Raw capability offered by a hardware RNG driver.
///
/// Status codes follow the driver convention: `0` is success, anything else
/// is a device-specific failure (see [`crate::error::DriverStatus`]).
///
/// Device handles are not reentrant. Callers must serialise access to a given
/// device index, e.g. one session per thread or a mutex per selector.
/// Reads block until the driver returns; there is no timeout.
pub trait RngDevice {
    /// Number of units of `class`; may be 0 or negative when the driver is absent.
    fn count(&self, class: DeviceClass) -> i32;

    /// Driver version for `class`; negative on error.
    fn driver_version(&self, class: DeviceClass) -> f64;

    /// Board details for unit `index` of `class`.
    fn board_info(&self, class: DeviceClass, index: u32) -> BoardInfo;

    /// Fill `dest` completely with raw random bytes.
    fn read_raw(&self, class: DeviceClass, index: u32, dest: &mut [u8]) -> i32;
}

impl<D: RngDevice + ?Sized> RngDevice for &D {
    fn count(&self, class: DeviceClass) -> i32 {
        (**self).count(class)
    }

    fn driver_version(&self, class: DeviceClass) -> f64 {
        (**self).driver_version(class)
    }

    fn board_info(&self, class: DeviceClass, index: u32) -> BoardInfo {
        (**self).board_info(class, index)
    }

    fn read_raw(&self, class: DeviceClass, index: u32, dest: &mut [u8]) -> i32 {
        (**self).read_raw(class, index, dest)
    }
}

impl<D: RngDevice + ?Sized> RngDevice for Box<D> {
    fn count(&self, class: DeviceClass) -> i32 {
        (**self).count(class)
    }

    fn driver_version(&self, class: DeviceClass) -> f64 {
        (**self).driver_version(class)
    }

    fn board_info(&self, class: DeviceClass, index: u32) -> BoardInfo {
        (**self).board_info(class, index)
    }

    fn read_raw(&self, class: DeviceClass, index: u32, dest: &mut [u8]) -> i32 {
        (**self).read_raw(class, index, dest)
    }
}

impl<D: RngDevice + ?Sized> RngDevice for Arc<D> {
    fn count(&self, class: DeviceClass) -> i32 {
        (**self).count(class)
    }

    fn driver_version(&self, class: DeviceClass) -> f64 {
        (**self).driver_version(class)
    }

    fn board_info(&self, class: DeviceClass, index: u32) -> BoardInfo {
        (**self).board_info(class, index)
    }

    fn read_raw(&self, class: DeviceClass, index: u32, dest: &mut [u8]) -> i32 {
        (**self).read_raw(class, index, dest)
    }
}
