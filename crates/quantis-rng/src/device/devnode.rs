//! Character-device backend for PCI Quantis cards.
//!
//! The PCI driver exposes each card as `/dev/qrandom{N}`. Reading the node
//! yields raw random bytes. Board and driver queries need driver ioctls,
//! which this backend does not issue; those report "not available".
//!
//! USB units are not reachable through device nodes, so `count(Usb)` is 0.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{BoardInfo, DeviceClass, RngDevice, MAX_DEVICE_INDEX, NOT_AVAILABLE, NO_SERIAL};
use crate::error::DriverStatus;

/// Default directory holding the device nodes.
pub const DEFAULT_DEV_DIR: &str = "/dev";

/// Default node name prefix used by the PCI driver.
pub const DEFAULT_DEV_PREFIX: &str = "qrandom";

/// PCI cards read through `{dir}/{prefix}{index}` device nodes.
#[derive(Debug, Clone)]
pub struct DevNodeDevice {
    dir: PathBuf,
    prefix: String,
}

impl DevNodeDevice {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Path of the node for card `index`.
    pub fn node_path(&self, index: u32) -> PathBuf {
        self.dir.join(format!("{}{}", self.prefix, index))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn count_nodes(&self) -> i32 {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // No directory means no reachable devices.
            Err(_) => return 0,
        };
        let count = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(&self.prefix))
            .count();
        i32::try_from(count).unwrap_or(i32::MAX)
    }

    fn open(&self, class: DeviceClass, index: u32) -> Result<File, i32> {
        if index >= MAX_DEVICE_INDEX {
            return Err(DriverStatus::InvalidDeviceNumber.code());
        }
        if class == DeviceClass::Usb {
            return Err(DriverStatus::NoDevice.code());
        }
        File::open(self.node_path(index)).map_err(|e| {
            log::debug!("cannot open {}: {e}", self.node_path(index).display());
            DriverStatus::NoDevice.code()
        })
    }
}

impl Default for DevNodeDevice {
    fn default() -> Self {
        Self::new(DEFAULT_DEV_DIR, DEFAULT_DEV_PREFIX)
    }
}

impl RngDevice for DevNodeDevice {
    fn count(&self, class: DeviceClass) -> i32 {
        match class {
            DeviceClass::Pci => self.count_nodes(),
            DeviceClass::Usb => 0,
        }
    }

    fn driver_version(&self, _class: DeviceClass) -> f64 {
        f64::from(DriverStatus::OperationNotSupported.code())
    }

    fn board_info(&self, class: DeviceClass, index: u32) -> BoardInfo {
        match self.open(class, index) {
            Ok(_) => BoardInfo {
                version: 0.0,
                serial: NO_SERIAL.to_string(),
                manufacturer: NOT_AVAILABLE.to_string(),
            },
            Err(status) => BoardInfo::unavailable(status),
        }
    }

    fn read_raw(&self, class: DeviceClass, index: u32, dest: &mut [u8]) -> i32 {
        if dest.is_empty() {
            return 0;
        }
        let mut file = match self.open(class, index) {
            Ok(file) => file,
            Err(status) => return status,
        };
        match file.read_exact(dest) {
            Ok(()) => 0,
            Err(e) => {
                log::warn!(
                    "short read from {} ({} bytes requested): {e}",
                    self.node_path(index).display(),
                    dest.len()
                );
                DriverStatus::Io.code()
            }
        }
    }
}
