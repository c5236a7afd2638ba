//! Device enumeration report (`info`).
//!
//! Walks both device classes and collects the driver version, the number of
//! cards, and per-board details. The report renders as human-readable text
//! via `Display` and as JSON via `Serialize`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::{DeviceClass, RngDevice, MAX_DEVICE_INDEX};
use crate::error::DriverStatus;

/// One board found during enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardReport {
    pub index: u32,
    pub version: f64,
    pub serial: String,
    pub manufacturer: String,
}

/// Enumeration result for one device class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReport {
    pub class: DeviceClass,
    pub driver_version: f64,
    /// Set when the driver version query failed (negative version).
    pub driver_error: Option<String>,
    pub count: i32,
    pub boards: Vec<BoardReport>,
}

/// Full device report across PCI and USB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceReport {
    pub generated_at: String,
    pub classes: Vec<ClassReport>,
}

impl DeviceReport {
    /// Total number of boards found across classes.
    pub fn total_boards(&self) -> usize {
        self.classes.iter().map(|c| c.boards.len()).sum()
    }
}

/// Enumerate both device classes on `device`.
pub fn enumerate<D: RngDevice + ?Sized>(device: &D) -> DeviceReport {
    let classes = DeviceClass::ALL
        .iter()
        .map(|&class| enumerate_class(device, class))
        .collect();
    DeviceReport {
        generated_at: crate::time::now_rfc3339(),
        classes,
    }
}

fn enumerate_class<D: RngDevice + ?Sized>(device: &D, class: DeviceClass) -> ClassReport {
    let driver_version = device.driver_version(class);
    let driver_error = (driver_version < 0.0).then(|| {
        DriverStatus::from_code(driver_version as i32)
            .map(|status| status.message().to_string())
            .unwrap_or_else(|| "Error while getting driver version".to_string())
    });

    let count = device.count(class);
    let found = u32::try_from(count).unwrap_or(0).min(MAX_DEVICE_INDEX);
    let boards = (0..found)
        .map(|index| {
            let info = device.board_info(class, index);
            BoardReport {
                index,
                version: info.version,
                serial: info.serial,
                manufacturer: info.manufacturer,
            }
        })
        .collect();

    ClassReport {
        class,
        driver_version,
        driver_error,
        count,
        boards,
    }
}

impl fmt::Display for ClassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.class {
            DeviceClass::Pci => "PCI-E",
            DeviceClass::Usb => "USB",
        };
        writeln!(f, " Searching for {label} devices...")?;
        if let Some(err) = &self.driver_error {
            writeln!(f, " Error while getting driver version: {err}")?;
        }
        writeln!(f, " Using driver version: {}", self.driver_version)?;
        writeln!(f, " Found card(s): {}", self.count)?;
        for board in &self.boards {
            writeln!(f, "     - Details for device #{}", board.index)?;
            writeln!(f, "      core version: {}", board.version)?;
            writeln!(f, "      serial number: {}", board.serial)?;
            writeln!(f, "      manufacturer: {}", board.manufacturer)?;
        }
        Ok(())
    }
}

impl fmt::Display for DeviceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                writeln!(f, "-----------------")?;
            }
            write!(f, "{class}")?;
        }
        Ok(())
    }
}
