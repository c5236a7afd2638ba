//! Backend configuration.
//!
//! Selects which [`RngDevice`] implementation backs a session and the unit
//! to draw from. Stored on disk as JSON:
//!
//! ```json
//! {
//!     "backend": "devnode",
//!     "dev_dir": "/dev",
//!     "dev_prefix": "qrandom",
//!     "seed": null,
//!     "device": "pci",
//!     "index": 0
//! }
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::devnode::{DEFAULT_DEV_DIR, DEFAULT_DEV_PREFIX};
use crate::device::{DevNodeDevice, DeviceClass, DeviceSelector, RngDevice, SimulatedDevice};
use crate::error::{RngError, Result};

/// Which device implementation to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// PRNG-backed stand-in; needs no hardware.
    #[default]
    Simulated,
    /// PCI cards through `/dev/qrandomN` nodes.
    DevNode,
}

impl FromStr for BackendKind {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" | "sim" => Ok(Self::Simulated),
            "devnode" | "dev" => Ok(Self::DevNode),
            other => Err(RngError::Config(format!(
                "unknown backend '{other}' (expected simulated or devnode)"
            ))),
        }
    }
}

/// Device backend and unit selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RngConfig {
    pub backend: BackendKind,
    pub dev_dir: PathBuf,
    pub dev_prefix: String,
    /// Seed for the simulated backend; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub device: DeviceClass,
    pub index: u32,
}

impl Default for RngConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            dev_dir: PathBuf::from(DEFAULT_DEV_DIR),
            dev_prefix: DEFAULT_DEV_PREFIX.to_string(),
            seed: None,
            device: DeviceClass::Usb,
            index: 0,
        }
    }
}

impl RngConfig {
    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `RngError::Io` if the file cannot be read, or
    /// `RngError::Config` if it is not valid configuration JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            RngError::Config(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Write the configuration as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RngError::Config(e.to_string()))?;
        std::fs::write(path, json.as_bytes())?;
        Ok(())
    }

    /// The unit draws should target.
    pub fn selector(&self) -> DeviceSelector {
        DeviceSelector::new(self.device, self.index)
    }

    /// Instantiate the configured backend.
    pub fn open_device(&self) -> Box<dyn RngDevice> {
        match self.backend {
            BackendKind::Simulated => Box::new(SimulatedDevice::new(self.seed)),
            BackendKind::DevNode => {
                Box::new(DevNodeDevice::new(&self.dev_dir, self.dev_prefix.clone()))
            }
        }
    }
}
