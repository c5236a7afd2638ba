//! Quantis RNG — range-scaled access to hardware random number generators.
//!
//! Provides a device session over PCI/USB Quantis units, a scaled sampler
//! that turns raw device bytes into bounded integers, doubles and hex
//! strings, and the small command surface built on top of it (roll,
//! jackpot, coinflip, wheel, random ints/doubles/strings, device info).
//!
//! ```no_run
//! use quantis_rng::device::{DeviceClass, DeviceSelector, SimulatedDevice};
//! use quantis_rng::Sampler;
//!
//! let sampler = Sampler::open(SimulatedDevice::default(), DeviceSelector::new(DeviceClass::Usb, 0));
//! let die = sampler.draw_scaled_int(1, 6)?;
//! println!("rolled {}", die.value);
//! # Ok::<(), quantis_rng::RngError>(())
//! ```

pub mod buffer;
pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod report;
pub mod sampler;
pub mod session;
pub mod time;

// Re-export primary types
pub use buffer::{RawBuffer, MAX_READ_SIZE};
pub use commands::{Command, CommandOutput};
pub use config::{BackendKind, RngConfig};
pub use device::{BoardInfo, DeviceClass, DeviceSelector, RngDevice};
pub use error::{DriverStatus, Result, RngError};
pub use report::DeviceReport;
pub use sampler::{HexStringArray, Sampler, ScaledDouble, ScaledInt, ScaledIntArray};
pub use session::DeviceSession;
