//! Error types for Quantis RNG.
//!
//! All errors are strongly typed and propagated without panicking.
//! Range validation failures are always raised before any device I/O.

use std::fmt;

/// Status codes reported by the device driver.
///
/// `0` is success and never maps to a `DriverStatus`. Any other value is a
/// failure whose exact meaning is device specific; codes the driver does not
/// document are kept as [`DriverStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverStatus {
    NoDriver,
    InvalidDeviceNumber,
    InvalidReadSize,
    InvalidParameter,
    NoMemory,
    NoModule,
    Io,
    NoDevice,
    OperationNotSupported,
    InvalidStatus,
    Other(i32),
}

impl DriverStatus {
    /// Map a raw status code. Returns `None` for success (`0`).
    pub fn from_code(code: i32) -> Option<Self> {
        let status = match code {
            0 => return None,
            -101 => Self::NoDriver,
            -102 => Self::InvalidDeviceNumber,
            -103 => Self::InvalidReadSize,
            -104 => Self::InvalidParameter,
            -105 => Self::NoMemory,
            -106 => Self::NoModule,
            -107 => Self::Io,
            -108 => Self::NoDevice,
            -109 => Self::OperationNotSupported,
            -110 => Self::InvalidStatus,
            other => Self::Other(other),
        };
        Some(status)
    }

    /// The raw status code as the driver reports it.
    pub fn code(self) -> i32 {
        match self {
            Self::NoDriver => -101,
            Self::InvalidDeviceNumber => -102,
            Self::InvalidReadSize => -103,
            Self::InvalidParameter => -104,
            Self::NoMemory => -105,
            Self::NoModule => -106,
            Self::Io => -107,
            Self::NoDevice => -108,
            Self::OperationNotSupported => -109,
            Self::InvalidStatus => -110,
            Self::Other(code) => code,
        }
    }

    /// Human-readable description of the status.
    pub fn message(self) -> &'static str {
        match self {
            Self::NoDriver => "Invalid driver type",
            Self::InvalidDeviceNumber => "Invalid device number (out of bounds)",
            Self::InvalidReadSize => "Invalid size (size is negative or too large)",
            Self::InvalidParameter => "Invalid parameter",
            Self::NoMemory => "Memory allocation failure (insufficient memory?)",
            Self::NoModule => "No module found or no module enabled",
            Self::Io => "Input/output error",
            Self::NoDevice => "No such device (it may have been disconnected)",
            Self::OperationNotSupported => "Operation is not supported or unimplemented",
            Self::InvalidStatus => "the module returns an invalid status",
            Self::Other(_) => "Unknown device error",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.message(), self.code())
    }
}

/// Error types covering all sampling and device operations.
#[derive(Debug, thiserror::Error)]
pub enum RngError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Device error: {status}")]
    DeviceError { status: DriverStatus },

    #[error("No result: {0}")]
    NoResult(String),

    #[error("Request too large: {requested} bytes exceeds the {limit} byte limit")]
    TooLargeRequest { requested: usize, limit: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RngError {
    /// Build a `DeviceError` from a raw non-zero status code.
    pub fn device(code: i32) -> Self {
        Self::DeviceError {
            status: DriverStatus::from_code(code).unwrap_or(DriverStatus::Other(code)),
        }
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, RngError>;
