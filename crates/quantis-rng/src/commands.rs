//! Caller-facing operations and the command dispatch table.
//!
//! Each documented command maps to one draw with fixed or caller-supplied
//! bounds:
//!
//! | Command        | Output                               |
//! |----------------|--------------------------------------|
//! | `info`         | device report (both classes)         |
//! | `roll`         | int in `[1, 100]`                    |
//! | `jackpot`      | double in `[0.01, 100.00]`, 2dp      |
//! | `coinflip`     | int in `{1, 2}`                      |
//! | `wheel`        | double in `[1.00, 25.99]`, 2dp       |
//! | `random-int`   | int, or array of ints with a count   |
//! | `random-double`| double, 2dp                          |
//! | `random-string`| array of hex strings                 |

use std::fmt;

use serde::Serialize;

use crate::device::RngDevice;
use crate::error::Result;
use crate::report::{self, DeviceReport};
use crate::sampler::{HexStringArray, Sampler, ScaledDouble, ScaledInt, ScaledIntArray};

pub const ROLL_RANGE: (i32, i32) = (1, 100);
pub const JACKPOT_RANGE: (f64, f64) = (0.01, 100.00);
pub const COINFLIP_RANGE: (i32, i32) = (1, 2);
pub const WHEEL_RANGE: (f64, f64) = (1.00, 25.99);

/// Roll a hundred-sided die.
pub fn roll<D: RngDevice>(sampler: &Sampler<D>) -> Result<ScaledInt> {
    sampler.draw_scaled_int(ROLL_RANGE.0, ROLL_RANGE.1)
}

/// Draw a jackpot amount.
pub fn jackpot<D: RngDevice>(sampler: &Sampler<D>) -> Result<ScaledDouble> {
    sampler.draw_scaled_double(JACKPOT_RANGE.0, JACKPOT_RANGE.1)
}

/// Flip a coin: 1 or 2.
pub fn coinflip<D: RngDevice>(sampler: &Sampler<D>) -> Result<ScaledInt> {
    sampler.draw_scaled_int(COINFLIP_RANGE.0, COINFLIP_RANGE.1)
}

/// Spin the wheel.
pub fn wheel<D: RngDevice>(sampler: &Sampler<D>) -> Result<ScaledDouble> {
    sampler.draw_scaled_double(WHEEL_RANGE.0, WHEEL_RANGE.1)
}

/// One operation of the command surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Info,
    Roll,
    Jackpot,
    Coinflip,
    Wheel,
    RandomInt {
        min: i32,
        max: i32,
        count: Option<usize>,
    },
    RandomDouble {
        min: f64,
        max: f64,
    },
    RandomString {
        count: usize,
        length: usize,
    },
}

/// Result of running a [`Command`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum CommandOutput {
    Int(ScaledInt),
    Double(ScaledDouble),
    Ints(ScaledIntArray),
    Strings(HexStringArray),
    Report(DeviceReport),
}

impl Command {
    /// Command name as shown on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Roll => "roll",
            Self::Jackpot => "jackpot",
            Self::Coinflip => "coinflip",
            Self::Wheel => "wheel",
            Self::RandomInt { .. } => "random-int",
            Self::RandomDouble { .. } => "random-double",
            Self::RandomString { .. } => "random-string",
        }
    }

    /// Execute against `sampler`. `Info` enumerates the sampler's device.
    pub fn run<D: RngDevice>(&self, sampler: &Sampler<D>) -> Result<CommandOutput> {
        log::debug!("running {} on {}", self.name(), sampler.session().selector());
        let output = match *self {
            Self::Info => CommandOutput::Report(report::enumerate(sampler.session().device())),
            Self::Roll => CommandOutput::Int(roll(sampler)?),
            Self::Jackpot => CommandOutput::Double(jackpot(sampler)?),
            Self::Coinflip => CommandOutput::Int(coinflip(sampler)?),
            Self::Wheel => CommandOutput::Double(wheel(sampler)?),
            Self::RandomInt {
                min,
                max,
                count: None,
            } => CommandOutput::Int(sampler.draw_scaled_int(min, max)?),
            Self::RandomInt {
                min,
                max,
                count: Some(count),
            } => CommandOutput::Ints(sampler.draw_scaled_int_array(count, min, max)?),
            Self::RandomDouble { min, max } => {
                CommandOutput::Double(sampler.draw_scaled_double(min, max)?)
            }
            Self::RandomString { count, length } => {
                CommandOutput::Strings(sampler.draw_hex_string_array(count, length)?)
            }
        };
        Ok(output)
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => writeln!(f, "{}", v.value),
            Self::Double(v) => writeln!(f, "{:.2}", v.value),
            Self::Ints(arr) => arr.values.iter().try_for_each(|v| writeln!(f, "{v}")),
            Self::Strings(arr) => arr.strings.iter().try_for_each(|s| writeln!(f, "{s}")),
            Self::Report(report) => write!(f, "{report}"),
        }
    }
}
