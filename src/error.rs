//! Unified error types for the Thermoguard firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the top-level control loop's error handling uniform.
//! All variants are `Copy` so they can be cheaply carried through the fault
//! latch and loop controllers without allocation.

use core::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A temperature probe could not be read.
    Sensor(SensorError),
    /// A safety fault was raised (or would be raised) by the latch.
    Fault(FaultCause),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Fault(e) => write!(f, "fault: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Outcome of a failed probe read. Disconnection is a first-class outcome
/// of the sensor port, not an exceptional condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No device answered on the one-wire bus (open line, pulled pin).
    Disconnected,
    /// A device answered but the scratchpad CRC did not match.
    CrcMismatch,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "probe disconnected"),
            Self::CrcMismatch => write!(f, "scratchpad CRC mismatch"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Fault causes
// ---------------------------------------------------------------------------

/// Causes a loop (or startup wiring) can latch the system with.
///
/// Every cause is unrecoverable within a run: the latch has no reset path,
/// the only way out is a power cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultCause {
    /// A loop's temperature probe stopped answering mid-run.
    SensorDisconnected,
    /// A loop observed a sample at or above its maximum safe temperature.
    OverMax,
    /// Heating was commanded but the temperature did not rise within the
    /// grace window — element, relay, or probe placement failure.
    DesyncNoRise,
    /// Too many loops or shutdown actions registered at startup.
    RegistrationOverflow,
    /// Reserved for future causes.
    Other,
}

impl fmt::Display for FaultCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorDisconnected => write!(f, "sensor disconnected"),
            Self::OverMax => write!(f, "over max temperature"),
            Self::DesyncNoRise => write!(f, "desync: no temperature rise"),
            Self::RegistrationOverflow => write!(f, "registration overflow"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl From<FaultCause> for Error {
    fn from(e: FaultCause) -> Self {
        Self::Fault(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
