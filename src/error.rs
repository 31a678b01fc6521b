//! Unified error types for the PetFeeder firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! command dispatcher's error handling uniform. All variants are `Copy` so
//! they can be cheaply passed back through the service layer without
//! allocation. Errors surface synchronously to the immediate caller; the
//! core never retries and never swallows a hardware error.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the actuator core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The pin controller or a pin could not be acquired.
    Init(InitError),
    /// A write was attempted on a port that is no longer configured.
    Write(WriteError),
    /// A caller contract violation (negative step count, zero hold time).
    /// Rejected before any pin is driven.
    InvalidArgument(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "hardware init: {e}"),
            Self::Write(e) => write!(f, "hardware write: {e}"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Acquisition errors
// ---------------------------------------------------------------------------

/// Failures while claiming and configuring an output pin.
///
/// Fatal to the command that triggered them, not to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The platform pin-control facility is not available.
    ControllerUnavailable,
    /// The pin number does not exist on this package.
    InvalidPin(u8),
    /// The pin is already owned by a live port.
    PinBusy(u8),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ControllerUnavailable => write!(f, "pin controller unavailable"),
            Self::InvalidPin(pin) => write!(f, "GPIO {pin} is not a valid output pin"),
            Self::PinBusy(pin) => write!(f, "GPIO {pin} is already claimed"),
        }
    }
}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Write errors
// ---------------------------------------------------------------------------

/// Failures while driving an output pin.
///
/// Unreachable in correct usage — a port only exists while its pin is
/// claimed — but surfaced rather than panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteError {
    /// The port was released before the write.
    Released(u8),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Released(pin) => write!(f, "GPIO {pin} written after release"),
        }
    }
}

impl From<WriteError> for Error {
    fn from(e: WriteError) -> Self {
        Self::Write(e)
    }
}

// ---------------------------------------------------------------------------
// embedded-hal integration
// ---------------------------------------------------------------------------

// Lets OutputPort serve as the `embedded_hal::digital::OutputPin` the
// drivers are generic over.
impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
