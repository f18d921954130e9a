//! Unified error types for the controller.
//!
//! A single [`Error`] enum that every subsystem converts into, keeping the
//! supervisor's error handling uniform.  Hardware failures carry the pin and
//! the backend's message so a log line is enough to diagnose them.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The GPIO backend reported a failure.
    Hardware(HardwareError),
    /// Configuration is invalid.
    Config(&'static str),
    /// An operation was requested in the wrong lifecycle state.
    Lifecycle(&'static str),
    /// The input reader thread could not be spawned.
    Spawn(String),
    /// Termination signal handlers could not be installed.
    Signal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hardware(e) => write!(f, "hardware: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Lifecycle(msg) => write!(f, "lifecycle: {msg}"),
            Self::Spawn(msg) => write!(f, "spawn: {msg}"),
            Self::Signal(msg) => write!(f, "signal: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Hardware errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardwareError {
    /// The GPIO subsystem could not be opened.
    Open(String),
    /// The GPIO subsystem reported an error while being released.
    Close(String),
    /// The handle was used after `close`.
    NotOpen,
    /// The backend refused an operation on a pin.
    Pin { pin: u8, reason: String },
    /// A level write targeted a pin that is not a digital output.
    NotOutput(u8),
    /// A PWM write targeted a pin that is not in PWM mode.
    NotPwm(u8),
    /// The pin has no hardware PWM channel.
    NoPwmChannel(u8),
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(msg) => write!(f, "open GPIO failed: {msg}"),
            Self::Close(msg) => write!(f, "close GPIO failed: {msg}"),
            Self::NotOpen => write!(f, "GPIO handle is not open"),
            Self::Pin { pin, reason } => write!(f, "GPIO{pin}: {reason}"),
            Self::NotOutput(pin) => write!(f, "GPIO{pin} is not configured as an output"),
            Self::NotPwm(pin) => write!(f, "GPIO{pin} is not in PWM mode"),
            Self::NoPwmChannel(pin) => write!(f, "GPIO{pin} has no hardware PWM channel"),
        }
    }
}

impl std::error::Error for HardwareError {}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
