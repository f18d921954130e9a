//! Outbound application events.
//!
//! The [`ControllerService`](super::service::ControllerService) and the
//! [`Supervisor`](crate::lifecycle::Supervisor) emit these through the
//! [`EventSink`](super::ports::EventSink) port.

use crate::error::HardwareError;
use crate::lifecycle::{LifecycleState, ShutdownReason};

/// Teardown steps, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownStep {
    /// Force the LED low.
    LedLow,
    /// Take the servo pin out of PWM mode.
    ServoRelease,
    /// Release the GPIO handle.
    Close,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A new duty cycle was computed (emitted before the hardware write).
    PwmChanged { numerator: u32, denominator: u32 },

    /// The LED was commanded to a level.
    LedChanged { high: bool },

    /// An input line did not parse to a command.
    InputIgnored(String),

    /// A hardware write failed while handling a command.
    CommandFailed(HardwareError),

    /// The supervisor moved between lifecycle states.
    StateChanged {
        from: LifecycleState,
        to: LifecycleState,
    },

    /// The supervisor received a reason to stop.
    ShutdownRequested(ShutdownReason),

    /// A teardown step failed.  Teardown continues.
    TeardownFailed {
        step: TeardownStep,
        error: HardwareError,
    },
}
