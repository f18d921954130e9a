//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService / Supervisor (domain)
//! ```
//!
//! Driven adapters (GPIO backend, event sinks) implement these traits.  The
//! [`ControllerService`](super::service::ControllerService) and the
//! [`Supervisor`](crate::lifecycle::Supervisor) consume them via generics, so
//! the domain core never touches hardware directly.

use crate::error::HardwareError;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port over an opened GPIO subsystem.
///
/// Opening is the adapter's constructor; everything after that goes through
/// this trait.  Every call after [`close`](GpioPort::close) must fail with
/// [`HardwareError::NotOpen`].
pub trait GpioPort {
    /// Put `pin` into plain digital output mode.  Leaves PWM mode if the pin
    /// was in it.
    fn configure_digital_output(&mut self, pin: u8) -> Result<(), HardwareError>;

    /// Drive an output pin high.
    fn set_high(&mut self, pin: u8) -> Result<(), HardwareError>;

    /// Drive an output pin low.
    fn set_low(&mut self, pin: u8) -> Result<(), HardwareError>;

    /// Route `pin` to its hardware PWM channel.
    fn configure_pwm_output(&mut self, pin: u8) -> Result<(), HardwareError>;

    /// Set the PWM frame frequency of a pin in PWM mode.
    fn set_frequency(&mut self, pin: u8, hz: u32) -> Result<(), HardwareError>;

    /// Set the PWM duty cycle to `numerator / denominator`.
    fn set_duty_cycle(
        &mut self,
        pin: u8,
        numerator: u32,
        denominator: u32,
    ) -> Result<(), HardwareError>;

    /// Release the GPIO subsystem.
    fn close(&mut self) -> Result<(), HardwareError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
