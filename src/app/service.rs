//! Controller service — the hexagonal core.
//!
//! [`ControllerService`] owns the servo duty-cycle state and turns parsed
//! [`Command`]s into GPIO port calls.  It holds no hardware handle itself;
//! the caller passes the port in, which keeps the service testable with a
//! recording mock.
//!
//! ```text
//!  Command ──▶ ┌──────────────────────┐ ──▶ EventSink
//!              │  ControllerService   │
//!   GpioPort ◀─│  PwmState · LED      │
//!              └──────────────────────┘
//! ```

use log::{debug, warn};

use crate::config::ControllerConfig;
use crate::control::pwm::PwmState;
use crate::error::HardwareError;

use super::commands::Command;
use super::events::AppEvent;
use super::ports::{EventSink, GpioPort};

// ───────────────────────────────────────────────────────────────
// ControllerService
// ───────────────────────────────────────────────────────────────

/// Single writer of the actuator state.
pub struct ControllerService {
    pwm: PwmState,
    led_pin: u8,
    servo_pin: u8,
    duty_cycle_base: u32,
}

impl ControllerService {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            pwm: PwmState::from_config(config),
            led_pin: config.led_pin,
            servo_pin: config.servo_pin,
            duty_cycle_base: config.duty_cycle_base,
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply one command.
    ///
    /// State is updated even when the hardware write fails; the failure is
    /// reported through `sink` and returned so the caller can log it.
    pub fn handle_command(
        &mut self,
        cmd: Command,
        hw: &mut impl GpioPort,
        sink: &mut impl EventSink,
    ) -> Result<(), HardwareError> {
        let result = match &cmd {
            Command::SetHigh => self.drive_led(true, hw, sink),
            Command::SetLow => self.drive_led(false, hw, sink),
            Command::IncreasePwm => {
                self.pwm.increase();
                self.write_duty_cycle(hw, sink)
            }
            Command::DecreasePwm => {
                self.pwm.decrease();
                self.write_duty_cycle(hw, sink)
            }
            Command::SetPwmAbsolute(value) => {
                self.pwm.set_absolute(*value);
                self.write_duty_cycle(hw, sink)
            }
            Command::Unrecognized(token) => {
                debug!("Ignoring unrecognized input {:?}", token);
                sink.emit(&AppEvent::InputIgnored(token.clone()));
                Ok(())
            }
        };

        if let Err(ref e) = result {
            warn!("Command {:?} failed: {}", cmd, e);
            sink.emit(&AppEvent::CommandFailed(e.clone()));
        }
        result
    }

    /// Write the current duty cycle to the servo pin.  Used at startup to
    /// put the servo in its default position.
    pub fn write_duty_cycle(
        &self,
        hw: &mut impl GpioPort,
        sink: &mut impl EventSink,
    ) -> Result<(), HardwareError> {
        let numerator = self.pwm.value();
        sink.emit(&AppEvent::PwmChanged {
            numerator,
            denominator: self.duty_cycle_base,
        });
        hw.set_duty_cycle(self.servo_pin, numerator, self.duty_cycle_base)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current duty-cycle numerator.
    pub fn pwm_value(&self) -> u32 {
        self.pwm.value()
    }

    // ── Internal ──────────────────────────────────────────────

    fn drive_led(
        &self,
        high: bool,
        hw: &mut impl GpioPort,
        sink: &mut impl EventSink,
    ) -> Result<(), HardwareError> {
        sink.emit(&AppEvent::LedChanged { high });
        if high {
            hw.set_high(self.led_pin)
        } else {
            hw.set_low(self.led_pin)
        }
    }
}
