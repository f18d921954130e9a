//! Controller configuration parameters
//!
//! All tunable parameters for the controller in one place.  The binary runs
//! with [`ControllerConfig::default`]; tests shorten the settle delay.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Pins ---
    /// BCM number of the LED output
    pub led_pin: u8,
    /// BCM number of the servo PWM output
    pub servo_pin: u8,

    // --- PWM ---
    /// Servo PWM frequency (Hz)
    pub servo_freq_hz: u32,
    /// Duty-cycle denominator
    pub duty_cycle_base: u32,
    /// Duty-cycle numerator written at startup
    pub default_pwm: u32,
    /// Lower bound for incremental adjustments
    pub min_pwm: u32,
    /// Upper bound for incremental adjustments
    pub max_pwm: u32,
    /// Increment applied by `A` / `D`
    pub pwm_step: u32,

    // --- Timing ---
    /// Delay between entering PWM mode and the first duty-cycle write (milliseconds)
    pub settle_delay_ms: u64,
}

impl ControllerConfig {
    /// Settle delay as a [`Duration`].
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Reject configurations that would break the clamp invariant or the
    /// duty-cycle arithmetic.
    pub fn validate(&self) -> Result<()> {
        if self.led_pin == self.servo_pin {
            return Err(Error::Config("led_pin and servo_pin must differ"));
        }
        if self.servo_freq_hz == 0 {
            return Err(Error::Config("servo_freq_hz must be non-zero"));
        }
        if self.duty_cycle_base == 0 {
            return Err(Error::Config("duty_cycle_base must be non-zero"));
        }
        if self.pwm_step == 0 {
            return Err(Error::Config("pwm_step must be non-zero"));
        }
        if self.min_pwm > self.max_pwm {
            return Err(Error::Config("min_pwm must not exceed max_pwm"));
        }
        if self.max_pwm > self.duty_cycle_base {
            return Err(Error::Config("max_pwm must not exceed duty_cycle_base"));
        }
        if !(self.min_pwm..=self.max_pwm).contains(&self.default_pwm) {
            return Err(Error::Config("default_pwm must lie within min_pwm..=max_pwm"));
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Pins
            led_pin: pins::LED_GPIO,
            servo_pin: pins::SERVO_GPIO,

            // PWM
            servo_freq_hz: pins::SERVO_PWM_FREQ_HZ,
            duty_cycle_base: pins::DUTY_CYCLE_BASE,
            default_pwm: 900, // 9.00 % ≈ centre on the reference servo
            min_pwm: 250,
            max_pwm: 1500,
            pwm_step: 50,

            // Timing
            settle_delay_ms: 1000,
        }
    }
}
