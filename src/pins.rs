//! GPIO / peripheral pin assignments for the controller board.
//!
//! Single source of truth — [`ControllerConfig::default`](crate::config::ControllerConfig)
//! and the adapters reference this module rather than hard-coding pin numbers.
//! Numbers are BCM GPIO numbers, not physical header positions.

// ---------------------------------------------------------------------------
// Indicator LED
// ---------------------------------------------------------------------------

/// Digital output driving the indicator LED (physical pin 35).
pub const LED_GPIO: u8 = 19;

// ---------------------------------------------------------------------------
// Servo
// ---------------------------------------------------------------------------

/// Hardware-PWM capable output driving the servo signal line (physical pin 32).
pub const SERVO_GPIO: u8 = 12;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Servo frame rate (50 Hz → 20 ms period).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// Denominator of every duty-cycle write.  A numerator of 900 is 9.00 %.
pub const DUTY_CYCLE_BASE: u32 = 10_000;

/// Hardware PWM channel index behind a BCM pin, if it has one.
///
/// GPIO 12/18 route to PWM0 and GPIO 13/19 to PWM1 (ALT0 / ALT5 functions).
pub const fn pwm_channel_index(pin: u8) -> Option<u8> {
    match pin {
        12 | 18 => Some(0),
        13 | 19 => Some(1),
        _ => None,
    }
}
