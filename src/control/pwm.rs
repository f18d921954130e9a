//! Servo duty-cycle state
//!
//! Holds the current duty-cycle numerator and applies the step/clamp rules.
//! Incremental moves saturate at the configured bounds; absolute writes are
//! taken verbatim, so a value outside the bounds stays there until the next
//! incremental move pulls it back in.

use crate::config::ControllerConfig;

/// Bounds and step for incremental moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmLimits {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl PwmLimits {
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            min: config.min_pwm,
            max: config.max_pwm,
            step: config.pwm_step,
        }
    }
}

/// Duty-cycle numerator for the servo output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PwmState {
    value: u32,
    limits: PwmLimits,
}

impl PwmState {
    pub fn new(initial: u32, limits: PwmLimits) -> Self {
        Self {
            value: initial,
            limits,
        }
    }

    /// Start at the configured default.
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(config.default_pwm, PwmLimits::from_config(config))
    }

    /// Step up, saturating at `max`.  Returns the new value.
    pub fn increase(&mut self) -> u32 {
        self.value = self.value.saturating_add(self.limits.step).min(self.limits.max);
        self.value
    }

    /// Step down, saturating at `min`.  Returns the new value.
    pub fn decrease(&mut self) -> u32 {
        self.value = self.value.saturating_sub(self.limits.step).max(self.limits.min);
        self.value
    }

    /// Take `value` as-is.  No range check.
    pub fn set_absolute(&mut self, value: u32) -> u32 {
        self.value = value;
        self.value
    }

    pub fn value(&self) -> u32 {
        self.value
    }

}
