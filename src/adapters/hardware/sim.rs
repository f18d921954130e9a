//! In-memory GPIO backend.
//!
//! Models pin modes, levels and PWM settings without touching hardware.
//! Unit tests drive it directly; the `sim` feature exposes it to other
//! crates.

use std::collections::HashMap;

use log::{debug, info};

use crate::app::ports::GpioPort;
use crate::error::HardwareError;
use crate::pins;

/// Mode of a simulated pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Output { high: bool },
    Pwm {
        freq_hz: Option<u32>,
        duty: Option<(u32, u32)>,
    },
}

/// In-memory GPIO model.
#[derive(Debug)]
pub struct SimGpio {
    pins: HashMap<u8, PinMode>,
    open: bool,
}

impl SimGpio {
    /// Open the simulated GPIO subsystem.  Never fails.
    pub fn open() -> Result<Self, HardwareError> {
        info!("gpio(sim): opened");
        Ok(Self {
            pins: HashMap::new(),
            open: true,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Output level, or `None` if the pin is not a digital output.
    pub fn level(&self, pin: u8) -> Option<bool> {
        match self.pins.get(&pin) {
            Some(PinMode::Output { high }) => Some(*high),
            _ => None,
        }
    }

    /// Last duty cycle written, or `None` if the pin is not in PWM mode.
    pub fn duty_cycle(&self, pin: u8) -> Option<(u32, u32)> {
        match self.pins.get(&pin) {
            Some(PinMode::Pwm { duty, .. }) => *duty,
            _ => None,
        }
    }

    pub fn is_pwm(&self, pin: u8) -> bool {
        matches!(self.pins.get(&pin), Some(PinMode::Pwm { .. }))
    }

    fn ensure_open(&self) -> Result<(), HardwareError> {
        if self.open {
            Ok(())
        } else {
            Err(HardwareError::NotOpen)
        }
    }

    fn write_level(&mut self, pin: u8, level: bool) -> Result<(), HardwareError> {
        self.ensure_open()?;
        match self.pins.get_mut(&pin) {
            Some(PinMode::Output { high }) => {
                *high = level;
                debug!("gpio(sim): GPIO{} -> {}", pin, if level { "HIGH" } else { "LOW" });
                Ok(())
            }
            _ => Err(HardwareError::NotOutput(pin)),
        }
    }

    fn pwm_mut(&mut self, pin: u8) -> Result<&mut PinMode, HardwareError> {
        self.ensure_open()?;
        match self.pins.get_mut(&pin) {
            Some(mode) if matches!(mode, PinMode::Pwm { .. }) => Ok(mode),
            _ => Err(HardwareError::NotPwm(pin)),
        }
    }
}

impl GpioPort for SimGpio {
    fn configure_digital_output(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.ensure_open()?;
        self.pins.insert(pin, PinMode::Output { high: false });
        debug!("gpio(sim): GPIO{} -> output", pin);
        Ok(())
    }

    fn set_high(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.write_level(pin, true)
    }

    fn set_low(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.write_level(pin, false)
    }

    fn configure_pwm_output(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.ensure_open()?;
        if pins::pwm_channel_index(pin).is_none() {
            return Err(HardwareError::NoPwmChannel(pin));
        }
        self.pins.insert(
            pin,
            PinMode::Pwm {
                freq_hz: None,
                duty: None,
            },
        );
        debug!("gpio(sim): GPIO{} -> PWM", pin);
        Ok(())
    }

    fn set_frequency(&mut self, pin: u8, hz: u32) -> Result<(), HardwareError> {
        if let PinMode::Pwm { freq_hz, .. } = self.pwm_mut(pin)? {
            *freq_hz = Some(hz);
        }
        debug!("gpio(sim): GPIO{} frequency {} Hz", pin, hz);
        Ok(())
    }

    fn set_duty_cycle(
        &mut self,
        pin: u8,
        numerator: u32,
        denominator: u32,
    ) -> Result<(), HardwareError> {
        if denominator == 0 {
            return Err(HardwareError::Pin {
                pin,
                reason: "duty-cycle denominator is zero".into(),
            });
        }
        if let PinMode::Pwm { duty, .. } = self.pwm_mut(pin)? {
            *duty = Some((numerator, denominator));
        }
        debug!("gpio(sim): GPIO{} duty {}/{}", pin, numerator, denominator);
        Ok(())
    }

    fn close(&mut self) -> Result<(), HardwareError> {
        self.ensure_open()?;
        self.open = false;
        info!("gpio(sim): closed");
        Ok(())
    }
}
