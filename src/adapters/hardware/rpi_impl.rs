//! Raspberry Pi backend for [`GpioPort`], built on `rppal`.
//!
//! Compiled only with the `rpi` feature.  Digital pins go through
//! `/dev/gpiomem`; PWM pins go through the kernel's sysfs PWM interface,
//! which needs the `pwm-2chan` device-tree overlay (or `pwm` for a single
//! channel) enabled in `/boot/config.txt`.

use std::collections::HashMap;

use log::{debug, info};
use rppal::gpio::{Gpio, OutputPin};
use rppal::pwm::{Channel, Polarity, Pwm};

use crate::app::ports::GpioPort;
use crate::error::HardwareError;
use crate::pins;

/// A hardware PWM channel plus the frequency last programmed into it.
struct PwmOutput {
    pwm: Pwm,
    freq_hz: Option<u32>,
    duty: f64,
}

/// Opened GPIO subsystem on a Raspberry Pi.
pub struct RpiGpio {
    gpio: Option<Gpio>,
    outputs: HashMap<u8, OutputPin>,
    pwm: HashMap<u8, PwmOutput>,
}

impl RpiGpio {
    /// Open `/dev/gpiomem`.
    pub fn open() -> Result<Self, HardwareError> {
        let gpio = Gpio::new().map_err(|e| HardwareError::Open(e.to_string()))?;
        info!("gpio(rpi): opened");
        Ok(Self {
            gpio: Some(gpio),
            outputs: HashMap::new(),
            pwm: HashMap::new(),
        })
    }

    fn gpio(&self) -> Result<&Gpio, HardwareError> {
        self.gpio.as_ref().ok_or(HardwareError::NotOpen)
    }

    fn output_mut(&mut self, pin: u8) -> Result<&mut OutputPin, HardwareError> {
        self.gpio()?;
        self.outputs
            .get_mut(&pin)
            .ok_or(HardwareError::NotOutput(pin))
    }

    fn pwm_mut(&mut self, pin: u8) -> Result<&mut PwmOutput, HardwareError> {
        self.gpio()?;
        self.pwm.get_mut(&pin).ok_or(HardwareError::NotPwm(pin))
    }

    /// Disable and drop the PWM channel on `pin`, if any.
    fn release_pwm(&mut self, pin: u8) -> Result<(), HardwareError> {
        if let Some(out) = self.pwm.remove(&pin) {
            out.pwm.disable().map_err(|e| pin_error(pin, &e))?;
            debug!("gpio(rpi): GPIO{} PWM disabled", pin);
        }
        Ok(())
    }
}

fn pin_error(pin: u8, e: &dyn std::fmt::Display) -> HardwareError {
    HardwareError::Pin {
        pin,
        reason: e.to_string(),
    }
}

fn pwm_channel(pin: u8) -> Result<Channel, HardwareError> {
    match pins::pwm_channel_index(pin) {
        Some(0) => Ok(Channel::Pwm0),
        Some(1) => Ok(Channel::Pwm1),
        _ => Err(HardwareError::NoPwmChannel(pin)),
    }
}

impl GpioPort for RpiGpio {
    fn configure_digital_output(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.gpio()?;
        self.release_pwm(pin)?;
        // rppal hands out one handle per pin; drop ours before asking again.
        self.outputs.remove(&pin);
        let mut output = self
            .gpio()?
            .get(pin)
            .map_err(|e| pin_error(pin, &e))?
            .into_output();
        // Keep the pin a plain output after close instead of restoring the
        // PWM alt function it had before.
        output.set_reset_on_drop(false);
        self.outputs.insert(pin, output);
        debug!("gpio(rpi): GPIO{} -> output", pin);
        Ok(())
    }

    fn set_high(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.output_mut(pin)?.set_high();
        Ok(())
    }

    fn set_low(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.output_mut(pin)?.set_low();
        Ok(())
    }

    fn configure_pwm_output(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.gpio()?;
        let channel = pwm_channel(pin)?;
        // The sysfs PWM driver owns the pin function; a GPIO handle on the
        // same pin would fight it.
        self.outputs.remove(&pin);
        let pwm = Pwm::new(channel).map_err(|e| pin_error(pin, &e))?;
        pwm.set_polarity(Polarity::Normal)
            .map_err(|e| pin_error(pin, &e))?;
        self.pwm.insert(
            pin,
            PwmOutput {
                pwm,
                freq_hz: None,
                duty: 0.0,
            },
        );
        debug!("gpio(rpi): GPIO{} -> PWM ({:?})", pin, channel);
        Ok(())
    }

    fn set_frequency(&mut self, pin: u8, hz: u32) -> Result<(), HardwareError> {
        let out = self.pwm_mut(pin)?;
        out.pwm
            .set_frequency(f64::from(hz), out.duty)
            .map_err(|e| pin_error(pin, &e))?;
        out.pwm.enable().map_err(|e| pin_error(pin, &e))?;
        out.freq_hz = Some(hz);
        debug!("gpio(rpi): GPIO{} frequency {} Hz", pin, hz);
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
        let out = self.pwm_mut(pin)?;
        if out.freq_hz.is_none() {
            return Err(HardwareError::Pin {
                pin,
                reason: "PWM frequency not set".into(),
            });
        }
        // Numerators above the base saturate to a constant-high output.
        let duty = (f64::from(numerator) / f64::from(denominator)).min(1.0);
        out.pwm
            .set_duty_cycle(duty)
            .map_err(|e| pin_error(pin, &e))?;
        out.duty = duty;
        debug!("gpio(rpi): GPIO{} duty {}/{}", pin, numerator, denominator);
        Ok(())
    }

    fn close(&mut self) -> Result<(), HardwareError> {
        self.gpio()?;
        let mut first_error = None;
        let pwm_pins: Vec<u8> = self.pwm.keys().copied().collect();
        for pin in pwm_pins {
            if let Err(e) = self.release_pwm(pin) {
                first_error.get_or_insert(e);
            }
        }
        self.outputs.clear();
        self.gpio = None;
        info!("gpio(rpi): closed");
        match first_error {
            Some(e) => Err(HardwareError::Close(e.to_string())),
            None => Ok(()),
        }
    }
}
