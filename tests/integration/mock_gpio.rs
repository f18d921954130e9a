//! Recording GPIO adapter for integration tests.
//!
//! Records every port call in a shared log so tests can inspect the full
//! call history even after the supervisor has consumed and closed the
//! handle.  Individual calls can be made to fail.

use std::cell::RefCell;
use std::rc::Rc;

use servoctl::HardwareError;
use servoctl::app::events::AppEvent;
use servoctl::app::ports::{EventSink, GpioPort};

// ── GPIO call record ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioCall {
    DigitalOutput(u8),
    High(u8),
    Low(u8),
    Pwm(u8),
    Frequency(u8, u32),
    Duty(u8, u32, u32),
    Close,
}

pub type CallLog = Rc<RefCell<Vec<GpioCall>>>;

// ── MockGpio ──────────────────────────────────────────────────

pub struct MockGpio {
    log: CallLog,
    failing: Vec<GpioCall>,
}

#[allow(dead_code)]
impl MockGpio {
    pub fn new() -> (Self, CallLog) {
        let log = CallLog::default();
        (
            Self {
                log: log.clone(),
                failing: Vec::new(),
            },
            log,
        )
    }

    /// Make `call` return an error.  It is still recorded.
    pub fn fail_on(mut self, call: GpioCall) -> Self {
        self.failing.push(call);
        self
    }

    fn record(&mut self, call: GpioCall) -> Result<(), HardwareError> {
        self.log.borrow_mut().push(call);
        if !self.failing.contains(&call) {
            return Ok(());
        }
        Err(match call {
            GpioCall::Close => HardwareError::Close("injected".into()),
            GpioCall::DigitalOutput(pin)
            | GpioCall::High(pin)
            | GpioCall::Low(pin)
            | GpioCall::Pwm(pin)
            | GpioCall::Frequency(pin, _)
            | GpioCall::Duty(pin, _, _) => HardwareError::Pin {
                pin,
                reason: "injected".into(),
            },
        })
    }
}

impl GpioPort for MockGpio {
    fn configure_digital_output(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.record(GpioCall::DigitalOutput(pin))
    }

    fn set_high(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.record(GpioCall::High(pin))
    }

    fn set_low(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.record(GpioCall::Low(pin))
    }

    fn configure_pwm_output(&mut self, pin: u8) -> Result<(), HardwareError> {
        self.record(GpioCall::Pwm(pin))
    }

    fn set_frequency(&mut self, pin: u8, hz: u32) -> Result<(), HardwareError> {
        self.record(GpioCall::Frequency(pin, hz))
    }

    fn set_duty_cycle(
        &mut self,
        pin: u8,
        numerator: u32,
        denominator: u32,
    ) -> Result<(), HardwareError> {
        self.record(GpioCall::Duty(pin, numerator, denominator))
    }

    fn close(&mut self) -> Result<(), HardwareError> {
        self.record(GpioCall::Close)
    }
}

/// Duty-cycle writes in call order.
#[allow(dead_code)]
pub fn duty_writes(log: &CallLog) -> Vec<(u32, u32)> {
    log.borrow()
        .iter()
        .filter_map(|c| match c {
            GpioCall::Duty(_, n, d) => Some((*n, *d)),
            _ => None,
        })
        .collect()
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
