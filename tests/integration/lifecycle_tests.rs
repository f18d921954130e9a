//! Integration tests for the Supervisor: startup sequence, control loop and
//! teardown on every exit path.

use std::io::Cursor;
use std::sync::Arc;

use super::mock_gpio::{GpioCall, MockGpio, RecordingSink, duty_writes};

use servoctl::app::commands::Command;
use servoctl::app::events::{AppEvent, TeardownStep};
use servoctl::config::ControllerConfig;
use servoctl::input::channels::{CommandQueue, InputEvent, ShutdownSignal};
use servoctl::lifecycle::{
    LifecycleState, ShutdownReason, StepOutcome, Supervisor, run_controller,
};
use servoctl::{Error, HardwareError};

const LED: u8 = 19;
const SERVO: u8 = 12;

fn fast_config() -> ControllerConfig {
    ControllerConfig {
        settle_delay_ms: 0,
        ..ControllerConfig::default()
    }
}

fn teardown_calls() -> Vec<GpioCall> {
    vec![GpioCall::Low(LED), GpioCall::DigitalOutput(SERVO), GpioCall::Close]
}

// ── Startup ──────────────────────────────────────────────────

#[test]
fn startup_sequence_order() {
    let (hw, log) = MockGpio::new();
    let mut sink = RecordingSink::default();
    let mut sup = Supervisor::new(fast_config());
    sup.acquire(|| Ok(hw), &mut sink).unwrap();
    sup.configure(&mut sink).unwrap();

    assert_eq!(sup.state(), LifecycleState::Running);
    assert_eq!(
        *log.borrow(),
        vec![
            GpioCall::DigitalOutput(LED),
            GpioCall::Low(LED),
            GpioCall::Pwm(SERVO),
            GpioCall::Frequency(SERVO, 50),
            GpioCall::Duty(SERVO, 900, 10_000),
        ]
    );
}

#[test]
fn fatal_open_makes_no_hardware_calls() {
    let (_unused, log) = MockGpio::new();
    let mut sink = RecordingSink::default();
    let queue = Arc::new(CommandQueue::new());
    let shutdown = ShutdownSignal::new();

    let err = run_controller(
        &fast_config(),
        || Err::<MockGpio, _>(HardwareError::Open("permission denied".into())),
        Cursor::new("a\n"),
        queue,
        &shutdown,
        &mut sink,
    )
    .unwrap_err();

    assert_eq!(
        err,
        Error::Hardware(HardwareError::Open("permission denied".into()))
    );
    assert!(log.borrow().is_empty());
    assert!(
        !sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::TeardownFailed { .. })),
        "nothing acquired, nothing torn down"
    );
}

#[test]
fn config_failure_releases_what_was_acquired() {
    let (hw, log) = MockGpio::new();
    let hw = hw.fail_on(GpioCall::Pwm(SERVO));
    let mut sink = RecordingSink::default();
    let queue = Arc::new(CommandQueue::new());
    let shutdown = ShutdownSignal::new();

    let err = run_controller(
        &fast_config(),
        || Ok(hw),
        Cursor::new(""),
        queue,
        &shutdown,
        &mut sink,
    )
    .unwrap_err();

    assert!(matches!(err, Error::Hardware(HardwareError::Pin { pin: SERVO, .. })));
    // The servo never entered PWM mode, so only the LED and the handle are
    // released.
    assert_eq!(
        *log.borrow(),
        vec![
            GpioCall::DigitalOutput(LED),
            GpioCall::Low(LED),
            GpioCall::Pwm(SERVO),
            GpioCall::Low(LED),
            GpioCall::Close,
        ]
    );
}

#[test]
fn invalid_config_is_rejected_before_open() {
    let (hw, log) = MockGpio::new();
    let mut sink = RecordingSink::default();
    let config = ControllerConfig {
        min_pwm: 2000,
        ..fast_config()
    };

    let err = run_controller(
        &config,
        || Ok(hw),
        Cursor::new(""),
        Arc::new(CommandQueue::new()),
        &ShutdownSignal::new(),
        &mut sink,
    )
    .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(log.borrow().is_empty());
}

// ── Full run ─────────────────────────────────────────────────

#[test]
fn end_of_input_shuts_down_after_commands() {
    let (hw, log) = MockGpio::new();
    let mut sink = RecordingSink::default();
    let queue = Arc::new(CommandQueue::new());
    let shutdown = ShutdownSignal::new();

    let reason = run_controller(
        &fast_config(),
        || Ok(hw),
        Cursor::new("a\na\na\n"),
        queue,
        &shutdown,
        &mut sink,
    )
    .unwrap();

    assert_eq!(reason, ShutdownReason::InputClosed);
    assert_eq!(
        duty_writes(&log),
        vec![
            (900, 10_000),
            (950, 10_000),
            (1000, 10_000),
            (1050, 10_000),
        ]
    );
    let calls = log.borrow();
    assert_eq!(calls[calls.len() - 3..], teardown_calls()[..]);
    assert!(sink
        .events
        .contains(&AppEvent::ShutdownRequested(ShutdownReason::InputClosed)));
}

#[test]
fn signal_leaves_led_low_and_servo_released() {
    let (hw, log) = MockGpio::new();
    let mut sink = RecordingSink::default();
    let mut sup = Supervisor::new(fast_config());
    sup.acquire(|| Ok(hw), &mut sink).unwrap();
    sup.configure(&mut sink).unwrap();

    let queue = CommandQueue::new();
    let shutdown = ShutdownSignal::new();
    queue.try_send(InputEvent::Command(Command::SetHigh)).unwrap();
    queue
        .try_send(InputEvent::Command(Command::SetPwmAbsolute(1400)))
        .unwrap();

    // Drain the queue first, then raise the signal from another thread.
    let reason = std::thread::scope(|s| {
        s.spawn(|| {
            while !queue.is_empty() {
                std::thread::yield_now();
            }
            shutdown.signal(ShutdownReason::Signal);
        });
        sup.run(&queue, &shutdown, &mut sink).unwrap()
    });
    assert_eq!(reason, ShutdownReason::Signal);

    let report = sup.shutdown(&mut sink);
    assert!(report.is_clean());
    assert_eq!(sup.state(), LifecycleState::Stopped);

    let calls = log.borrow();
    assert!(calls.contains(&GpioCall::High(LED)));
    assert!(calls.contains(&GpioCall::Duty(SERVO, 1400, 10_000)));
    assert_eq!(calls[calls.len() - 3..], teardown_calls()[..]);
}

// ── Teardown robustness ──────────────────────────────────────

#[test]
fn teardown_continues_after_failures() {
    let (hw, log) = MockGpio::new();
    let hw = hw
        .fail_on(GpioCall::Low(LED))
        .fail_on(GpioCall::DigitalOutput(SERVO));
    let mut sink = RecordingSink::default();
    let mut sup = Supervisor::new(fast_config());
    sup.acquire(|| Ok(hw), &mut sink).unwrap();
    // Startup also drives the LED low, which now fails.
    assert!(sup.configure(&mut sink).is_err());

    let report = sup.shutdown(&mut sink);
    assert!(!report.is_clean());
    assert!(report.led_low.is_failed());
    // The servo never reached PWM mode because startup stopped at the LED.
    assert_eq!(report.servo_release, StepOutcome::Skipped);
    assert_eq!(report.close, StepOutcome::Done);
    assert_eq!(log.borrow().last(), Some(&GpioCall::Close));
}

#[test]
fn every_step_attempted_when_all_fail() {
    let (hw, log) = MockGpio::new();
    let mut sink = RecordingSink::default();
    let mut sup = Supervisor::new(fast_config());
    sup.acquire(
        || {
            Ok(hw
                .fail_on(GpioCall::Close)
                .fail_on(GpioCall::DigitalOutput(SERVO)))
        },
        &mut sink,
    )
    .unwrap();
    sup.configure(&mut sink).unwrap();
    log.borrow_mut().clear();

    let report = sup.shutdown(&mut sink);

    assert_eq!(*log.borrow(), teardown_calls());
    assert_eq!(report.led_low, StepOutcome::Done);
    assert!(report.servo_release.is_failed());
    assert_eq!(
        report.close,
        StepOutcome::Failed(HardwareError::Close("injected".into()))
    );
    let failed: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::TeardownFailed { step, .. } => Some(*step),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec![TeardownStep::ServoRelease, TeardownStep::Close]);
}
