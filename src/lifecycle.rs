//! Lifecycle supervisor.
//!
//! Owns the GPIO handle from `open` to `close` and drives the controller
//! through its states:
//!
//! ```text
//! Uninitialized ──▶ Initializing ──▶ Running ──▶ ShuttingDown ──▶ Stopped
//!        │                │                            ▲
//!        │ open failed    └── configure failed ────────┘
//!        └──────────────────────────────────────────────────────▶ Stopped
//! ```
//!
//! Once `open` has succeeded, every exit path runs [`Supervisor::shutdown`].
//! Teardown only touches resources that were actually acquired.

use futures_lite::future;
use log::{error, info, warn};

use crate::app::events::{AppEvent, TeardownStep};
use crate::app::ports::{EventSink, GpioPort};
use crate::app::service::ControllerService;
use crate::config::ControllerConfig;
use crate::error::{Error, HardwareError, Result};
use crate::input::channels::{CommandQueue, InputEvent, ShutdownSignal};

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Initializing,
    Running,
    ShuttingDown,
    Stopped,
}

/// Why the control loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT, SIGTERM or SIGHUP.
    Signal,
    /// The input stream ended.
    InputClosed,
}

// ---------------------------------------------------------------------------
// Teardown report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    /// The resource was never acquired.
    Skipped,
    Failed(HardwareError),
}

impl StepOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Result of each teardown step, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownReport {
    pub led_low: StepOutcome,
    pub servo_release: StepOutcome,
    pub close: StepOutcome,
}

impl TeardownReport {
    fn skipped() -> Self {
        Self {
            led_low: StepOutcome::Skipped,
            servo_release: StepOutcome::Skipped,
            close: StepOutcome::Skipped,
        }
    }

    /// No step failed.
    pub fn is_clean(&self) -> bool {
        !(self.led_low.is_failed() || self.servo_release.is_failed() || self.close.is_failed())
    }
}

// ---------------------------------------------------------------------------
// Supervisor
// ---------------------------------------------------------------------------

/// What woke the control loop.
enum Wake {
    Shutdown(ShutdownReason),
    Input(InputEvent),
}

pub struct Supervisor<H: GpioPort> {
    config: ControllerConfig,
    state: LifecycleState,
    service: ControllerService,
    hw: Option<H>,
    /// LED pin is in output mode.
    led_ready: bool,
    /// Servo pin is in PWM mode.
    servo_pwm: bool,
}

impl<H: GpioPort> Supervisor<H> {
    pub fn new(config: ControllerConfig) -> Self {
        let service = ControllerService::new(&config);
        Self {
            config,
            state: LifecycleState::Uninitialized,
            service,
            hw: None,
            led_ready: false,
            servo_pwm: false,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn service(&self) -> &ControllerService {
        &self.service
    }

    /// The GPIO handle, while it is held.
    pub fn hardware(&self) -> Option<&H> {
        self.hw.as_ref()
    }

    /// Acquire the GPIO handle.  On failure the supervisor goes straight to
    /// `Stopped`; there is nothing to release.
    pub fn acquire<F>(&mut self, open: F, sink: &mut impl EventSink) -> Result<()>
    where
        F: FnOnce() -> core::result::Result<H, HardwareError>,
    {
        if self.state != LifecycleState::Uninitialized {
            return Err(Error::Lifecycle("acquire requires Uninitialized"));
        }
        self.transition(LifecycleState::Initializing, sink);

        match open() {
            Ok(hw) => {
                info!("GPIO handle acquired");
                self.hw = Some(hw);
                Ok(())
            }
            Err(e) => {
                error!("Failed to open GPIO: {}", e);
                self.transition(LifecycleState::Stopped, sink);
                Err(e.into())
            }
        }
    }

    /// Put the pins into their startup configuration and move to `Running`.
    ///
    /// On error the supervisor stays in `Initializing`; the caller is
    /// expected to run [`shutdown`](Self::shutdown).
    pub fn configure(&mut self, sink: &mut impl EventSink) -> Result<()> {
        if self.state != LifecycleState::Initializing {
            return Err(Error::Lifecycle("configure requires Initializing"));
        }
        let hw = self
            .hw
            .as_mut()
            .ok_or(Error::Lifecycle("configure without a GPIO handle"))?;
        let led = self.config.led_pin;
        let servo = self.config.servo_pin;

        hw.configure_digital_output(led)?;
        self.led_ready = true;
        hw.set_low(led)?;
        info!("LED on GPIO{} ready (low)", led);

        hw.configure_pwm_output(servo)?;
        self.servo_pwm = true;
        hw.set_frequency(servo, self.config.servo_freq_hz)?;
        info!(
            "Servo on GPIO{} in PWM mode at {} Hz",
            servo, self.config.servo_freq_hz
        );

        std::thread::sleep(self.config.settle_delay());
        self.service.write_duty_cycle(hw, sink)?;

        self.transition(LifecycleState::Running, sink);
        Ok(())
    }

    /// Run the control loop until a shutdown request or end of input.
    ///
    /// A pending shutdown wins over queued commands.  Command failures are
    /// reported by the service and do not stop the loop.
    pub fn run(
        &mut self,
        queue: &CommandQueue,
        shutdown: &ShutdownSignal,
        sink: &mut impl EventSink,
    ) -> Result<ShutdownReason> {
        if self.state != LifecycleState::Running {
            return Err(Error::Lifecycle("run requires Running"));
        }
        let hw = self
            .hw
            .as_mut()
            .ok_or(Error::Lifecycle("run without a GPIO handle"))?;

        let reason = loop {
            let wake = future::block_on(future::or(
                async { Wake::Shutdown(shutdown.wait().await) },
                async { Wake::Input(queue.receive().await) },
            ));
            match wake {
                Wake::Shutdown(reason) => break reason,
                Wake::Input(InputEvent::Closed) => break ShutdownReason::InputClosed,
                Wake::Input(InputEvent::Command(cmd)) => {
                    // Failures are already logged and emitted by the service.
                    let _ = self.service.handle_command(cmd, hw, sink);
                }
            }
        };

        info!("Shutdown requested: {:?}", reason);
        sink.emit(&AppEvent::ShutdownRequested(reason));
        Ok(reason)
    }

    /// Release everything that was acquired: LED low, servo out of PWM mode,
    /// handle closed.  Every step runs even if an earlier one failed.
    ///
    /// Calling it again after `Stopped` is a no-op.
    pub fn shutdown(&mut self, sink: &mut impl EventSink) -> TeardownReport {
        if self.state == LifecycleState::Stopped {
            return TeardownReport::skipped();
        }
        self.transition(LifecycleState::ShuttingDown, sink);

        let Some(mut hw) = self.hw.take() else {
            self.transition(LifecycleState::Stopped, sink);
            return TeardownReport::skipped();
        };

        let led = self.config.led_pin;
        let servo = self.config.servo_pin;

        let led_low = if self.led_ready {
            step(TeardownStep::LedLow, hw.set_low(led), sink)
        } else {
            StepOutcome::Skipped
        };
        let servo_release = if self.servo_pwm {
            step(
                TeardownStep::ServoRelease,
                hw.configure_digital_output(servo),
                sink,
            )
        } else {
            StepOutcome::Skipped
        };
        let close = step(TeardownStep::Close, hw.close(), sink);

        self.led_ready = false;
        self.servo_pwm = false;
        self.transition(LifecycleState::Stopped, sink);

        let report = TeardownReport {
            led_low,
            servo_release,
            close,
        };
        if report.is_clean() {
            info!("Teardown complete");
        } else {
            warn!("Teardown finished with errors: {:?}", report);
        }
        report
    }

    fn transition(&mut self, to: LifecycleState, sink: &mut impl EventSink) {
        let from = self.state;
        if from == to {
            return;
        }
        info!("{:?} -> {:?}", from, to);
        self.state = to;
        sink.emit(&AppEvent::StateChanged { from, to });
    }
}

fn step(
    which: TeardownStep,
    result: core::result::Result<(), HardwareError>,
    sink: &mut impl EventSink,
) -> StepOutcome {
    match result {
        Ok(()) => StepOutcome::Done,
        Err(error) => {
            warn!("Teardown step {:?} failed: {}", which, error);
            sink.emit(&AppEvent::TeardownFailed {
                step: which,
                error: error.clone(),
            });
            StepOutcome::Failed(error)
        }
    }
}

// ---------------------------------------------------------------------------
// Whole-process driver
// ---------------------------------------------------------------------------

/// Run the controller from `open` to teardown.
///
/// `input` is handed to the reader thread.  Startup errors after `open`
/// still release whatever was acquired before returning.
pub fn run_controller<H, F, R, S>(
    config: &ControllerConfig,
    open: F,
    input: R,
    queue: std::sync::Arc<CommandQueue>,
    shutdown: &ShutdownSignal,
    sink: &mut S,
) -> Result<ShutdownReason>
where
    H: GpioPort,
    F: FnOnce() -> core::result::Result<H, HardwareError>,
    R: std::io::BufRead + Send + 'static,
    S: EventSink,
{
    config.validate()?;

    let mut supervisor = Supervisor::new(config.clone());
    supervisor.acquire(open, sink)?;

    if let Err(e) = supervisor.configure(sink) {
        error!("Startup configuration failed: {}", e);
        supervisor.shutdown(sink);
        return Err(e);
    }

    if let Err(e) = crate::input::reader::spawn_reader(input, queue.clone()) {
        error!("Failed to start input reader: {}", e);
        supervisor.shutdown(sink);
        return Err(e);
    }

    let outcome = supervisor.run(&queue, shutdown, sink);
    supervisor.shutdown(sink);
    outcome
}
