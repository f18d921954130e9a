//! servoctl — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  RpiGpio             LogEventSink       signals (ctrlc)      │
//! │  (GpioPort)          (EventSink)        (ShutdownSignal)     │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │         ControllerService (pure logic)             │      │
//! │  │         PwmState · LED level                       │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  stdin-reader thread ──CommandQueue──▶ Supervisor loop       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::{self, BufReader};
use std::sync::Arc;

use anyhow::Result;
use log::info;

use servoctl::adapters::hardware::RpiGpio;
use servoctl::adapters::log_sink::LogEventSink;
use servoctl::adapters::signals;
use servoctl::config::ControllerConfig;
use servoctl::input::channels::{CommandQueue, ShutdownSignal};
use servoctl::lifecycle::run_controller;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("servoctl v{}", env!("CARGO_PKG_VERSION"));

    let config = ControllerConfig::default();
    info!(
        "LED on GPIO{}, servo on GPIO{}; commands: H, L, A, D or a duty value",
        config.led_pin, config.servo_pin
    );

    // Installed before the pins are touched so a signal during startup
    // still ends in teardown.
    let shutdown = Arc::new(ShutdownSignal::new());
    signals::install(shutdown.clone())?;

    let queue = Arc::new(CommandQueue::new());
    let input = BufReader::new(io::stdin());
    let mut sink = LogEventSink::new();

    // Startup failures are logged where they happen; anyhow reports the
    // error once more on exit.
    let reason = run_controller(&config, RpiGpio::open, input, queue, &shutdown, &mut sink)?;
    info!("Stopped ({:?})", reason);
    Ok(())
}
