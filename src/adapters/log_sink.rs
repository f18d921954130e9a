//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via `env_logger` in the binary).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::PwmChanged {
                numerator,
                denominator,
            } => {
                info!(
                    "PWM   | {}/{} ({:.2}%)",
                    numerator,
                    denominator,
                    f64::from(*numerator) * 100.0 / f64::from((*denominator).max(1))
                );
            }
            AppEvent::LedChanged { high } => {
                info!("LED   | {}", if *high { "HIGH" } else { "LOW" });
            }
            AppEvent::InputIgnored(token) => {
                info!("INPUT | ignored {:?}", token);
            }
            AppEvent::CommandFailed(e) => {
                warn!("INPUT | command failed: {}", e);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::ShutdownRequested(reason) => {
                info!("STOP  | {:?}", reason);
            }
            AppEvent::TeardownFailed { step, error } => {
                warn!("STOP  | {:?} failed: {}", step, error);
            }
        }
    }
}
