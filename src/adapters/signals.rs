//! OS termination signals → shutdown signal.
//!
//! `ctrlc` with its `termination` feature routes SIGINT, SIGTERM and SIGHUP
//! to one handler thread.  The handler only raises the shared
//! [`ShutdownSignal`]; the supervisor does the actual teardown.

use std::sync::Arc;

use log::info;

use crate::error::{Error, Result};
use crate::input::channels::ShutdownSignal;
use crate::lifecycle::ShutdownReason;

/// Install the process-wide handler.  May only succeed once per process.
pub fn install(shutdown: Arc<ShutdownSignal>) -> Result<()> {
    ctrlc::set_handler(move || {
        info!("Termination signal received");
        shutdown.signal(ShutdownReason::Signal);
    })
    .map_err(|e| Error::Signal(e.to_string()))?;
    info!("Signal handlers installed (SIGINT, SIGTERM)");
    Ok(())
}
