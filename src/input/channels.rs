//! Inter-thread channels between the input reader and the control loop.
//!
//! Uses `embassy-sync` primitives so the reader thread (blocking std I/O)
//! and the control loop (a future driven by `futures_lite::future::block_on`)
//! share one wake-based mechanism.
//!
//! ```text
//! ┌──────────────┐  InputEvent   ┌──────────────┐
//! │ stdin-reader │──────────────▶│ Control Loop │
//! │  (thread)    │               │ (supervisor) │
//! └──────────────┘               └──────────────┘
//!                  ShutdownReason       ▲
//!   ctrlc handler ──────────────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::app::commands::Command;
use crate::lifecycle::ShutdownReason;

/// What the reader thread hands to the control loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// One parsed line.
    Command(Command),
    /// The input stream ended.  Queued behind every command read before it.
    Closed,
}

/// Depth of the command queue.  A full queue blocks the reader, not the
/// control loop.
pub const COMMAND_QUEUE_DEPTH: usize = 8;

/// Reader thread → control loop.
pub type CommandQueue = Channel<CriticalSectionRawMutex, InputEvent, COMMAND_QUEUE_DEPTH>;

/// Signal handler → control loop.
pub type ShutdownSignal = Signal<CriticalSectionRawMutex, ShutdownReason>;
