//! Line reader thread.
//!
//! Reads operator input one line at a time, parses each line and pushes the
//! result into the [`CommandQueue`].  The thread blocks in `read_line` and is
//! never cancelled; on shutdown the process exits underneath it.
//!
//! End of input is forwarded as [`InputEvent::Closed`] and ends the thread.
//! A line that is not valid UTF-8 is dropped.  Any other read error is
//! treated like end of input, so a dead stream never spins.

use std::io::{BufRead, ErrorKind};
use std::sync::Arc;
use std::thread::JoinHandle;

use futures_lite::future::block_on;
use log::{debug, info, warn};

use crate::app::commands::parse_command;
use crate::error::{Error, Result};

use super::channels::{CommandQueue, InputEvent};

/// Thread name shown in logs and debuggers.
pub const READER_THREAD_NAME: &str = "stdin-reader";

/// Spawn the reader thread over `input`.
pub fn spawn_reader<R>(input: R, queue: Arc<CommandQueue>) -> Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    let handle = std::thread::Builder::new()
        .name(READER_THREAD_NAME.into())
        .spawn(move || read_lines(input, &queue))
        .map_err(|e| Error::Spawn(e.to_string()))?;
    info!("Spawned '{}'", READER_THREAD_NAME);
    Ok(handle)
}

/// Read until end of input, queueing one [`InputEvent`] per line.
///
/// Runs on the calling thread; [`spawn_reader`] wraps it in a thread.
pub fn read_lines<R: BufRead>(mut input: R, queue: &CommandQueue) {
    let mut line = String::new();
    loop {
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                info!("Input closed");
                block_on(queue.send(InputEvent::Closed));
                return;
            }
            Ok(_) => {
                let token = line.trim();
                debug!("Scan => {:?}", token);
                block_on(queue.send(InputEvent::Command(parse_command(token))));
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!("Dropping input line that is not valid UTF-8");
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                warn!("Input read failed ({}), treating as closed", e);
                block_on(queue.send(InputEvent::Closed));
                return;
            }
        }
    }
}
