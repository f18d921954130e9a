//! servoctl library.
//!
//! Interactive LED and servo controller for a Raspberry Pi.  Operator lines
//! from an input stream become LED level changes and servo duty-cycle
//! updates until a termination signal or end of input.  With the `rpi`
//! feature the pins are driven through `rppal`; otherwise an in-memory
//! simulation stands in so the whole stack runs on any host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod pins;

pub use error::{Error, HardwareError, Result};
