//! GPIO adapter — bridges the GPIO backend to the [`GpioPort`] trait.
//!
//! This is the only module in the system that touches actual hardware.
//!
//! ## cfg gating
//!
//! - **`feature = "rpi"`** (default): [`RpiGpio`] in
//!   [`rpi_impl`](self::rpi_impl) — `/dev/gpiomem` for levels, the sysfs
//!   PWM interface for the servo.  The binary requires it.
//! - **`test` or `feature = "sim"`**: [`SimGpio`], an in-memory pin model
//!   that logs every call.
//!
//! [`GpioPort`]: crate::app::ports::GpioPort

#[cfg(feature = "rpi")]
mod rpi_impl;

#[cfg(feature = "rpi")]
pub use rpi_impl::RpiGpio;

#[cfg(any(test, feature = "sim"))]
mod sim;

#[cfg(any(test, feature = "sim"))]
pub use sim::{PinMode, SimGpio};
