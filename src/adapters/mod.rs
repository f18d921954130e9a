//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements | Connects to                         |
//! |-------------|------------|-------------------------------------|
//! | `hardware`  | GpioPort   | rppal GPIO/PWM, or in-memory sim    |
//! | `log_sink`  | EventSink  | `log` facade                        |
//! | `signals`   | —          | SIGINT/SIGTERM → shutdown signal    |

pub mod hardware;
pub mod log_sink;
pub mod signals;
