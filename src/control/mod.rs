//! Open-loop actuator control state.

pub mod pwm;
