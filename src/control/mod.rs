//! Output shaping for the actuators.

pub mod pwm;
