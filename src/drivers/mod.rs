//! Board drivers: peripheral initialisation, the tick timer, the
//! character LCD and button edge detection.

pub mod button;
pub mod hw_init;
pub mod hw_timer;
pub mod lcd;
