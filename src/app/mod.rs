//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control rules for the thermostat: cycle
//! orchestration, LCD screen rendering and change-only output commits.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod outputs;
pub mod ports;
pub mod screen;
pub mod sequencer;
pub mod service;
