//! Clima thermostat firmware library.
//!
//! Exposes the pure-logic modules for integration testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module, with host-simulation fallbacks alongside.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod sensors;
pub mod tick;

// Board access. Host builds get simulation stubs from inside each module.
pub mod adapters;
pub mod drivers;
