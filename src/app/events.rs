//! Outbound application events.
//!
//! The [`ClimaService`](super::service::ClimaService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.

use crate::fsm::ThermalState;
use crate::fsm::context::SensorSample;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries the initial state).
    Started(ThermalState),

    /// The FSM transitioned between states.
    StateChanged { from: ThermalState, to: ThermalState },

    /// Temperature channels were re-measured.
    TemperaturesSampled(SensorSample),

    /// The reserved right button was pressed.
    RightButtonPressed,
}
