//! Shared mutable context threaded through every thermostat handler.
//!
//! `ClimaContext` holds the latest sensor sample, the latched button
//! events, the control outputs written by the handlers, timing, and the
//! configuration.

use crate::app::ports::OutputLine;
use crate::config::ClimaConfig;
use crate::control::pwm;

use super::StateContext;

// ---------------------------------------------------------------------------
// Sensor sample (written by the input sampler)
// ---------------------------------------------------------------------------

/// Latest engineering-unit readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSample {
    /// Outside temperature (°C), refreshed every few seconds.
    pub outside_temp: i16,
    /// Inside temperature (°C), refreshed every few seconds.
    pub inside_temp: i16,
    /// Desired temperature (°C), refreshed every cycle.
    pub set_point: u8,
}

impl SensorSample {
    /// `inside_temp - set_point`; positive means too warm.
    pub fn deviation(&self) -> i16 {
        self.inside_temp - i16::from(self.set_point)
    }
}

// ---------------------------------------------------------------------------
// Button events
// ---------------------------------------------------------------------------

/// Press edges seen since the last cycle was consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonEvents {
    pub left: bool,
    pub right: bool,
}

impl ButtonEvents {
    /// OR new edges into the latch.
    pub fn latch(&mut self, edges: ButtonEvents) {
        self.left |= edges.left;
        self.right |= edges.right;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Control outputs (written by handlers; committed after each cycle)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlOutputs {
    /// Fan PWM duty, 0 or 4..=8.
    pub fan_duty: u8,
    /// Heater PWM duty, 0 or 4..=8.
    pub heat_duty: u8,
    pub cool_element: bool,
    pub heat_element: bool,
    pub standby: bool,
    pub backlight: bool,
}

impl ControlOutputs {
    /// Everything off, standby indicator lit.
    pub fn standby() -> Self {
        Self {
            standby: true,
            ..Self::default()
        }
    }

    /// Set the fan from a 0-5 speed request.
    pub fn set_fan_speed(&mut self, speed: u8) {
        self.fan_duty = pwm::duty_for_level(speed);
    }

    /// Set the heater PWM from a 0-5 level request.
    pub fn set_heat_level(&mut self, level: u8) {
        self.heat_duty = pwm::duty_for_level(level);
    }

    /// The binary lines handed to the output committer.
    pub fn lines(&self) -> [(OutputLine, bool); 4] {
        [
            (OutputLine::Standby, self.standby),
            (OutputLine::Backlight, self.backlight),
            (OutputLine::CoolElement, self.cool_element),
            (OutputLine::HeatElement, self.heat_element),
        ]
    }
}

// ---------------------------------------------------------------------------
// ClimaContext
// ---------------------------------------------------------------------------

/// The context passed to every thermostat state handler.
pub struct ClimaContext {
    // -- Timing --
    /// Cycles elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total cycle count.
    pub total_ticks: u64,

    // -- Inputs --
    pub sensors: SensorSample,
    pub buttons: ButtonEvents,

    // -- Outputs --
    pub outputs: ControlOutputs,
    /// Set by entry actions; the service redraws the LCD template.
    pub redraw_requested: bool,

    pub config: ClimaConfig,
}

impl ClimaContext {
    pub fn new(config: ClimaConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            sensors: SensorSample {
                set_point: config.temp_min,
                ..SensorSample::default()
            },
            buttons: ButtonEvents::default(),
            outputs: ControlOutputs::standby(),
            redraw_requested: false,
            config,
        }
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Returns and clears the redraw request.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw_requested)
    }
}

impl StateContext for ClimaContext {
    fn set_timing(&mut self, ticks_in_state: u64, total_ticks: u64) {
        self.ticks_in_state = ticks_in_state;
        self.total_ticks = total_ticks;
    }
}
