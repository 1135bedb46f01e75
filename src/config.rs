//! System configuration parameters
//!
//! All tunable parameters for the Clima controller.  Defaults match the
//! reference board.  A board can override any subset of fields with a JSON
//! document baked in at build time through the `CLIMA_CONFIG_JSON`
//! environment variable; see [`ClimaConfig::load`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lowest selectable set-point (°C).
pub const TEMP_MIN: u8 = 18;
/// Width of the set-point range above [`TEMP_MIN`] (°C).
pub const SET_POINT_SPAN: u8 = 15;
/// Number of fan / heat steps above "off".
pub const LEVEL_STEPS: u8 = 5;

/// JSON overrides captured from `CLIMA_CONFIG_JSON` when the crate was built.
pub const BUILD_OVERRIDES: Option<&str> = option_env!("CLIMA_CONFIG_JSON");

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimaConfig {
    // --- Set-point ---
    /// Minimum set-point; the potentiometer spans `temp_min..=temp_min + 15`.
    pub temp_min: u8,

    // --- Timing ---
    /// Control cycle period (milliseconds).  Derived from the 1 ms tick.
    pub control_period_ms: u32,
    /// Control cycles between two temperature measurements.
    pub temp_sample_period_cycles: u16,

    // --- Actuators ---
    /// Fan speed (1-5) used while the unit is on.
    pub vent_fan_speed: u8,
    /// Heating PWM level (0-5) used while heating.
    pub heat_level: u8,

    // --- Debug UART ---
    /// Emit the fixed-format debug strings on the UART.
    pub debug_uart: bool,
    pub uart_baud: u32,
}

impl Default for ClimaConfig {
    fn default() -> Self {
        Self {
            temp_min: TEMP_MIN,

            control_period_ms: 100,
            temp_sample_period_cycles: 30, // 3 s at 100 ms

            vent_fan_speed: 4,
            heat_level: LEVEL_STEPS,

            debug_uart: true,
            uart_baud: 115_200,
        }
    }
}

impl ClimaConfig {
    /// Highest selectable set-point.
    pub fn temp_max(&self) -> u8 {
        self.temp_min.saturating_add(SET_POINT_SPAN)
    }

    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if u16::from(self.temp_min) + u16::from(SET_POINT_SPAN) > 99 {
            return Err(ConfigError::ValidationFailed(
                "temp_min + 15 must fit in two LCD digits",
            ));
        }
        if self.control_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("control_period_ms must be > 0"));
        }
        if self.temp_sample_period_cycles == 0 {
            return Err(ConfigError::ValidationFailed(
                "temp_sample_period_cycles must be > 0",
            ));
        }
        if self.vent_fan_speed == 0 || self.vent_fan_speed > LEVEL_STEPS {
            return Err(ConfigError::ValidationFailed("vent_fan_speed must be 1..=5"));
        }
        if self.heat_level > LEVEL_STEPS {
            return Err(ConfigError::ValidationFailed("heat_level must be 0..=5"));
        }
        if self.uart_baud == 0 {
            return Err(ConfigError::ValidationFailed("uart_baud must be > 0"));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON document and validate it.
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with `overrides` applied on top, validated either way.
    ///
    /// Firmware passes [`BUILD_OVERRIDES`].
    pub fn load(overrides: Option<&str>) -> Result<Self, ConfigError> {
        match overrides {
            Some(json) => Self::from_json(json),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }
}
