//! Input sampling: buttons, set-point potentiometer, temperature sensors.
//!
//! [`InputSampler::sample`] runs once per control cycle.  Buttons and the
//! set-point are read every cycle; the two temperature channels only every
//! `temp_sample_period_cycles` cycles (first cycle included).  The
//! temperature sensors change slowly and the longer period keeps the LCD
//! from flickering between adjacent values.

pub mod temperature;

use log::debug;

use crate::app::ports::{Button, InputPort};
use crate::config::ClimaConfig;
use crate::drivers::button::EdgeDetector;
use crate::fsm::context::{ButtonEvents, SensorSample};
use crate::pins;

/// Result of one sampling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleReport {
    /// Press edges detected this cycle.
    pub buttons: ButtonEvents,
    /// Latest readings.  Temperatures carry over between refreshes.
    pub sample: SensorSample,
    /// `true` when the temperature channels were re-read this cycle.
    pub temps_refreshed: bool,
}

pub struct InputSampler {
    left: EdgeDetector,
    right: EdgeDetector,
    temp_min: u8,
    period: u16,
    /// Cycles until the next temperature refresh.
    countdown: u16,
    last: SensorSample,
}

impl InputSampler {
    pub fn new(config: &ClimaConfig) -> Self {
        Self {
            left: EdgeDetector::new(),
            right: EdgeDetector::new(),
            temp_min: config.temp_min,
            period: config.temp_sample_period_cycles.max(1),
            countdown: 0,
            last: SensorSample {
                set_point: config.temp_min,
                ..SensorSample::default()
            },
        }
    }

    pub fn sample(&mut self, hw: &mut impl InputPort) -> SampleReport {
        let buttons = ButtonEvents {
            left: self.left.update(hw.read_button(Button::Left)),
            right: self.right.update(hw.read_button(Button::Right)),
        };

        self.last.set_point = temperature::set_point_celsius(
            hw.read_analog(pins::ADC_CH_SET_POINT),
            self.temp_min,
        );

        let temps_refreshed = self.countdown == 0;
        if temps_refreshed {
            self.last.outside_temp =
                temperature::outside_celsius(hw.read_analog(pins::ADC_CH_OUTSIDE_TEMP));
            self.last.inside_temp =
                temperature::inside_celsius(hw.read_analog(pins::ADC_CH_INSIDE_TEMP));
            self.countdown = self.period - 1;
            debug!(
                "temperatures: out={}C in={}C set={}C",
                self.last.outside_temp, self.last.inside_temp, self.last.set_point
            );
        } else {
            self.countdown -= 1;
        }

        SampleReport {
            buttons,
            sample: self.last,
            temps_refreshed,
        }
    }

    /// Latest readings without sampling.
    pub fn last(&self) -> SensorSample {
        self.last
    }
}
