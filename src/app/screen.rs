//! LCD screen templates and field rendering for the thermostat.
//!
//! ```text
//!  col  0123456789ABCDEF
//!  L1   Te:+21C Ti:+19C      outside @ 0x03, inside @ 0x0B
//!  L2   Cool ||||. <22C>     fan bar @ 0x45, set-point @ 0x4B
//! ```
//!
//! The static template is drawn once on state entry; the fields are
//! refreshed every control cycle while the unit is on.

use core::fmt::Write;

use heapless::String;

use super::ports::{DisplayPort, LINE_2};
use crate::config::SET_POINT_SPAN;
use crate::control::pwm;
use crate::error::DisplayError;
use crate::fsm::context::{ControlOutputs, SensorSample};
use crate::fsm::{StateKind, ThermalState};

/// Two 16-cell lines per state, indexed by [`ThermalState`].
pub const SCREENS: [[&str; 2]; ThermalState::COUNT] = [
    ["  Clima is OFF  ", "----------------"],
    ["Te:+  C Ti:+  C ", "Vent       <  C>"],
    ["Te:+  C Ti:+  C ", "Cool       <  C>"],
    ["Te:+  C Ti:+  C ", "Heat       <  C>"],
];

pub const OUTSIDE_TEMP_ADDR: u8 = 0x03;
pub const INSIDE_TEMP_ADDR: u8 = 0x0B;
pub const FAN_BAR_ADDR: u8 = LINE_2 + 0x05;
pub const SET_POINT_ADDR: u8 = LINE_2 + 0x0B;

pub fn screen_for(state: ThermalState) -> &'static [&'static str; 2] {
    &SCREENS[state.index()]
}

/// Clear the display and write a two-line template.
pub fn draw_lines(lcd: &mut impl DisplayPort, lines: &[&str; 2]) -> Result<(), DisplayError> {
    lcd.clear()?;
    lcd.go_to(0x00)?;
    lcd.write_str(lines[0])?;
    lcd.go_to(LINE_2)?;
    lcd.write_str(lines[1])
}

/// Draw the template for `state`.
pub fn draw_static(lcd: &mut impl DisplayPort, state: ThermalState) -> Result<(), DisplayError> {
    draw_lines(lcd, screen_for(state))
}

/// Refresh the variable fields of a running-state screen.
pub fn draw_dynamic(
    lcd: &mut impl DisplayPort,
    sample: &SensorSample,
    outputs: &ControlOutputs,
    temp_min: u8,
) -> Result<(), DisplayError> {
    lcd.go_to(OUTSIDE_TEMP_ADDR)?;
    lcd.write_str(&signed_field(sample.outside_temp)?)?;
    lcd.go_to(INSIDE_TEMP_ADDR)?;
    lcd.write_str(&signed_field(sample.inside_temp)?)?;

    lcd.go_to(FAN_BAR_ADDR)?;
    lcd.write_str(pwm::level_bar(outputs.fan_duty))?;

    lcd.go_to(SET_POINT_ADDR)?;
    lcd.write_str(&set_point_field(sample.set_point, temp_min)?)
}

/// Sign plus two digits, e.g. `"+07"` or `"-12"`; magnitudes clamp at 99.
pub fn signed_field(value: i16) -> Result<String<3>, DisplayError> {
    let sign = if value < 0 { '-' } else { '+' };
    let mut out = String::new();
    write!(out, "{}{:02}", sign, value.unsigned_abs().min(99))?;
    Ok(out)
}

/// `"<NNC>"` with the arrow blanked at either end of the range.
pub fn set_point_field(set_point: u8, temp_min: u8) -> Result<String<5>, DisplayError> {
    let down = if set_point <= temp_min { ' ' } else { '<' };
    let up = if set_point >= temp_min.saturating_add(SET_POINT_SPAN) {
        ' '
    } else {
        '>'
    };
    let mut out = String::new();
    write!(out, "{}{:02}C{}", down, set_point.min(99), up)?;
    Ok(out)
}
