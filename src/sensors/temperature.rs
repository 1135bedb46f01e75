//! Analog code → engineering unit conversions.
//!
//! All inputs are 10-bit codes on a 5 V full scale (≈ 4.9 mV per step,
//! treated as 5 mV).  Integer arithmetic only; division truncates toward
//! zero.
//!
//! | Channel     | Part     | Transfer                         |
//! |-------------|----------|----------------------------------|
//! | set-point   | 10k pot  | code / 64 + TEMP_MIN             |
//! | outside     | MCP9701  | 19.5 mV/°C, 400 mV at 0 °C       |
//! | inside      | LM35     | 10 mV/°C, 0 mV at 0 °C           |

/// Largest valid 10-bit code.
pub const ADC_FULL_SCALE: u16 = 1023;

/// MCP9701 output at 0 °C, in millivolts.
const MCP9701_OFFSET_MV: i32 = 400;
/// MCP9701 slope, rounded down to whole millivolts per °C.
const MCP9701_MV_PER_C: i32 = 19;
/// Millivolts per ADC step.
const MV_PER_CODE: i32 = 5;

/// Outside temperature from the MCP9701 channel.  Negative below 0 °C.
pub fn outside_celsius(code: u16) -> i16 {
    let code = i32::from(code.min(ADC_FULL_SCALE));
    ((code * MV_PER_CODE - MCP9701_OFFSET_MV) / MCP9701_MV_PER_C) as i16
}

/// Inside temperature from the LM35 channel.
pub fn inside_celsius(code: u16) -> i16 {
    (code.min(ADC_FULL_SCALE) / 2) as i16
}

/// Set-point from the potentiometer: 16 bands of 64 codes above `temp_min`.
pub fn set_point_celsius(code: u16, temp_min: u8) -> u8 {
    // 1023 / 64 = 15, so the band never exceeds SET_POINT_SPAN.
    temp_min.saturating_add((code.min(ADC_FULL_SCALE) / 64) as u8)
}
