//! 8-step software PWM rendered from the millisecond tick.
//!
//! Only the three low bits of the free-running tick are used, giving a
//! repeating phase 0..=7 and an 8 ms period:
//!
//! ```text
//! phase  0 1 2 3 4 5 6 7 | 0 1 2 ...
//! duty 0 _ _ _ _ _ _ _ _ | _ _ _        constant low
//! duty 4 ‾ ‾ ‾ ‾ _ _ _ _ | ‾ ‾ ‾        50 %
//! duty 8 ‾ ‾ ‾ ‾ ‾ ‾ ‾ ‾ | ‾ ‾ ‾        constant high
//! ```
//!
//! Duty levels 1-3 cannot spin the fan or light the heater bulbs, so the
//! 0-5 request scale is remapped onto 0 and 4..=8.

use crate::config::LEVEL_STEPS;

/// Mask selecting the PWM phase from the tick counter.
pub const PHASE_MASK: u8 = 0x07;
/// Number of phases in one PWM period.
pub const PWM_STEPS: u8 = 8;
/// Offset added to any non-zero request level.
const LEVEL_OFFSET: u8 = 3;

/// Remap a request level (0-5, saturating) onto the effective duty scale.
pub fn duty_for_level(level: u8) -> u8 {
    match level.min(LEVEL_STEPS) {
        0 => 0,
        l => l + LEVEL_OFFSET,
    }
}

/// PWM output level for `duty` at the given tick.
pub fn is_high(duty: u8, tick: u8) -> bool {
    duty > (tick & PHASE_MASK)
}

/// Five-cell bar graph of an effective duty level, e.g. `"||..."`.
pub fn level_bar(duty: u8) -> &'static str {
    const BARS: [&str; 6] = [".....", "|....", "||...", "|||..", "||||.", "|||||"];
    let steps = duty.saturating_sub(LEVEL_OFFSET).min(LEVEL_STEPS);
    BARS[steps as usize]
}
