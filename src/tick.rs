//! Millisecond tick shared between the timer interrupt and the main loop.
//!
//! ```text
//! ┌────────────────┐  tick, 100 ms flag   ┌──────────────┐
//! │ 1 ms timer ISR │ ───────────────────▶ │  Main loop   │
//! │ (producer)     │ ◀─────────────────── │  (consumer)  │
//! └────────────────┘  fan / heat duty     └──────────────┘
//! ```
//!
//! Every field is a byte-sized atomic.  The ISR is the only writer of the
//! tick, the prescaler and the event flag; the main loop is the only writer
//! of the duty levels.  The event flag is stored last, with `Release`, so a
//! consumer that observes it also observes the tick update that raised it.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::control::pwm;

/// Prescaler advances when the two low tick bits are zero (every 4 ms).
const PRESCALE_MASK: u8 = 0b11;
/// Milliseconds per prescaler step.
const PRESCALE_STEP_MS: u32 = 4;
/// 25 × 4 ms = 100 ms control period.
const DEFAULT_PRESCALE_COUNT: u8 = 25;

/// The single instance used by the firmware binaries.
pub static TICK: TickShared = TickShared::new();

/// Levels to drive on the two PWM pins for the current millisecond.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PwmOutputs {
    pub fan: bool,
    pub heat: bool,
}

pub struct TickShared {
    tick: AtomicU8,
    prescale: AtomicU8,
    prescale_count: AtomicU8,
    control_event: AtomicBool,
    fan_duty: AtomicU8,
    heat_duty: AtomicU8,
}

impl TickShared {
    pub const fn new() -> Self {
        Self {
            tick: AtomicU8::new(0),
            prescale: AtomicU8::new(0),
            prescale_count: AtomicU8::new(DEFAULT_PRESCALE_COUNT),
            control_event: AtomicBool::new(false),
            fan_duty: AtomicU8::new(0),
            heat_duty: AtomicU8::new(0),
        }
    }

    // ── ISR side ──────────────────────────────────────────────

    /// Advance the tick by one millisecond.  Call from the timer interrupt
    /// only.  Returns the PWM pin levels for this millisecond.
    pub fn on_timer_tick(&self) -> PwmOutputs {
        let tick = self.tick.load(Ordering::Relaxed).wrapping_add(1);
        self.tick.store(tick, Ordering::Relaxed);

        let outputs = PwmOutputs {
            fan: pwm::is_high(self.fan_duty.load(Ordering::Relaxed), tick),
            heat: pwm::is_high(self.heat_duty.load(Ordering::Relaxed), tick),
        };

        if tick & PRESCALE_MASK == 0 {
            let count = self.prescale.load(Ordering::Relaxed) + 1;
            if count >= self.prescale_count.load(Ordering::Relaxed) {
                self.prescale.store(0, Ordering::Relaxed);
                self.control_event.store(true, Ordering::Release);
            } else {
                self.prescale.store(count, Ordering::Relaxed);
            }
        }

        outputs
    }

    // ── Main-loop side ────────────────────────────────────────

    /// Set the control period, rounded down to a multiple of 4 ms
    /// (4 ms minimum, 1020 ms maximum).  Call before the timer starts.
    pub fn set_control_period_ms(&self, period_ms: u32) {
        let count = (period_ms / PRESCALE_STEP_MS).clamp(1, u32::from(u8::MAX));
        self.prescale_count.store(count as u8, Ordering::Relaxed);
    }

    /// Consume the control-period event.  Returns `true` at most once per period.
    pub fn take_control_event(&self) -> bool {
        self.control_event.swap(false, Ordering::AcqRel)
    }

    /// Publish the duty levels the ISR renders on the PWM pins.
    pub fn set_duty_levels(&self, fan: u8, heat: u8) {
        self.fan_duty.store(fan, Ordering::Relaxed);
        self.heat_duty.store(heat, Ordering::Relaxed);
    }

    /// Currently published `(fan, heat)` duty levels.
    pub fn duty_levels(&self) -> (u8, u8) {
        (
            self.fan_duty.load(Ordering::Relaxed),
            self.heat_duty.load(Ordering::Relaxed),
        )
    }

    /// Current value of the free-running tick.
    pub fn tick(&self) -> u8 {
        self.tick.load(Ordering::Relaxed)
    }
}

impl Default for TickShared {
    fn default() -> Self {
        Self::new()
    }
}
