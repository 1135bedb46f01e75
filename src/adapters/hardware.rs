//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Exposes the ADC, button GPIOs, output GPIOs and the debug UART through
//! [`InputPort`], [`OutputPort`] and [`DebugPort`].  This is the only
//! module in the system that touches those peripherals.  On non-espidf
//! targets, the underlying `hw_init` accessors use simulation statics.

use crate::app::ports::{Button, DebugPort, InputPort, OutputLine, OutputPort};
use crate::drivers::hw_init;
use crate::pins;

/// Concrete adapter that combines the board I/O behind port traits.
pub struct HardwareAdapter {
    /// Silences [`DebugPort`] output when `false`.
    uart_enabled: bool,
}

impl HardwareAdapter {
    pub fn new(uart_enabled: bool) -> Self {
        Self { uart_enabled }
    }

    /// GPIO number behind each output line.
    pub fn gpio_for(line: OutputLine) -> i32 {
        match line {
            OutputLine::Standby => pins::STANDBY_LED_GPIO,
            OutputLine::Backlight => pins::BACKLIGHT_GPIO,
            OutputLine::CoolElement => pins::COOL_ELEMENT_GPIO,
            OutputLine::HeatElement => pins::HEAT_ELEMENT_GPIO,
            OutputLine::SequenceLedA => pins::SEQ_LED_A_GPIO,
            OutputLine::SequenceLedB => pins::SEQ_LED_B_GPIO,
        }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for HardwareAdapter {
    fn read_analog(&mut self, channel: u8) -> u16 {
        hw_init::adc1_read(channel)
    }

    fn read_button(&mut self, button: Button) -> bool {
        let pin = match button {
            Button::Left => pins::BUTTON_LEFT_GPIO,
            Button::Right => pins::BUTTON_RIGHT_GPIO,
        };
        hw_init::gpio_read(pin)
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl OutputPort for HardwareAdapter {
    fn write_line(&mut self, line: OutputLine, high: bool) {
        hw_init::gpio_write(Self::gpio_for(line), high);
    }
}

// ── DebugPort implementation ──────────────────────────────────

impl DebugPort for HardwareAdapter {
    fn send(&mut self, text: &str) {
        if self.uart_enabled {
            hw_init::uart_write(text.as_bytes());
        }
    }
}
