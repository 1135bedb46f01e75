//! Port traits: the boundary between domain logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ClimaService (domain)
//! ```
//!
//! Driven adapters (ADC, GPIO, LCD, UART, logging) implement these traits.
//! The [`ClimaService`](super::service::ClimaService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::error::DisplayError;

// ───────────────────────────────────────────────────────────────
// Inputs (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// The two front-panel push buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// On/off toggle.
    Left,
    /// Reserved.
    Right,
}

/// Read-side port for analog channels and button pins.
pub trait InputPort {
    /// Run one blocking conversion on `channel` and return the 10-bit code.
    /// Channels past the last ADC channel return 0.
    fn read_analog(&mut self, channel: u8) -> u16;

    /// Raw pin level of `button` (`true` = high = released).
    fn read_button(&mut self, button: Button) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Outputs (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Digital output lines committed once per control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OutputLine {
    Standby = 0,
    Backlight = 1,
    CoolElement = 2,
    HeatElement = 3,
    SequenceLedA = 4,
    SequenceLedB = 5,
}

impl OutputLine {
    pub const COUNT: usize = 6;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Write-side port for the digital outputs.
pub trait OutputPort {
    fn write_line(&mut self, line: OutputLine, high: bool);
}

// ───────────────────────────────────────────────────────────────
// Character display
// ───────────────────────────────────────────────────────────────

/// DDRAM address of the first cell of the second line.
pub const LINE_2: u8 = 0x40;
/// Cells per line.
pub const LINE_WIDTH: usize = 16;

/// A 2 × 16 character display.
pub trait DisplayPort {
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor to a DDRAM address (`0x00` line 1, `0x40` line 2).
    fn go_to(&mut self, addr: u8) -> Result<(), DisplayError>;

    /// Write ASCII text at the cursor.
    fn write_str(&mut self, text: &str) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Debug serial line
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget diagnostic output.
pub trait DebugPort {
    fn send(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
