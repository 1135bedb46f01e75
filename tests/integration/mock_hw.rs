//! Mock board for integration tests.
//!
//! Records every output write, debug line and LCD operation so tests can
//! assert on the full history without touching GPIO, ADC or UART
//! registers.

use clima::app::events::AppEvent;
use clima::app::ports::{
    Button, DebugPort, DisplayPort, EventSink, InputPort, LINE_2, LINE_WIDTH, OutputLine,
    OutputPort,
};
use clima::error::DisplayError;
use clima::pins;

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    /// 10-bit code per ADC channel.
    pub adc: [u16; pins::ADC_CH_MAX as usize + 1],
    pub left_high: bool,
    pub right_high: bool,
    pub writes: Vec<(OutputLine, bool)>,
    pub debug: Vec<String>,
    pub adc_reads: Vec<u8>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self {
            adc: [0; pins::ADC_CH_MAX as usize + 1],
            left_high: true,
            right_high: true,
            writes: Vec::new(),
            debug: Vec::new(),
            adc_reads: Vec::new(),
        }
    }

    /// Set the inside sensor to `celsius` (LM35, 10 mV/°C).
    pub fn set_inside(&mut self, celsius: u16) {
        self.adc[pins::ADC_CH_INSIDE_TEMP as usize] = celsius * 2;
    }

    /// Set the outside sensor code directly (MCP9701).
    pub fn set_outside_code(&mut self, code: u16) {
        self.adc[pins::ADC_CH_OUTSIDE_TEMP as usize] = code;
    }

    /// Turn the potentiometer to the band for `celsius` (18..=33).
    pub fn set_set_point(&mut self, celsius: u16) {
        self.adc[pins::ADC_CH_SET_POINT as usize] = (celsius - 18) * 64;
    }

    /// Last level written to `line`, if any.
    pub fn level(&self, line: OutputLine) -> Option<bool> {
        self.writes
            .iter()
            .rev()
            .find_map(|&(l, high)| (l == line).then_some(high))
    }

    pub fn reads_of(&self, channel: u8) -> usize {
        self.adc_reads.iter().filter(|&&c| c == channel).count()
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockBoard {
    fn read_analog(&mut self, channel: u8) -> u16 {
        self.adc_reads.push(channel);
        self.adc.get(channel as usize).copied().unwrap_or(0)
    }

    fn read_button(&mut self, button: Button) -> bool {
        match button {
            Button::Left => self.left_high,
            Button::Right => self.right_high,
        }
    }
}

impl OutputPort for MockBoard {
    fn write_line(&mut self, line: OutputLine, high: bool) {
        self.writes.push((line, high));
    }
}

impl DebugPort for MockBoard {
    fn send(&mut self, text: &str) {
        self.debug.push(text.to_owned());
    }
}

// ── MockLcd ───────────────────────────────────────────────────

/// 2 × 16 character buffer with an optional injected failure.
pub struct MockLcd {
    cells: [[u8; LINE_WIDTH]; 2],
    row: usize,
    col: usize,
    pub clears: usize,
    pub fail: bool,
}

#[allow(dead_code)]
impl MockLcd {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; LINE_WIDTH]; 2],
            row: 0,
            col: 0,
            clears: 0,
            fail: false,
        }
    }

    pub fn line(&self, n: usize) -> String {
        String::from_utf8_lossy(&self.cells[n]).into_owned()
    }

    fn check(&self) -> Result<(), DisplayError> {
        if self.fail {
            Err(DisplayError::PinWrite)
        } else {
            Ok(())
        }
    }
}

impl Default for MockLcd {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for MockLcd {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.cells = [[b' '; LINE_WIDTH]; 2];
        self.row = 0;
        self.col = 0;
        self.clears += 1;
        Ok(())
    }

    fn go_to(&mut self, addr: u8) -> Result<(), DisplayError> {
        self.check()?;
        self.row = usize::from(addr >= LINE_2);
        self.col = usize::from(addr & 0x3F);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        self.check()?;
        for b in text.bytes() {
            if self.col < LINE_WIDTH {
                self.cells[self.row][self.col] = b;
            }
            self.col += 1;
        }
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
