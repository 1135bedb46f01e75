//! 2 × 16 character LCD on an HD44780 controller.
//!
//! The bus protocol lives in `hd44780-driver`; this module owns the delay
//! provider the driver borrows on every call and exposes the display
//! through [`DisplayPort`].  The board wires the panel in 4-bit mode with
//! R/W tied low.

use embedded_hal_0_2::blocking::delay::{DelayMs, DelayUs};
use embedded_hal_0_2::digital::v2::OutputPin;
use hd44780_driver::bus::{DataBus, FourBitBus};
use hd44780_driver::{Cursor, CursorBlink, HD44780};

use crate::app::ports::DisplayPort;
use crate::error::DisplayError;

/// Driver error → port error.  The crate's error carries no detail.
fn bus_err<E>(_: E) -> DisplayError {
    DisplayError::PinWrite
}

pub struct CharLcd<B: DataBus, D> {
    driver: HD44780<B>,
    delay: D,
}

impl<RS, EN, D4, D5, D6, D7, D> CharLcd<FourBitBus<RS, EN, D4, D5, D6, D7>, D>
where
    RS: OutputPin,
    EN: OutputPin,
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
    D: DelayUs<u16> + DelayMs<u8>,
{
    /// Bring the controller up in 4-bit, 2-line mode.
    pub fn new_4bit(
        rs: RS,
        en: EN,
        d4: D4,
        d5: D5,
        d6: D6,
        d7: D7,
        mut delay: D,
    ) -> Result<Self, DisplayError> {
        let driver = HD44780::new_4bit(rs, en, d4, d5, d6, d7, &mut delay).map_err(bus_err)?;
        Ok(Self { driver, delay })
    }
}

impl<B: DataBus, D: DelayUs<u16> + DelayMs<u8>> CharLcd<B, D> {
    /// Home the cursor, blank the panel and hide the cursor.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.driver.reset(&mut self.delay).map_err(bus_err)?;
        self.driver.clear(&mut self.delay).map_err(bus_err)?;
        self.driver
            .set_cursor_visibility(Cursor::Invisible, &mut self.delay)
            .map_err(bus_err)?;
        self.driver
            .set_cursor_blink(CursorBlink::Off, &mut self.delay)
            .map_err(bus_err)?;
        log::info!("lcd: HD44780 ready (4-bit, 2 lines)");
        Ok(())
    }
}

impl<B: DataBus, D: DelayUs<u16> + DelayMs<u8>> DisplayPort for CharLcd<B, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.driver.clear(&mut self.delay).map_err(bus_err)
    }

    fn go_to(&mut self, addr: u8) -> Result<(), DisplayError> {
        self.driver.set_cursor_pos(addr, &mut self.delay).map_err(bus_err)
    }

    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        for byte in text.bytes() {
            // The character ROM has no code points above 0x7F worth mapping.
            let byte = if byte.is_ascii() { byte } else { b'?' };
            self.driver.write_byte(byte, &mut self.delay).map_err(bus_err)?;
        }
        Ok(())
    }
}

// ── Board wiring ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod board {
    use esp_idf_svc::hal::delay::Ets;
    use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, PinDriver};
    use esp_idf_svc::sys::EspError;
    use hd44780_driver::bus::FourBitBus;

    use super::CharLcd;
    use crate::pins;

    pub type LcdPin = PinDriver<'static, AnyOutputPin, Output>;
    pub type BoardLcd = CharLcd<FourBitBus<LcdPin, LcdPin, LcdPin, LcdPin, LcdPin, LcdPin>, Ets>;

    fn lcd_pin(gpio: i32) -> Result<LcdPin, EspError> {
        // SAFETY: each LCD GPIO is claimed exactly once, here, and is not
        // configured by hw_init.
        let pin = unsafe { AnyOutputPin::new(gpio) };
        PinDriver::output(pin)
    }

    /// Claim the LCD GPIOs and bring the panel up blank.
    pub fn open_board_lcd() -> anyhow::Result<BoardLcd> {
        let mut lcd = CharLcd::new_4bit(
            lcd_pin(pins::LCD_RS_GPIO)?,
            lcd_pin(pins::LCD_EN_GPIO)?,
            lcd_pin(pins::LCD_D4_GPIO)?,
            lcd_pin(pins::LCD_D5_GPIO)?,
            lcd_pin(pins::LCD_D6_GPIO)?,
            lcd_pin(pins::LCD_D7_GPIO)?,
            Ets,
        )?;
        lcd.init()?;
        Ok(lcd)
    }
}

#[cfg(target_os = "espidf")]
pub use board::{BoardLcd, open_board_lcd};
