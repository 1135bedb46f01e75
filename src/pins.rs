//! GPIO / peripheral pin assignments for the Clima controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Push buttons (active-low with pull-up)
// ---------------------------------------------------------------------------

/// Left button: on/off toggle.  Shares the BOOT strap button.
pub const BUTTON_LEFT_GPIO: i32 = 0;
/// Right button: reserved.
pub const BUTTON_RIGHT_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Analog inputs (ADC1, channel n = GPIO n+1 on ESP32-S3)
// ---------------------------------------------------------------------------

/// Set-point potentiometer.
pub const ADC_CH_SET_POINT: u8 = 0;
/// MCP9701 outside temperature sensor.
pub const ADC_CH_OUTSIDE_TEMP: u8 = 1;
/// LM35 inside temperature sensor.
pub const ADC_CH_INSIDE_TEMP: u8 = 3;
/// Highest ADC1 channel; anything above reads as 0.
pub const ADC_CH_MAX: u8 = 9;

// ---------------------------------------------------------------------------
// Digital outputs
// ---------------------------------------------------------------------------

pub const STANDBY_LED_GPIO: i32 = 5;
pub const BACKLIGHT_GPIO: i32 = 6;
/// Cooling element relay.
pub const COOL_ELEMENT_GPIO: i32 = 7;
/// Heating element relay.
pub const HEAT_ELEMENT_GPIO: i32 = 8;

/// Sequencer demo LEDs.
pub const SEQ_LED_A_GPIO: i32 = 38;
pub const SEQ_LED_B_GPIO: i32 = 39;

// ---------------------------------------------------------------------------
// Software PWM outputs (driven from the 1 ms tick)
// ---------------------------------------------------------------------------

pub const FAN_PWM_GPIO: i32 = 9;
pub const HEAT_PWM_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// HD44780 16x2 LCD, 4-bit parallel
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 11;
pub const LCD_EN_GPIO: i32 = 12;
pub const LCD_D4_GPIO: i32 = 13;
pub const LCD_D5_GPIO: i32 = 15;
pub const LCD_D6_GPIO: i32 = 16;
pub const LCD_D7_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// UART debug (UART1)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 40;
pub const UART_RX_GPIO: i32 = 41;
