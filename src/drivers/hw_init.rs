//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC channels, GPIO directions and the debug UART using
//! raw ESP-IDF sys calls.  Called once from `main()` before the control
//! loop starts.  The LCD pins are owned by `esp-idf-hal` pin drivers and
//! are not touched here.
//!
//! On host builds every accessor is backed by static atomics so adapters
//! can be exercised without a board.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    UartInitFailed(i32),
    TimerFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)    => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInitFailed(rc)   => write!(f, "UART init failed (rc={})", rc),
            Self::TimerFailed(rc)      => write!(f, "esp_timer setup failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

/// Board bring-up shared by both firmware images.
///
/// Peripheral failures are fatal.  `uart_baud` of `None` skips the debug
/// UART; a UART failure is logged and leaves debug output off.  Returns
/// whether the UART is up.
pub fn bring_up(uart_baud: Option<u32>) -> crate::error::Result<bool> {
    init_peripherals()?;
    let Some(baud) = uart_baud else {
        return Ok(false);
    };
    match init_uart(baud) {
        Ok(()) => Ok(true),
        Err(e) => {
            log::warn!("{}, debug UART disabled", e);
            Ok(false)
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

/// ADC1 channels wired on the board: set-point, outside, inside.
#[cfg(target_os = "espidf")]
const ADC_CHANNELS: [u8; 3] = [
    pins::ADC_CH_SET_POINT,
    pins::ADC_CH_OUTSIDE_TEMP,
    pins::ADC_CH_INSIDE_TEMP,
];

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the control loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    // 12 dB attenuation: ~0-3.1 V input span.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for &ch in &ADC_CHANNELS {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ch as adc_channel_t, &chan_cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }
    }

    info!("hw_init: ADC1 configured (CH0=set-point, CH1=outside, CH3=inside)");
    Ok(())
}

// ── Raw → domain code ─────────────────────────────────────────

/// Largest 12-bit oneshot reading.
pub const ADC_RAW_MAX: i32 = 4095;
/// Input voltage at [`ADC_RAW_MAX`] with 12 dB attenuation.
pub const ADC_FULL_SCALE_MV: u32 = 3_100;
/// Millivolts per domain code step.
const MV_PER_CODE: u32 = 5;
/// Largest domain code.
const CODE_MAX: u32 = 1_023;

/// Millivolts at the pin for a raw 12-bit reading, rounded to nearest.
pub fn millivolts_from_raw(raw: i32) -> u32 {
    let raw = raw.clamp(0, ADC_RAW_MAX) as u32;
    let full = ADC_RAW_MAX as u32;
    (raw * ADC_FULL_SCALE_MV + full / 2) / full
}

/// Domain code (5 mV per step, 0..=1023) for a raw reading on `channel`.
///
/// The set-point pot is a divider across the 3.3 V rail, so its position
/// is ratiometric and keeps the full 10-bit span.  The temperature sensors
/// output an absolute voltage and are rescaled through millivolts.
pub fn code_from_raw(channel: u8, raw: i32) -> u16 {
    if channel == pins::ADC_CH_SET_POINT {
        return (raw.clamp(0, ADC_RAW_MAX) >> 2) as u16;
    }
    ((millivolts_from_raw(raw) + MV_PER_CODE / 2) / MV_PER_CODE).min(CODE_MAX) as u16
}

/// One blocking conversion, rescaled with [`code_from_raw`].
/// Channels past [`pins::ADC_CH_MAX`] return 0.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u8) -> u16 {
    if channel > pins::ADC_CH_MAX {
        return 0;
    }
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel as adc_channel_t, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    code_from_raw(channel, raw)
}

#[cfg(not(target_os = "espidf"))]
static SIM_ADC: [core::sync::atomic::AtomicU16; pins::ADC_CH_MAX as usize + 1] =
    [const { core::sync::atomic::AtomicU16::new(0) }; pins::ADC_CH_MAX as usize + 1];

/// Inject a 10-bit code for `channel` (host builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: u8, code: u16) {
    if let Some(slot) = SIM_ADC.get(channel as usize) {
        slot.store(code, core::sync::atomic::Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u8) -> u16 {
    SIM_ADC
        .get(channel as usize)
        .map_or(0, |slot| slot.load(core::sync::atomic::Ordering::Relaxed))
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // Active-low push buttons with internal pull-ups; polled, no interrupts.
    for &pin in &[pins::BUTTON_LEFT_GPIO, pins::BUTTON_RIGHT_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Host pin levels, one bit per GPIO.  All high at reset (buttons released).
#[cfg(not(target_os = "espidf"))]
static SIM_GPIO: core::sync::atomic::AtomicU64 = core::sync::atomic::AtomicU64::new(u64::MAX);

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    SIM_GPIO.load(core::sync::atomic::Ordering::Relaxed) & (1u64 << pin) != 0
}

// ── GPIO Outputs ──────────────────────────────────────────────

/// Every pin driven through `gpio_write`, including the two PWM lines
/// rendered from the timer callback.
#[cfg(target_os = "espidf")]
const OUTPUT_PINS: [i32; 8] = [
    pins::STANDBY_LED_GPIO,
    pins::BACKLIGHT_GPIO,
    pins::COOL_ELEMENT_GPIO,
    pins::HEAT_ELEMENT_GPIO,
    pins::SEQ_LED_A_GPIO,
    pins::SEQ_LED_B_GPIO,
    pins::FAN_PWM_GPIO,
    pins::HEAT_PWM_GPIO,
];

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    for &pin in &OUTPUT_PINS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin as gpio_num_t, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs().
    unsafe { gpio_set_level(pin as gpio_num_t, if high { 1 } else { 0 }); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    use core::sync::atomic::Ordering;
    let bit = 1u64 << pin;
    if high {
        SIM_GPIO.fetch_or(bit, Ordering::Relaxed);
    } else {
        SIM_GPIO.fetch_and(!bit, Ordering::Relaxed);
    }
}

// ── Debug UART ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_PORT: uart_port_t = 1;
#[cfg(target_os = "espidf")]
const UART_TX_BUF: i32 = 256;
#[cfg(target_os = "espidf")]
const UART_RX_BUF: i32 = 256;

/// Install the UART1 driver at `baud`, 8N1, on the debug pins.
#[cfg(target_os = "espidf")]
pub fn init_uart(baud: u32) -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    // SAFETY: Called once from main() before the control loop.
    unsafe {
        let ret = uart_param_config(UART_PORT, &cfg);
        if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }
        let ret = uart_set_pin(UART_PORT, pins::UART_TX_GPIO, pins::UART_RX_GPIO, -1, -1);
        if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }
        let ret = uart_driver_install(
            UART_PORT,
            UART_RX_BUF,
            UART_TX_BUF,
            0,
            core::ptr::null_mut(),
            0,
        );
        if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }
    }
    info!("hw_init: UART1 @ {} baud", baud);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_uart(baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): UART @ {} baud skipped", baud);
    Ok(())
}

/// Queue `bytes` on the debug UART.  Drops them if the driver is absent.
#[cfg(target_os = "espidf")]
pub fn uart_write(bytes: &[u8]) {
    // SAFETY: the driver copies into its TX ring buffer before returning.
    unsafe {
        uart_write_bytes(UART_PORT, bytes.as_ptr() as *const _, bytes.len());
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(bytes: &[u8]) {
    log::trace!("uart(sim): {} bytes", bytes.len());
}
