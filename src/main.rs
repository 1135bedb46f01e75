//! Clima Firmware: Main Entry Point
//!
//! Hexagonal layout with a single polled control loop and one 1 ms timer.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter        CharLcd           LogEventSink       │
//! │  (Input+Output+Debug)   (DisplayPort)     (EventSink)        │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ───────────────────     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            ClimaService (pure logic)                   │  │
//! │  │  Sampler · FSM · Screen · Output committer             │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │  1 ms esp_timer ──▶ TICK (atomics) ──▶ fan / heat PWM pins   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info};

use clima::adapters::hardware::HardwareAdapter;
use clima::adapters::log_sink::LogEventSink;
use clima::app::ports::DebugPort;
use clima::app::service::ClimaService;
use clima::config::{BUILD_OVERRIDES, ClimaConfig};
use clima::drivers::lcd::open_board_lcd;
use clima::drivers::{hw_init, hw_timer};
use clima::error::Error;
use clima::tick::TICK;

/// Boot failure is unrecoverable: log and park the task.
fn halt(what: &str, e: &dyn core::fmt::Display) -> ! {
    error!("{} failed: {}, halting", what, e);
    loop {
        FreeRtos::delay_ms(1_000);
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Clima v{}                           ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = match ClimaConfig::load(BUILD_OVERRIDES) {
        Ok(c) => c,
        Err(e) => halt("config", &Error::from(e)),
    };
    if BUILD_OVERRIDES.is_some() {
        info!("config: board overrides applied");
    }

    // ── 3. Peripherals ────────────────────────────────────────
    let uart_ok = match hw_init::bring_up(config.debug_uart.then_some(config.uart_baud)) {
        Ok(up) => up,
        Err(e) => halt("HAL init", &e),
    };
    let mut lcd = match open_board_lcd() {
        Ok(lcd) => lcd,
        Err(e) => halt("LCD init", &e),
    };

    // ── 4. Adapters + service ─────────────────────────────────
    let mut hw = HardwareAdapter::new(uart_ok);
    let mut sink = LogEventSink::new();

    hw.send("\n\rInitializing...\n\r");

    TICK.set_control_period_ms(config.control_period_ms);
    let mut service = ClimaService::new(config, &TICK);
    service.start(&mut hw, &mut lcd, &mut sink);

    if let Err(e) = hw_timer::start_tick_timer() {
        halt("tick timer", &Error::from(e));
    }

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        if TICK.take_control_event() {
            service.run_cycle(&mut hw, &mut lcd, &mut sink);
        } else {
            // Yield so the idle task feeds the watchdog.
            FreeRtos::delay_ms(1);
        }
    }
}
