//! Sequencer demo firmware: three LCD screens stepped by the left button,
//! with a timed hold in the middle step.
//!
//! Shares the board bring-up, the LCD, the 1 ms tick and the FSM engine
//! with the thermostat firmware.

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info};

use clima::adapters::hardware::HardwareAdapter;
use clima::app::sequencer::SequencerService;
use clima::drivers::lcd::open_board_lcd;
use clima::drivers::{hw_init, hw_timer};
use clima::error::Error;
use clima::fsm::sequencer::DEFAULT_HOLD_CYCLES;
use clima::tick::TICK;

fn halt(what: &str, e: &dyn core::fmt::Display) -> ! {
    error!("{} failed: {}, halting", what, e);
    loop {
        FreeRtos::delay_ms(1_000);
    }
}

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("Clima sequencer v{}", env!("CARGO_PKG_VERSION"));

    // No debug UART in the demo.
    if let Err(e) = hw_init::bring_up(None) {
        halt("HAL init", &e);
    }
    let mut lcd = match open_board_lcd() {
        Ok(lcd) => lcd,
        Err(e) => halt("LCD init", &e),
    };

    let mut hw = HardwareAdapter::new(false);
    let mut service = SequencerService::new(DEFAULT_HOLD_CYCLES);
    service.start(&mut hw, &mut lcd);

    if let Err(e) = hw_timer::start_tick_timer() {
        halt("tick timer", &Error::from(e));
    }

    loop {
        if TICK.take_control_event() {
            service.run_cycle(&mut hw, &mut lcd);
        } else {
            FreeRtos::delay_ms(1);
        }
    }
}
