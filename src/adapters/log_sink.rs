//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to the USB-CDC console in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::TemperaturesSampled(s) => {
                info!(
                    "TEMPS | out={}\u{00b0}C in={}\u{00b0}C | set={}\u{00b0}C | dev={:+}",
                    s.outside_temp,
                    s.inside_temp,
                    s.set_point,
                    s.deviation(),
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::RightButtonPressed => {
                info!("INPUT | right button (no function assigned)");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
