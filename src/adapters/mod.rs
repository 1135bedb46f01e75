//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | InputPort          | ESP32 ADC1, button GPIOs |
//! |                | OutputPort         | ESP32 output GPIOs       |
//! |                | DebugPort          | UART1                    |
//! | `log_sink`     | EventSink          | Serial log output        |
//!
//! The LCD adapter lives in [`crate::drivers::lcd`]; it wraps
//! `hd44780-driver` and implements `DisplayPort` directly.

pub mod hardware;
pub mod log_sink;
