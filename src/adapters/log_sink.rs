//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future MQTT or display adapter would implement the same trait.

use log::{error, info};

use crate::app::events::StatusEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`StatusEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &StatusEvent) {
        match event {
            StatusEvent::Started { loop_count } => {
                info!("START | {loop_count} loop(s) armed");
            }
            StatusEvent::LoopStatus {
                loop_id,
                temperature_c,
                state,
            } => {
                info!("LOOP {loop_id} | {temperature_c:.2}\u{00b0}C | {state}");
            }
            StatusEvent::Fault(record) => {
                error!("FAULT | {record}");
            }
        }
    }
}
