//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured feeder events to the
//! logger (UART / USB-CDC in production). A future MQTT or webhook
//! adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::FeederEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`FeederEvent`] to the serial console.
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &FeederEvent) {
        match event {
            FeederEvent::CommandFailed { command, error } => {
                warn!("command {command:?} failed: {error}");
            }
            other => info!("{other:?}"),
        }
    }
}
