//! Outbound application events.
//!
//! The [`FeederService`](super::service::FeederService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side decide what to do with them — log to serial, answer an
//! HTTP request, push a notification.

use crate::app::commands::FeederCommand;
use crate::error::Error;

/// Structured events emitted by the actuator core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeederEvent {
    /// A command began executing (pins locked, not yet claimed).
    CommandStarted(FeederCommand),

    /// The auger finished a dispense.
    TreatDispensed {
        /// Pulses issued by this command.
        steps: u64,
        /// Pulses issued since the service started.
        lifetime_steps: u64,
    },

    /// The door-open relay completed its hold.
    DoorOpened { held_ms: u64 },

    /// The door-close relay completed its hold.
    DoorClosed { held_ms: u64 },

    /// A command failed; its pins were released on the way out.
    CommandFailed {
        command: FeederCommand,
        error: Error,
    },
}
