//! Port traits — the boundary between the actuator core and the outside
//! world.
//!
//! The hardware-facing seam is `embedded_hal`'s `OutputPin` / `DelayNs`
//! (implemented by [`OutputPort`](crate::gpio::OutputPort) and
//! [`BlockingDelay`](crate::adapters::delay::BlockingDelay)); this module
//! holds the outbound side.

use super::events::FeederEvent;

/// The service emits structured [`FeederEvent`]s through this port.
/// Adapters decide where they go (serial log, HTTP response detail, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &FeederEvent);
}
